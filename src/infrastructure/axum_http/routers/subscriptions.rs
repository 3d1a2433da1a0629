use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{
    application::{usecases::subscriptions::SubscriptionUseCase, validation::PayloadValidator},
    domain::repositories::{
        payments::PaymentRepository, plans::PlanRepository, subscriptions::SubscriptionRepository,
    },
    infrastructure::{
        axum_http::{auth::AuthUser, error_responses::success},
        postgres::{
            postgres_connection::PgStore,
            repositories::{
                payments::PaymentPostgres, plans::PlanPostgres,
                subscriptions::SubscriptionPostgres,
            },
        },
    },
};

pub fn routes(store: Arc<PgStore>, validator: Arc<PayloadValidator>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&store));
    let payment_repository = PaymentPostgres::new(Arc::clone(&store));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&store));

    let usecase = SubscriptionUseCase::new(
        Arc::new(plan_repository),
        Arc::new(payment_repository),
        Arc::new(subscription_repository),
        validator,
    );

    Router::new()
        .route("/plans", get(list_plans))
        .route("/status", get(check_subscription_status))
        .route("/current", get(get_subscription_details))
        .route("/:subscription_id", get(get_subscription_by_id))
        .with_state(Arc::new(usecase))
}

pub async fn list_plans<Pl, Pay, S>(
    State(usecase): State<Arc<SubscriptionUseCase<Pl, Pay, S>>>,
) -> impl IntoResponse
where
    Pl: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match usecase.list_plans().await {
        Ok(plans) => success(StatusCode::OK, "plans fetched", plans),
        Err(err) => err.into_response(),
    }
}

pub async fn check_subscription_status<Pl, Pay, S>(
    State(usecase): State<Arc<SubscriptionUseCase<Pl, Pay, S>>>,
    AuthUser { user_id }: AuthUser,
) -> impl IntoResponse
where
    Pl: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match usecase.check_subscription_status(&user_id).await {
        Ok(status) => success(StatusCode::OK, "subscription status fetched", status),
        Err(err) => err.into_response(),
    }
}

pub async fn get_subscription_details<Pl, Pay, S>(
    State(usecase): State<Arc<SubscriptionUseCase<Pl, Pay, S>>>,
    AuthUser { user_id }: AuthUser,
) -> impl IntoResponse
where
    Pl: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match usecase.get_subscription_details(&user_id).await {
        Ok(subscription) => success(StatusCode::OK, "subscription fetched", subscription),
        Err(err) => err.into_response(),
    }
}

pub async fn get_subscription_by_id<Pl, Pay, S>(
    State(usecase): State<Arc<SubscriptionUseCase<Pl, Pay, S>>>,
    AuthUser { user_id }: AuthUser,
    Path(subscription_id): Path<Uuid>,
) -> impl IntoResponse
where
    Pl: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match usecase.get_subscription_by_id(subscription_id, &user_id).await {
        Ok(subscription) => success(StatusCode::OK, "subscription fetched", subscription),
        Err(err) => err.into_response(),
    }
}
