use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
};
use tracing::info;

use crate::{
    application::{
        usecases::{
            payments::{PaymentGateway, PaymentUseCase},
            subscriptions::SubscriptionUseCase,
        },
        validation::PayloadValidator,
    },
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{
            payments::PaymentRepository, plans::PlanRepository,
            subscriptions::SubscriptionRepository, users::UserRepository,
        },
        value_objects::payments::{ActivateSubscriptionPayload, InitiatePaymentPayload},
    },
    infrastructure::{
        axum_http::{
            auth::AuthUser,
            error_responses::{json_body, success},
        },
        payment_gateway::khalti_client::KhaltiClient,
        postgres::{
            postgres_connection::PgStore,
            repositories::{
                payments::PaymentPostgres, plans::PlanPostgres,
                subscriptions::SubscriptionPostgres, users::UserPostgres,
            },
        },
    },
};

pub fn routes(
    store: Arc<PgStore>,
    config: Arc<DotEnvyConfig>,
    validator: Arc<PayloadValidator>,
) -> anyhow::Result<Router> {
    let plan_repository = Arc::new(PlanPostgres::new(Arc::clone(&store)));
    let payment_repository = Arc::new(PaymentPostgres::new(Arc::clone(&store)));
    let user_repository = UserPostgres::new(Arc::clone(&store));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&store));
    let khalti_client = KhaltiClient::new(&config.khalti)?;

    let payment_usecase = PaymentUseCase::new(
        Arc::clone(&plan_repository),
        Arc::new(user_repository),
        Arc::clone(&payment_repository),
        Arc::new(khalti_client),
        Arc::clone(&validator),
    );
    let subscription_usecase = SubscriptionUseCase::new(
        plan_repository,
        payment_repository,
        Arc::new(subscription_repository),
        validator,
    );

    let router = Router::new()
        .route("/payment/initiate", post(initiate_payment))
        .with_state(Arc::new(payment_usecase))
        .merge(
            Router::new()
                .route("/payment", patch(activate_subscription))
                .with_state(Arc::new(subscription_usecase)),
        );

    Ok(router)
}

pub async fn initiate_payment<Pl, U, Pay, G>(
    State(usecase): State<Arc<PaymentUseCase<Pl, U, Pay, G>>>,
    AuthUser { user_id }: AuthUser,
    payload: Result<Json<InitiatePaymentPayload>, JsonRejection>,
) -> impl IntoResponse
where
    Pl: PlanRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    info!(%user_id, plan_id = payload.plan_id, "payments: initiate request received");
    match usecase.initiate_payment(payload, &user_id).await {
        Ok(session) => success(StatusCode::OK, "payment initiated", session),
        Err(err) => err.into_response(),
    }
}

pub async fn activate_subscription<Pl, Pay, S>(
    State(usecase): State<Arc<SubscriptionUseCase<Pl, Pay, S>>>,
    AuthUser { user_id }: AuthUser,
    payload: Result<Json<ActivateSubscriptionPayload>, JsonRejection>,
) -> impl IntoResponse
where
    Pl: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    info!(%user_id, pidx = %payload.pidx, "payments: confirmation received");
    match usecase.activate_subscription(payload, &user_id).await {
        Ok(outcome) => success(StatusCode::OK, "payment settled", outcome),
        Err(err) => err.into_response(),
    }
}
