use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::info;

use crate::{
    application::{usecases::users::UserUseCase, validation::PayloadValidator},
    domain::{
        repositories::users::UserRepository,
        value_objects::iam::{CreateUserPayload, UpdateCustomerIdPayload},
    },
    infrastructure::{
        axum_http::{
            auth::AuthUser,
            error_responses::{json_body, success},
        },
        postgres::{postgres_connection::PgStore, repositories::users::UserPostgres},
    },
};

pub fn routes(store: Arc<PgStore>, validator: Arc<PayloadValidator>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&store));
    let usecase = UserUseCase::new(Arc::new(user_repository), validator);

    Router::new()
        .route("/users", post(create_user))
        .route("/users/:user_id", get(get_user_by_id).patch(update_customer_id))
        .route("/customers/:customer_id", get(get_customer_by_id))
        .with_state(Arc::new(usecase))
}

pub async fn create_user<U>(
    State(usecase): State<Arc<UserUseCase<U>>>,
    payload: Result<Json<CreateUserPayload>, JsonRejection>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match usecase.create_user(payload).await {
        Ok(user) => success(StatusCode::CREATED, "user created", user),
        Err(err) => err.into_response(),
    }
}

pub async fn get_user_by_id<U>(
    State(usecase): State<Arc<UserUseCase<U>>>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.get_user_by_id(user_id).await {
        Ok(user) => success(StatusCode::OK, "user fetched", user),
        Err(err) => err.into_response(),
    }
}

pub async fn update_customer_id<U>(
    State(usecase): State<Arc<UserUseCase<U>>>,
    AuthUser { user_id: caller }: AuthUser,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateCustomerIdPayload>, JsonRejection>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    info!(user_id = %caller, "users: customer id update requested");
    match usecase.update_customer_id(&caller, user_id, payload).await {
        Ok(customer) => success(StatusCode::OK, "customer id updated", customer),
        Err(err) => err.into_response(),
    }
}

pub async fn get_customer_by_id<U>(
    State(usecase): State<Arc<UserUseCase<U>>>,
    _auth: AuthUser,
    Path(customer_id): Path<String>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match usecase.get_customer_by_id(customer_id).await {
        Ok(user) => success(StatusCode::OK, "customer fetched", user),
        Err(err) => err.into_response(),
    }
}
