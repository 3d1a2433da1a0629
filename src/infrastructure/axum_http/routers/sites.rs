use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::{usecases::sites::SiteUseCase, validation::PayloadValidator},
    domain::{
        repositories::sites::SiteRepository,
        value_objects::sites::{CreateSitePayload, UpdateSiteImagePayload},
    },
    infrastructure::{
        axum_http::{
            auth::AuthUser,
            error_responses::{json_body, success},
        },
        postgres::{postgres_connection::PgStore, repositories::sites::SitePostgres},
    },
};

#[derive(Debug, Deserialize)]
pub struct TakeQuery {
    pub take: Option<i64>,
}

pub fn routes(store: Arc<PgStore>, validator: Arc<PayloadValidator>) -> Router {
    let site_repository = SitePostgres::new(Arc::clone(&store));
    let usecase = SiteUseCase::new(Arc::new(site_repository), validator);

    Router::new()
        .route("/sites", get(list_sites).post(create_site))
        .route("/sites/:site_id", patch(update_site_image).delete(delete_site))
        .route("/public/sites/:subdirectory", get(get_site_by_subdirectory))
        .with_state(Arc::new(usecase))
}

pub async fn create_site<S>(
    State(usecase): State<Arc<SiteUseCase<S>>>,
    AuthUser { user_id }: AuthUser,
    payload: Result<Json<CreateSitePayload>, JsonRejection>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match usecase.create_site(payload, &user_id).await {
        Ok(site) => success(StatusCode::CREATED, "site created", site),
        Err(err) => err.into_response(),
    }
}

pub async fn list_sites<S>(
    State(usecase): State<Arc<SiteUseCase<S>>>,
    AuthUser { user_id }: AuthUser,
    Query(query): Query<TakeQuery>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
{
    match usecase.list_sites(&user_id, query.take).await {
        Ok(sites) => success(StatusCode::OK, "sites fetched", sites),
        Err(err) => err.into_response(),
    }
}

pub async fn get_site_by_subdirectory<S>(
    State(usecase): State<Arc<SiteUseCase<S>>>,
    Path(subdirectory): Path<String>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
{
    match usecase.get_site_by_subdirectory(subdirectory).await {
        Ok(site) => success(StatusCode::OK, "site fetched", site),
        Err(err) => err.into_response(),
    }
}

pub async fn update_site_image<S>(
    State(usecase): State<Arc<SiteUseCase<S>>>,
    AuthUser { user_id }: AuthUser,
    Path(site_id): Path<Uuid>,
    payload: Result<Json<UpdateSiteImagePayload>, JsonRejection>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match usecase.update_site_image(site_id, &user_id, payload).await {
        Ok(()) => success(StatusCode::OK, "site image updated", site_id),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_site<S>(
    State(usecase): State<Arc<SiteUseCase<S>>>,
    AuthUser { user_id }: AuthUser,
    Path(site_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
{
    match usecase.delete_site(site_id, &user_id).await {
        Ok(()) => success(StatusCode::OK, "site deleted", site_id),
        Err(err) => err.into_response(),
    }
}
