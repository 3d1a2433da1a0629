use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{
    application::{usecases::posts::PostUseCase, validation::PayloadValidator},
    domain::{
        repositories::{posts::PostRepository, sites::SiteRepository},
        value_objects::posts::{CreatePostPayload, EditPostPayload},
    },
    infrastructure::{
        axum_http::{
            auth::AuthUser,
            error_responses::{json_body, success},
            routers::sites::TakeQuery,
        },
        postgres::{
            postgres_connection::PgStore,
            repositories::{posts::PostPostgres, sites::SitePostgres},
        },
    },
};

pub fn routes(store: Arc<PgStore>, validator: Arc<PayloadValidator>) -> Router {
    let site_repository = SitePostgres::new(Arc::clone(&store));
    let post_repository = PostPostgres::new(Arc::clone(&store));
    let usecase = PostUseCase::new(Arc::new(site_repository), Arc::new(post_repository), validator);

    Router::new()
        .route("/posts", get(list_posts_by_user))
        .route(
            "/sites/:site_id/posts",
            get(list_posts_by_site).post(create_post),
        )
        .route(
            "/sites/:site_id/posts/:post_id",
            get(get_post_by_id).patch(edit_post).delete(delete_post),
        )
        .route("/sites/:site_id/posts/slug/:slug", get(get_post_by_slug))
        .route("/public/sites/:subdirectory/posts", get(get_site_posts))
        .route(
            "/public/sites/:subdirectory/posts/:slug",
            get(get_site_post_by_slug),
        )
        .with_state(Arc::new(usecase))
}

pub async fn list_posts_by_user<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    AuthUser { user_id }: AuthUser,
    Query(query): Query<TakeQuery>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match usecase.list_posts_by_user(&user_id, query.take).await {
        Ok(posts) => success(StatusCode::OK, "posts fetched", posts),
        Err(err) => err.into_response(),
    }
}

pub async fn list_posts_by_site<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    AuthUser { user_id }: AuthUser,
    Path(site_id): Path<Uuid>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match usecase.list_posts_by_site(&user_id, site_id).await {
        Ok(site_posts) => success(StatusCode::OK, "site posts fetched", site_posts),
        Err(err) => err.into_response(),
    }
}

pub async fn create_post<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    AuthUser { user_id }: AuthUser,
    Path(site_id): Path<Uuid>,
    payload: Result<Json<CreatePostPayload>, JsonRejection>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match usecase.create_post(payload, &user_id, site_id).await {
        Ok(post) => success(StatusCode::CREATED, "post created", post),
        Err(err) => err.into_response(),
    }
}

pub async fn get_post_by_id<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    AuthUser { user_id }: AuthUser,
    Path((site_id, post_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match usecase.get_post_by_id(post_id, site_id, &user_id).await {
        Ok(post) => success(StatusCode::OK, "post fetched", post),
        Err(err) => err.into_response(),
    }
}

pub async fn get_post_by_slug<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    AuthUser { user_id }: AuthUser,
    Path((site_id, slug)): Path<(Uuid, String)>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match usecase.get_post_by_slug(slug, site_id, &user_id).await {
        Ok(post) => success(StatusCode::OK, "post fetched", post),
        Err(err) => err.into_response(),
    }
}

pub async fn edit_post<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    AuthUser { user_id }: AuthUser,
    Path((site_id, post_id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<EditPostPayload>, JsonRejection>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match usecase.edit_post(payload, post_id, &user_id, site_id).await {
        Ok(()) => success(StatusCode::OK, "post updated", post_id),
        Err(err) => err.into_response(),
    }
}

pub async fn delete_post<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    AuthUser { user_id }: AuthUser,
    Path((site_id, post_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match usecase.delete_post(post_id, site_id, &user_id).await {
        Ok(()) => success(StatusCode::OK, "post deleted", post_id),
        Err(err) => err.into_response(),
    }
}

pub async fn get_site_posts<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    Path(subdirectory): Path<String>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match usecase.get_site_posts(subdirectory).await {
        Ok(feed) => success(StatusCode::OK, "site posts fetched", feed),
        Err(err) => err.into_response(),
    }
}

pub async fn get_site_post_by_slug<S, P>(
    State(usecase): State<Arc<PostUseCase<S, P>>>,
    Path((subdirectory, slug)): Path<(String, String)>,
) -> impl IntoResponse
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    match usecase.get_site_post_by_slug(subdirectory, slug).await {
        Ok(post) => success(StatusCode::OK, "post fetched", post),
        Err(err) => err.into_response(),
    }
}
