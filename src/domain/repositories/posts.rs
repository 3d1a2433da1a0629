use axum::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::posts::{EditPostEntity, InsertPostEntity, PostEntity},
    repositories::errors::RepositoryResult,
};

/// Every owner-facing call is scoped by `user_id` (and `site_id` where given).
#[async_trait]
#[automock]
pub trait PostRepository {
    async fn list_posts_by_user_id(
        &self,
        user_id: String,
        take: i64,
    ) -> RepositoryResult<Vec<PostEntity>>;
    async fn list_posts_by_user_and_site(
        &self,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<Vec<PostEntity>>;
    async fn create_post(&self, insert_post_entity: InsertPostEntity)
    -> RepositoryResult<PostEntity>;
    async fn find_post_by_slug(
        &self,
        slug: String,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<Option<PostEntity>>;
    async fn find_post_by_id(
        &self,
        post_id: Uuid,
        site_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<Option<PostEntity>>;
    async fn edit_post(
        &self,
        edit_post_entity: EditPostEntity,
        post_id: Uuid,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<usize>;
    async fn delete_post(
        &self,
        post_id: Uuid,
        site_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<usize>;
    async fn list_site_posts_by_subdirectory(
        &self,
        subdirectory: String,
    ) -> RepositoryResult<Vec<PostEntity>>;
    async fn find_site_post_by_slug(
        &self,
        subdirectory: String,
        slug: String,
    ) -> RepositoryResult<Option<PostEntity>>;
}
