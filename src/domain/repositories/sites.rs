use axum::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::sites::{InsertSiteEntity, SiteEntity},
    repositories::errors::RepositoryResult,
};

#[async_trait]
#[automock]
pub trait SiteRepository {
    async fn create_site(&self, insert_site_entity: InsertSiteEntity)
    -> RepositoryResult<SiteEntity>;
    async fn find_site_by_id(&self, site_id: Uuid) -> RepositoryResult<Option<SiteEntity>>;
    async fn find_site_by_subdirectory(
        &self,
        subdirectory: String,
    ) -> RepositoryResult<Option<SiteEntity>>;
    /// `take == 0` lists every site.
    async fn list_sites_by_user_id(
        &self,
        user_id: String,
        take: i64,
    ) -> RepositoryResult<Vec<SiteEntity>>;
    async fn update_site_image(
        &self,
        site_id: Uuid,
        user_id: String,
        image_url: String,
    ) -> RepositoryResult<usize>;
    async fn delete_site(&self, site_id: Uuid, user_id: String) -> RepositoryResult<usize>;
}
