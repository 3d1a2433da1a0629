use std::sync::Arc;

use axum::async_trait;
use chrono::Utc;
use diesel::{dsl::insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::sites::{InsertSiteEntity, SiteEntity},
        repositories::{errors::RepositoryResult, sites::SiteRepository},
    },
    infrastructure::postgres::{postgres_connection::PgStore, schema::sites},
};

pub struct SitePostgres {
    store: Arc<PgStore>,
}

impl SitePostgres {
    pub fn new(store: Arc<PgStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SiteRepository for SitePostgres {
    async fn create_site(&self, insert_site_entity: InsertSiteEntity) -> RepositoryResult<SiteEntity> {
        self.store
            .run("sites.create_site", move |conn| {
                let site = insert_into(sites::table)
                    .values(&insert_site_entity)
                    .returning(SiteEntity::as_returning())
                    .get_result::<SiteEntity>(conn)?;
                Ok(site)
            })
            .await
    }

    async fn find_site_by_id(&self, site_id: Uuid) -> RepositoryResult<Option<SiteEntity>> {
        self.store
            .run("sites.find_site_by_id", move |conn| {
                let site = sites::table
                    .find(site_id)
                    .select(SiteEntity::as_select())
                    .first::<SiteEntity>(conn)
                    .optional()?;
                Ok(site)
            })
            .await
    }

    async fn find_site_by_subdirectory(
        &self,
        subdirectory: String,
    ) -> RepositoryResult<Option<SiteEntity>> {
        self.store
            .run("sites.find_site_by_subdirectory", move |conn| {
                let site = sites::table
                    .filter(sites::subdirectory.eq(subdirectory))
                    .select(SiteEntity::as_select())
                    .first::<SiteEntity>(conn)
                    .optional()?;
                Ok(site)
            })
            .await
    }

    async fn list_sites_by_user_id(
        &self,
        user_id: String,
        take: i64,
    ) -> RepositoryResult<Vec<SiteEntity>> {
        self.store
            .run("sites.list_sites_by_user_id", move |conn| {
                let mut query = sites::table
                    .filter(sites::user_id.eq(user_id))
                    .select(SiteEntity::as_select())
                    .order(sites::created_at.desc())
                    .into_boxed();

                if take > 0 {
                    query = query.limit(take);
                }

                Ok(query.load::<SiteEntity>(conn)?)
            })
            .await
    }

    async fn update_site_image(
        &self,
        site_id: Uuid,
        user_id: String,
        image_url: String,
    ) -> RepositoryResult<usize> {
        self.store
            .run("sites.update_site_image", move |conn| {
                let affected = diesel::update(
                    sites::table
                        .filter(sites::id.eq(site_id))
                        .filter(sites::user_id.eq(user_id)),
                )
                .set((
                    sites::image_url.eq(Some(image_url)),
                    sites::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
                Ok(affected)
            })
            .await
    }

    async fn delete_site(&self, site_id: Uuid, user_id: String) -> RepositoryResult<usize> {
        self.store
            .run("sites.delete_site", move |conn| {
                let affected = diesel::delete(
                    sites::table
                        .filter(sites::id.eq(site_id))
                        .filter(sites::user_id.eq(user_id)),
                )
                .execute(conn)?;
                Ok(affected)
            })
            .await
    }
}
