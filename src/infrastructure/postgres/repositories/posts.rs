use std::sync::Arc;

use axum::async_trait;
use diesel::{dsl::insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::posts::{EditPostEntity, InsertPostEntity, PostEntity},
        repositories::{errors::RepositoryResult, posts::PostRepository},
    },
    infrastructure::postgres::{
        postgres_connection::PgStore,
        schema::{posts, sites},
    },
};

pub struct PostPostgres {
    store: Arc<PgStore>,
}

impl PostPostgres {
    pub fn new(store: Arc<PgStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for PostPostgres {
    async fn list_posts_by_user_id(
        &self,
        user_id: String,
        take: i64,
    ) -> RepositoryResult<Vec<PostEntity>> {
        self.store
            .run("posts.list_posts_by_user_id", move |conn| {
                let mut query = posts::table
                    .filter(posts::user_id.eq(user_id))
                    .select(PostEntity::as_select())
                    .order(posts::created_at.desc())
                    .into_boxed();

                if take > 0 {
                    query = query.limit(take);
                }

                Ok(query.load::<PostEntity>(conn)?)
            })
            .await
    }

    async fn list_posts_by_user_and_site(
        &self,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<Vec<PostEntity>> {
        self.store
            .run("posts.list_posts_by_user_and_site", move |conn| {
                let result = posts::table
                    .filter(posts::user_id.eq(user_id))
                    .filter(posts::site_id.eq(site_id))
                    .select(PostEntity::as_select())
                    .order(posts::created_at.desc())
                    .load::<PostEntity>(conn)?;
                Ok(result)
            })
            .await
    }

    async fn create_post(&self, insert_post_entity: InsertPostEntity) -> RepositoryResult<PostEntity> {
        self.store
            .run("posts.create_post", move |conn| {
                let post = insert_into(posts::table)
                    .values(&insert_post_entity)
                    .returning(PostEntity::as_returning())
                    .get_result::<PostEntity>(conn)?;
                Ok(post)
            })
            .await
    }

    async fn find_post_by_slug(
        &self,
        slug: String,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<Option<PostEntity>> {
        self.store
            .run("posts.find_post_by_slug", move |conn| {
                let post = posts::table
                    .filter(posts::slug.eq(slug))
                    .filter(posts::user_id.eq(user_id))
                    .filter(posts::site_id.eq(site_id))
                    .select(PostEntity::as_select())
                    .first::<PostEntity>(conn)
                    .optional()?;
                Ok(post)
            })
            .await
    }

    async fn find_post_by_id(
        &self,
        post_id: Uuid,
        site_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<Option<PostEntity>> {
        self.store
            .run("posts.find_post_by_id", move |conn| {
                let post = posts::table
                    .filter(posts::id.eq(post_id))
                    .filter(posts::site_id.eq(site_id))
                    .filter(posts::user_id.eq(user_id))
                    .select(PostEntity::as_select())
                    .first::<PostEntity>(conn)
                    .optional()?;
                Ok(post)
            })
            .await
    }

    async fn edit_post(
        &self,
        edit_post_entity: EditPostEntity,
        post_id: Uuid,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<usize> {
        self.store
            .run("posts.edit_post", move |conn| {
                let affected = diesel::update(
                    posts::table
                        .filter(posts::id.eq(post_id))
                        .filter(posts::user_id.eq(user_id))
                        .filter(posts::site_id.eq(site_id)),
                )
                .set(&edit_post_entity)
                .execute(conn)?;
                Ok(affected)
            })
            .await
    }

    async fn delete_post(
        &self,
        post_id: Uuid,
        site_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<usize> {
        self.store
            .run("posts.delete_post", move |conn| {
                let affected = diesel::delete(
                    posts::table
                        .filter(posts::id.eq(post_id))
                        .filter(posts::site_id.eq(site_id))
                        .filter(posts::user_id.eq(user_id)),
                )
                .execute(conn)?;
                Ok(affected)
            })
            .await
    }

    async fn list_site_posts_by_subdirectory(
        &self,
        subdirectory: String,
    ) -> RepositoryResult<Vec<PostEntity>> {
        self.store
            .run("posts.list_site_posts_by_subdirectory", move |conn| {
                let result = posts::table
                    .inner_join(sites::table)
                    .filter(sites::subdirectory.eq(subdirectory))
                    .select(PostEntity::as_select())
                    .order(posts::created_at.desc())
                    .load::<PostEntity>(conn)?;
                Ok(result)
            })
            .await
    }

    async fn find_site_post_by_slug(
        &self,
        subdirectory: String,
        slug: String,
    ) -> RepositoryResult<Option<PostEntity>> {
        self.store
            .run("posts.find_site_post_by_slug", move |conn| {
                let post = posts::table
                    .inner_join(sites::table)
                    .filter(sites::subdirectory.eq(subdirectory))
                    .filter(posts::slug.eq(slug))
                    .select(PostEntity::as_select())
                    .first::<PostEntity>(conn)
                    .optional()?;
                Ok(post)
            })
            .await
    }
}
