use std::sync::Arc;

use axum::async_trait;
use chrono::Utc;
use diesel::{dsl::insert_into, prelude::*};

use crate::{
    domain::{
        entities::users::{RegisterUserEntity, UserEntity},
        repositories::{errors::RepositoryResult, users::UserRepository},
    },
    infrastructure::postgres::{postgres_connection::PgStore, schema::users},
};

pub struct UserPostgres {
    store: Arc<PgStore>,
}

impl UserPostgres {
    pub fn new(store: Arc<PgStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn create_user(
        &self,
        register_user_entity: RegisterUserEntity,
    ) -> RepositoryResult<UserEntity> {
        self.store
            .run("users.create_user", move |conn| {
                let user = insert_into(users::table)
                    .values(&register_user_entity)
                    .returning(UserEntity::as_returning())
                    .get_result::<UserEntity>(conn)?;
                Ok(user)
            })
            .await
    }

    async fn find_user_by_id(&self, user_id: String) -> RepositoryResult<Option<UserEntity>> {
        self.store
            .run("users.find_user_by_id", move |conn| {
                let user = users::table
                    .find(user_id)
                    .select(UserEntity::as_select())
                    .first::<UserEntity>(conn)
                    .optional()?;
                Ok(user)
            })
            .await
    }

    async fn update_customer_id(
        &self,
        user_id: String,
        customer_id: String,
    ) -> RepositoryResult<usize> {
        self.store
            .run("users.update_customer_id", move |conn| {
                let affected = diesel::update(users::table.find(user_id))
                    .set((
                        users::customer_id.eq(Some(customer_id)),
                        users::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)?;
                Ok(affected)
            })
            .await
    }

    async fn find_user_by_customer_id(
        &self,
        customer_id: String,
    ) -> RepositoryResult<Option<UserEntity>> {
        self.store
            .run("users.find_user_by_customer_id", move |conn| {
                let user = users::table
                    .filter(users::customer_id.eq(customer_id))
                    .select(UserEntity::as_select())
                    .first::<UserEntity>(conn)
                    .optional()?;
                Ok(user)
            })
            .await
    }
}
