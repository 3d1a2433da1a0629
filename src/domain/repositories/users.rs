use axum::async_trait;
use mockall::automock;

use crate::domain::{
    entities::users::{RegisterUserEntity, UserEntity},
    repositories::errors::RepositoryResult,
};

#[async_trait]
#[automock]
pub trait UserRepository {
    async fn create_user(&self, register_user_entity: RegisterUserEntity)
    -> RepositoryResult<UserEntity>;
    async fn find_user_by_id(&self, user_id: String) -> RepositoryResult<Option<UserEntity>>;
    async fn update_customer_id(&self, user_id: String, customer_id: String)
    -> RepositoryResult<usize>;
    async fn find_user_by_customer_id(
        &self,
        customer_id: String,
    ) -> RepositoryResult<Option<UserEntity>>;
}
