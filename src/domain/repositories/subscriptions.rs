use axum::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::SubscriptionEntity, repositories::errors::RepositoryResult,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// The row with the latest `end_date`.
    async fn find_latest_subscription_by_user_id(
        &self,
        user_id: String,
    ) -> RepositoryResult<Option<SubscriptionEntity>>;
    async fn find_subscription_by_id(
        &self,
        subscription_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<Option<SubscriptionEntity>>;
}
