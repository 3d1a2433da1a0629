use axum::async_trait;
use mockall::automock;

use crate::domain::{entities::plans::PlanEntity, repositories::errors::RepositoryResult};

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn find_plan_by_id(&self, plan_id: i32) -> RepositoryResult<Option<PlanEntity>>;
    async fn list_plans(&self) -> RepositoryResult<Vec<PlanEntity>>;
}
