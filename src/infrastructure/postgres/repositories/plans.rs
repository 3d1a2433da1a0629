use std::sync::Arc;

use axum::async_trait;
use diesel::prelude::*;

use crate::{
    domain::{
        entities::plans::PlanEntity,
        repositories::{errors::RepositoryResult, plans::PlanRepository},
    },
    infrastructure::postgres::{postgres_connection::PgStore, schema::plans},
};

pub struct PlanPostgres {
    store: Arc<PgStore>,
}

impl PlanPostgres {
    pub fn new(store: Arc<PgStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn find_plan_by_id(&self, plan_id: i32) -> RepositoryResult<Option<PlanEntity>> {
        self.store
            .run("plans.find_plan_by_id", move |conn| {
                let plan = plans::table
                    .find(plan_id)
                    .select(PlanEntity::as_select())
                    .first::<PlanEntity>(conn)
                    .optional()?;
                Ok(plan)
            })
            .await
    }

    async fn list_plans(&self) -> RepositoryResult<Vec<PlanEntity>> {
        self.store
            .run("plans.list_plans", move |conn| {
                let result = plans::table
                    .select(PlanEntity::as_select())
                    .order((plans::amount.asc(), plans::id.asc()))
                    .load::<PlanEntity>(conn)?;
                Ok(result)
            })
            .await
    }
}
