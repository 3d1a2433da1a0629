use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::plans;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanEntity {
    pub id: i32,
    pub plan_name: String,
    pub amount: f64,
    pub interval: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
