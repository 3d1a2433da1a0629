use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::payments;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = payments)]
pub struct PaymentEntity {
    pub id: Uuid,
    pub pidx: String,
    pub status: String,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub mobile: Option<String>,
    pub plan_id: i32,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = payments)]
pub struct InsertPaymentEntity {
    pub id: Uuid,
    pub pidx: String,
    pub status: String,
    pub plan_id: i32,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InsertPaymentEntity> for PaymentEntity {
    fn from(value: InsertPaymentEntity) -> Self {
        Self {
            id: value.id,
            pidx: value.pidx,
            status: value.status,
            transaction_id: None,
            amount: None,
            total_amount: None,
            mobile: None,
            plan_id: value.plan_id,
            user_id: value.user_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = payments)]
pub struct SettlePaymentEntity {
    pub status: String,
    pub transaction_id: Option<String>,
    pub amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub mobile: Option<String>,
    pub updated_at: DateTime<Utc>,
}
