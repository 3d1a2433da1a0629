use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{plans::PlanEntity, subscriptions::SubscriptionEntity};

/// Every paid activation buys one calendar month, whatever the plan.
pub const SUBSCRIPTION_TERM: Months = Months::new(1);

/// Jan 31 + 1 month clamps to the last day of February.
pub fn subscription_end_date(start_date: DateTime<Utc>) -> Option<DateTime<Utc>> {
    start_date.checked_add_months(SUBSCRIPTION_TERM)
}

/// A subscription window is half-open: active strictly before `end_date`.
pub fn is_subscription_active(end_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now < end_date
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub user_id: String,
    pub plan_id: i32,
    pub payment_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionEntity> for SubscriptionDto {
    fn from(value: SubscriptionEntity) -> Self {
        Self {
            id: value.id,
            start_date: value.start_date,
            end_date: value.end_date,
            user_id: value.user_id,
            plan_id: value.plan_id,
            payment_id: value.payment_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionStatusDto {
    pub active: bool,
}

/// Outcome of settling a payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActivationDto {
    Activated { subscription: SubscriptionDto },
    Declined { payment_id: Uuid },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDto {
    pub id: i32,
    pub plan_name: String,
    pub amount: f64,
    pub interval: String,
}

impl From<PlanEntity> for PlanDto {
    fn from(value: PlanEntity) -> Self {
        Self {
            id: value.id,
            plan_name: value.plan_name,
            amount: value.amount,
            interval: value.interval,
        }
    }
}
