use axum::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::{
        payments::{InsertPaymentEntity, PaymentEntity},
        subscriptions::SubscriptionEntity,
    },
    repositories::errors::RepositoryResult,
    value_objects::enums::payment_statuses::PaymentStatus,
};

/// Everything the activation unit of work writes, computed before it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationCommand {
    pub pidx: String,
    pub user_id: String,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub amount: f64,
    pub total_amount: f64,
    pub mobile: String,
    pub plan_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl ActivationCommand {
    pub fn subscription_for(&self, payment_id: Uuid) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::now_v7(),
            start_date: self.start_date,
            end_date: self.end_date,
            user_id: self.user_id.clone(),
            plan_id: self.plan_id,
            payment_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivationOutcome {
    Activated(SubscriptionEntity),
    /// Payment recorded as failed; no subscription written.
    Declined(Uuid),
    PaymentNotFound,
    /// The confirmation names a plan other than the one the payment was
    /// initiated for; nothing written.
    PlanMismatch { initiated_plan_id: i32 },
    /// The payment already left `Initiated`; nothing written.
    AlreadySettled(PaymentStatus),
}

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn insert_payment(&self, insert_payment_entity: InsertPaymentEntity)
    -> RepositoryResult<PaymentEntity>;
    async fn find_payment_by_pidx(&self, pidx: String) -> RepositoryResult<Option<PaymentEntity>>;
    /// Locks the caller's payment row, settles it and, on completion, inserts
    /// the backing subscription. All or nothing.
    async fn activate_subscription(
        &self,
        activation_command: ActivationCommand,
    ) -> RepositoryResult<ActivationOutcome>;
}
