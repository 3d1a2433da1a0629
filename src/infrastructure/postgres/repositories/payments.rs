use std::sync::Arc;

use anyhow::anyhow;
use axum::async_trait;
use chrono::Utc;
use diesel::{dsl::insert_into, prelude::*};

use crate::{
    domain::{
        entities::payments::{InsertPaymentEntity, PaymentEntity, SettlePaymentEntity},
        repositories::{
            errors::{RepositoryError, RepositoryResult},
            payments::{ActivationCommand, ActivationOutcome, PaymentRepository},
        },
        value_objects::enums::payment_statuses::PaymentStatus,
    },
    infrastructure::postgres::{
        postgres_connection::PgStore, repositories::subscriptions::insert_subscription,
        schema::payments,
    },
};

pub struct PaymentPostgres {
    store: Arc<PgStore>,
}

impl PaymentPostgres {
    pub fn new(store: Arc<PgStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn insert_payment(
        &self,
        insert_payment_entity: InsertPaymentEntity,
    ) -> RepositoryResult<PaymentEntity> {
        self.store
            .run("payments.insert_payment", move |conn| {
                let payment = insert_into(payments::table)
                    .values(&insert_payment_entity)
                    .returning(PaymentEntity::as_returning())
                    .get_result::<PaymentEntity>(conn)?;
                Ok(payment)
            })
            .await
    }

    async fn find_payment_by_pidx(&self, pidx: String) -> RepositoryResult<Option<PaymentEntity>> {
        self.store
            .run("payments.find_payment_by_pidx", move |conn| {
                let payment = payments::table
                    .filter(payments::pidx.eq(pidx))
                    .select(PaymentEntity::as_select())
                    .first::<PaymentEntity>(conn)
                    .optional()?;
                Ok(payment)
            })
            .await
    }

    async fn activate_subscription(
        &self,
        activation_command: ActivationCommand,
    ) -> RepositoryResult<ActivationOutcome> {
        self.store
            .run("payments.activate_subscription", move |conn| {
                // Commits on Ok, rolls back on Err.
                conn.build_transaction()
                    .read_committed()
                    .run::<ActivationOutcome, RepositoryError, _>(|tx| {
                        let locked = payments::table
                            .filter(payments::pidx.eq(&activation_command.pidx))
                            .filter(payments::user_id.eq(&activation_command.user_id))
                            .select(PaymentEntity::as_select())
                            .for_update()
                            .first::<PaymentEntity>(tx)
                            .optional()?;

                        let Some(payment) = locked else {
                            return Ok(ActivationOutcome::PaymentNotFound);
                        };

                        let current = PaymentStatus::from_stored(&payment.status).ok_or_else(|| {
                            RepositoryError::Store(anyhow!(
                                "payment {} has unknown status {}",
                                payment.id,
                                payment.status
                            ))
                        })?;
                        if current.is_settled() {
                            return Ok(ActivationOutcome::AlreadySettled(current));
                        }
                        if payment.plan_id != activation_command.plan_id {
                            return Ok(ActivationOutcome::PlanMismatch {
                                initiated_plan_id: payment.plan_id,
                            });
                        }

                        let settle = SettlePaymentEntity {
                            status: activation_command.status.to_string(),
                            transaction_id: Some(activation_command.transaction_id.clone()),
                            amount: Some(activation_command.amount),
                            total_amount: Some(activation_command.total_amount),
                            mobile: Some(activation_command.mobile.clone()),
                            updated_at: Utc::now(),
                        };
                        diesel::update(payments::table.find(payment.id))
                            .set(&settle)
                            .execute(tx)?;

                        match activation_command.status {
                            PaymentStatus::Completed => {
                                let subscription = insert_subscription(
                                    tx,
                                    &activation_command.subscription_for(payment.id),
                                )?;
                                Ok(ActivationOutcome::Activated(subscription))
                            }
                            _ => Ok(ActivationOutcome::Declined(payment.id)),
                        }
                    })
            })
            .await
    }
}
