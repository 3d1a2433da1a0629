use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        usecases::errors::{UseCaseError, UseCaseResult},
        validation::PayloadValidator,
    },
    domain::{
        repositories::{
            errors::RepositoryError,
            payments::{ActivationCommand, ActivationOutcome, PaymentRepository},
            plans::PlanRepository,
            subscriptions::SubscriptionRepository,
        },
        value_objects::{
            enums::payment_statuses::PaymentStatus,
            iam::CallerId,
            payments::ActivateSubscriptionPayload,
            subscriptions::{
                ActivationDto, PlanDto, SubscriptionDto, SubscriptionStatusDto,
                is_subscription_active, subscription_end_date,
            },
        },
    },
};

pub struct SubscriptionUseCase<Pl, Pay, S>
where
    Pl: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repo: Arc<Pl>,
    payment_repo: Arc<Pay>,
    subscription_repo: Arc<S>,
    validator: Arc<PayloadValidator>,
}

impl<Pl, Pay, S> SubscriptionUseCase<Pl, Pay, S>
where
    Pl: PlanRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        plan_repo: Arc<Pl>,
        payment_repo: Arc<Pay>,
        subscription_repo: Arc<S>,
        validator: Arc<PayloadValidator>,
    ) -> Self {
        Self {
            plan_repo,
            payment_repo,
            subscription_repo,
            validator,
        }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanDto>> {
        let plans = self.plan_repo.list_plans().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list plans");
            UseCaseError::from(err)
        })?;
        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    /// Settles the caller's pending payment. A completed payment yields a new
    /// one-month window starting now; a failed one is recorded and declined.
    /// The confirmation must name the plan the payment was initiated for.
    pub async fn activate_subscription(
        &self,
        payload: ActivateSubscriptionPayload,
        caller: &CallerId,
    ) -> UseCaseResult<ActivationDto> {
        self.validator.validate(&payload)?;
        let status = PaymentStatus::from_gateway(&payload.status).ok_or_else(|| {
            UseCaseError::Validation(format!(
                "status must be a terminal gateway status, got {:?}",
                payload.status
            ))
        })?;

        let plan_id = payload.plan_id;
        self.plan_repo
            .find_plan_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "subscriptions: failed to load plan");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("plan"))?;

        let start_date = Utc::now();
        let end_date = subscription_end_date(start_date).ok_or_else(|| {
            UseCaseError::Store(RepositoryError::Store(anyhow!(
                "subscription end date overflows from {start_date}"
            )))
        })?;

        let pidx = payload.pidx.clone();
        let command = ActivationCommand {
            pidx: payload.pidx,
            user_id: caller.as_str().to_string(),
            status,
            transaction_id: payload.transaction_id,
            amount: payload.amount,
            total_amount: payload.total_amount,
            mobile: payload.mobile,
            plan_id,
            start_date,
            end_date,
        };

        let outcome = self
            .payment_repo
            .activate_subscription(command)
            .await
            .map_err(|err| {
                error!(
                    user_id = %caller,
                    %pidx,
                    db_error = ?err,
                    "subscriptions: activation transaction failed"
                );
                UseCaseError::from_repository(err, "payment already backs a subscription")
            })?;

        match outcome {
            ActivationOutcome::Activated(subscription) => {
                info!(
                    user_id = %caller,
                    %pidx,
                    subscription_id = %subscription.id,
                    end_date = %subscription.end_date,
                    "subscriptions: subscription activated"
                );
                Ok(ActivationDto::Activated {
                    subscription: SubscriptionDto::from(subscription),
                })
            }
            ActivationOutcome::Declined(payment_id) => {
                info!(user_id = %caller, %pidx, %payment_id, "subscriptions: payment declined");
                Ok(ActivationDto::Declined { payment_id })
            }
            ActivationOutcome::PaymentNotFound => Err(UseCaseError::not_found("payment")),
            ActivationOutcome::PlanMismatch { initiated_plan_id } => {
                warn!(
                    user_id = %caller,
                    %pidx,
                    initiated_plan_id,
                    requested_plan_id = plan_id,
                    "subscriptions: confirmation names a different plan"
                );
                Err(UseCaseError::Conflict(format!(
                    "payment was initiated for plan {initiated_plan_id}"
                )))
            }
            ActivationOutcome::AlreadySettled(current) => {
                warn!(user_id = %caller, %pidx, %current, "subscriptions: payment already settled");
                Err(UseCaseError::Conflict(format!(
                    "payment already settled as {current}"
                )))
            }
        }
    }

    /// `true` only while `now` is strictly before the latest window's end.
    pub async fn check_subscription_status(
        &self,
        caller: &CallerId,
    ) -> UseCaseResult<SubscriptionStatusDto> {
        let latest = self
            .subscription_repo
            .find_latest_subscription_by_user_id(caller.as_str().to_string())
            .await
            .map_err(|err| {
                error!(user_id = %caller, db_error = ?err, "subscriptions: failed to load subscription");
                UseCaseError::from(err)
            })?;

        let active = latest
            .map(|subscription| is_subscription_active(subscription.end_date, Utc::now()))
            .unwrap_or(false);

        Ok(SubscriptionStatusDto { active })
    }

    pub async fn get_subscription_details(
        &self,
        caller: &CallerId,
    ) -> UseCaseResult<SubscriptionDto> {
        let subscription = self
            .subscription_repo
            .find_latest_subscription_by_user_id(caller.as_str().to_string())
            .await
            .map_err(|err| {
                error!(user_id = %caller, db_error = ?err, "subscriptions: failed to load subscription");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("subscription"))?;

        Ok(SubscriptionDto::from(subscription))
    }

    pub async fn get_subscription_by_id(
        &self,
        subscription_id: Uuid,
        caller: &CallerId,
    ) -> UseCaseResult<SubscriptionDto> {
        let subscription = self
            .subscription_repo
            .find_subscription_by_id(subscription_id, caller.as_str().to_string())
            .await
            .map_err(|err| {
                error!(%subscription_id, user_id = %caller, db_error = ?err, "subscriptions: failed to load subscription");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("subscription"))?;

        Ok(SubscriptionDto::from(subscription))
    }
}
