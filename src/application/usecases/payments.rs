use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    application::{
        usecases::errors::{UseCaseError, UseCaseResult},
        validation::PayloadValidator,
    },
    domain::{
        entities::{payments::InsertPaymentEntity, plans::PlanEntity},
        repositories::{payments::PaymentRepository, plans::PlanRepository, users::UserRepository},
        value_objects::{
            enums::payment_statuses::PaymentStatus,
            iam::CallerId,
            payments::{
                CustomerInfo, GatewayInitiateResponse, InitiatePaymentPayload, InitiatedPaymentDto,
            },
        },
    },
    infrastructure::payment_gateway::khalti_client::KhaltiClient,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate_payment(
        &self,
        plan: PlanEntity,
        customer: CustomerInfo,
    ) -> AnyResult<GatewayInitiateResponse>;
}

#[async_trait]
impl PaymentGateway for KhaltiClient {
    async fn initiate_payment(
        &self,
        plan: PlanEntity,
        customer: CustomerInfo,
    ) -> AnyResult<GatewayInitiateResponse> {
        self.initiate_payment(&plan, customer).await
    }
}

pub struct PaymentUseCase<Pl, U, Pay, G>
where
    Pl: PlanRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    plan_repo: Arc<Pl>,
    user_repo: Arc<U>,
    payment_repo: Arc<Pay>,
    gateway: Arc<G>,
    validator: Arc<PayloadValidator>,
}

impl<Pl, U, Pay, G> PaymentUseCase<Pl, U, Pay, G>
where
    Pl: PlanRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    G: PaymentGateway + 'static,
{
    pub fn new(
        plan_repo: Arc<Pl>,
        user_repo: Arc<U>,
        payment_repo: Arc<Pay>,
        gateway: Arc<G>,
        validator: Arc<PayloadValidator>,
    ) -> Self {
        Self {
            plan_repo,
            user_repo,
            payment_repo,
            gateway,
            validator,
        }
    }

    /// Opens a gateway checkout for `plan_id` and records the pending payment.
    pub async fn initiate_payment(
        &self,
        payload: InitiatePaymentPayload,
        caller: &CallerId,
    ) -> UseCaseResult<InitiatedPaymentDto> {
        self.validator.validate(&payload)?;
        let plan_id = payload.plan_id;

        let plan = self
            .plan_repo
            .find_plan_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(plan_id, db_error = ?err, "payments: failed to load plan");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("plan"))?;

        let user = self
            .user_repo
            .find_user_by_id(caller.as_str().to_string())
            .await
            .map_err(|err| {
                error!(user_id = %caller, db_error = ?err, "payments: failed to load user");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("user"))?;

        let customer = CustomerInfo {
            name: user.display_name(),
            email: user.email.clone(),
        };

        let session = self
            .gateway
            .initiate_payment(plan, customer)
            .await
            .map_err(|err| {
                error!(user_id = %caller, plan_id, gateway_error = ?err, "payments: gateway initiate failed");
                UseCaseError::Upstream(err)
            })?;

        let now = Utc::now();
        let pending = InsertPaymentEntity {
            id: Uuid::now_v7(),
            pidx: session.pidx.clone(),
            status: PaymentStatus::Initiated.to_string(),
            plan_id,
            user_id: user.id,
            created_at: now,
            updated_at: now,
        };

        // The gateway session already exists at this point; it is orphaned if
        // the insert fails and has to be reconciled from this log line.
        self.payment_repo
            .insert_payment(pending)
            .await
            .map_err(|err| {
                error!(
                    user_id = %caller,
                    plan_id,
                    pidx = %session.pidx,
                    payment_url = %session.payment_url,
                    db_error = ?err,
                    "payments: gateway session opened but payment was not recorded"
                );
                UseCaseError::Store(err)
            })?;

        info!(user_id = %caller, plan_id, pidx = %session.pidx, "payments: payment initiated");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::repositories::{
            errors::RepositoryError, payments::MockPaymentRepository, plans::MockPlanRepository,
            users::MockUserRepository,
        },
        infrastructure::in_memory::InMemoryStore,
    };
    use mockall::predicate::{always, eq};

    fn session(pidx: &str) -> GatewayInitiateResponse {
        GatewayInitiateResponse {
            pidx: pidx.to_string(),
            payment_url: format!("https://pay.khalti.com/?pidx={pidx}"),
            expires_at: "2024-09-01T12:00:00+05:45".to_string(),
            expires_in: 1800,
        }
    }

    fn in_memory_use_case(
        store: &Arc<InMemoryStore>,
        gateway: MockPaymentGateway,
    ) -> PaymentUseCase<InMemoryStore, InMemoryStore, InMemoryStore, MockPaymentGateway> {
        PaymentUseCase::new(
            Arc::clone(store),
            Arc::clone(store),
            Arc::clone(store),
            Arc::new(gateway),
            Arc::new(PayloadValidator::new()),
        )
    }

    #[tokio::test]
    async fn records_initiated_payment_after_gateway_success() {
        let store = InMemoryStore::seeded();
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_initiate_payment()
            .withf(|plan, customer| {
                plan.id == 1 && customer.name == "Ada Lovelace" && customer.email == "ada@example.com"
            })
            .times(1)
            .returning(|_, _| Ok(session("abc123")));

        let dto = in_memory_use_case(&store, gateway)
            .initiate_payment(InitiatePaymentPayload { plan_id: 1 }, &CallerId::new("u1"))
            .await
            .unwrap();

        assert_eq!(dto.pidx, "abc123");
        let payment = store.payment("abc123").unwrap();
        assert_eq!(payment.status, "Initiated");
        assert_eq!(payment.plan_id, 1);
        assert_eq!(payment.user_id, "u1");
    }

    #[tokio::test]
    async fn unknown_plan_skips_the_gateway() {
        let store = InMemoryStore::seeded();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_initiate_payment().never();

        let result = in_memory_use_case(&store, gateway)
            .initiate_payment(InitiatePaymentPayload { plan_id: 99 }, &CallerId::new("u1"))
            .await;

        assert!(matches!(result, Err(UseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn gateway_failure_is_upstream_and_writes_nothing() {
        let store = InMemoryStore::seeded();
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_initiate_payment()
            .returning(|_, _| Err(anyhow::anyhow!("connection refused")));

        let result = in_memory_use_case(&store, gateway)
            .initiate_payment(InitiatePaymentPayload { plan_id: 1 }, &CallerId::new("u1"))
            .await;

        assert!(matches!(result, Err(UseCaseError::Upstream(_))));
        assert_eq!(store.payment_count(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_after_gateway_success_is_a_store_error() {
        let mut plan_repo = MockPlanRepository::new();
        let mut user_repo = MockUserRepository::new();
        let mut payment_repo = MockPaymentRepository::new();
        let mut gateway = MockPaymentGateway::new();
        let plan = InMemoryStore::monthly_plan();
        let user = InMemoryStore::user("u1", "Ada", "Lovelace");

        plan_repo
            .expect_find_plan_by_id()
            .with(eq(1))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(Some(plan)) })
            });
        user_repo
            .expect_find_user_by_id()
            .with(eq("u1".to_string()))
            .returning(move |_| {
                let user = user.clone();
                Box::pin(async move { Ok(Some(user)) })
            });
        gateway
            .expect_initiate_payment()
            .with(always(), always())
            .returning(|_, _| Ok(session("abc123")));
        payment_repo
            .expect_insert_payment()
            .returning(|_| Box::pin(async { Err(RepositoryError::Timeout) }));

        let use_case = PaymentUseCase::new(
            Arc::new(plan_repo),
            Arc::new(user_repo),
            Arc::new(payment_repo),
            Arc::new(gateway),
            Arc::new(PayloadValidator::new()),
        );

        let result = use_case
            .initiate_payment(InitiatePaymentPayload { plan_id: 1 }, &CallerId::new("u1"))
            .await;

        assert!(matches!(result, Err(UseCaseError::Store(RepositoryError::Timeout))));
    }

    #[tokio::test]
    async fn invalid_plan_id_is_rejected() {
        let store = InMemoryStore::seeded();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_initiate_payment().never();

        let result = in_memory_use_case(&store, gateway)
            .initiate_payment(InitiatePaymentPayload { plan_id: 0 }, &CallerId::new("u1"))
            .await;

        assert!(matches!(result, Err(UseCaseError::Validation(_))));
    }

    #[tokio::test]
    async fn initiated_payment_can_be_activated_for_one_month() {
        use crate::{
            application::usecases::subscriptions::SubscriptionUseCase,
            domain::value_objects::{
                payments::{ActivateSubscriptionPayload, minor_units},
                subscriptions::ActivationDto,
            },
        };
        use chrono::Months;

        let store = InMemoryStore::seeded();
        let caller = CallerId::new("u1");
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_initiate_payment()
            .withf(|plan, _| minor_units(plan.amount) == "50000.0")
            .times(1)
            .returning(|_, _| Ok(session("abc123")));

        in_memory_use_case(&store, gateway)
            .initiate_payment(InitiatePaymentPayload { plan_id: 1 }, &caller)
            .await
            .unwrap();
        assert_eq!(store.payment("abc123").unwrap().status, "Initiated");

        let subscriptions = SubscriptionUseCase::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::new(PayloadValidator::new()),
        );
        let outcome = subscriptions
            .activate_subscription(
                ActivateSubscriptionPayload {
                    pidx: "abc123".to_string(),
                    transaction_id: "txn1".to_string(),
                    amount: 500.0,
                    total_amount: 500.0,
                    mobile: "98XXXXX904".to_string(),
                    status: "Completed".to_string(),
                    plan_id: 1,
                },
                &caller,
            )
            .await
            .unwrap();

        let ActivationDto::Activated { subscription } = outcome else {
            panic!("expected an activated subscription");
        };
        assert_eq!(
            subscription.start_date.checked_add_months(Months::new(1)),
            Some(subscription.end_date)
        );
        let payment = store.payment("abc123").unwrap();
        assert_eq!(payment.status, "Completed");
        assert_eq!(payment.amount, Some(500.0));
        assert_eq!(subscription.user_id, "u1");
        assert_eq!(store.subscriptions_for_payment(payment.id), 1);
    }
}
