use std::sync::Arc;

use axum::async_trait;
use diesel::{PgConnection, dsl::insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::{errors::RepositoryResult, subscriptions::SubscriptionRepository},
    },
    infrastructure::postgres::{postgres_connection::PgStore, schema::subscriptions},
};

pub struct SubscriptionPostgres {
    store: Arc<PgStore>,
}

impl SubscriptionPostgres {
    pub fn new(store: Arc<PgStore>) -> Self {
        Self { store }
    }
}

/// Only called from inside the payment activation transaction.
pub(crate) fn insert_subscription(
    conn: &mut PgConnection,
    subscription_entity: &SubscriptionEntity,
) -> RepositoryResult<SubscriptionEntity> {
    let subscription = insert_into(subscriptions::table)
        .values(subscription_entity)
        .returning(SubscriptionEntity::as_returning())
        .get_result::<SubscriptionEntity>(conn)?;
    Ok(subscription)
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn find_latest_subscription_by_user_id(
        &self,
        user_id: String,
    ) -> RepositoryResult<Option<SubscriptionEntity>> {
        self.store
            .run("subscriptions.find_latest_subscription_by_user_id", move |conn| {
                let subscription = subscriptions::table
                    .filter(subscriptions::user_id.eq(user_id))
                    .select(SubscriptionEntity::as_select())
                    .order(subscriptions::end_date.desc())
                    .first::<SubscriptionEntity>(conn)
                    .optional()?;
                Ok(subscription)
            })
            .await
    }

    async fn find_subscription_by_id(
        &self,
        subscription_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<Option<SubscriptionEntity>> {
        self.store
            .run("subscriptions.find_subscription_by_id", move |conn| {
                let subscription = subscriptions::table
                    .filter(subscriptions::id.eq(subscription_id))
                    .filter(subscriptions::user_id.eq(user_id))
                    .select(SubscriptionEntity::as_select())
                    .first::<SubscriptionEntity>(conn)
                    .optional()?;
                Ok(subscription)
            })
            .await
    }
}
