//! Test-only store implementing every repository trait over one locked state,
//! enforcing the same unique constraints as the SQL schema.

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use anyhow::anyhow;
use axum::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    entities::{
        payments::{InsertPaymentEntity, PaymentEntity},
        plans::PlanEntity,
        posts::{EditPostEntity, InsertPostEntity, PostEntity},
        sites::{InsertSiteEntity, SiteEntity},
        subscriptions::SubscriptionEntity,
        users::{RegisterUserEntity, UserEntity},
    },
    repositories::{
        errors::{RepositoryError, RepositoryResult},
        payments::{ActivationCommand, ActivationOutcome, PaymentRepository},
        plans::PlanRepository,
        posts::PostRepository,
        sites::SiteRepository,
        subscriptions::SubscriptionRepository,
        users::UserRepository,
    },
    value_objects::enums::payment_statuses::PaymentStatus,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    users: Vec<UserEntity>,
    sites: Vec<SiteEntity>,
    posts: Vec<PostEntity>,
    plans: Vec<PlanEntity>,
    payments: Vec<PaymentEntity>,
    subscriptions: Vec<SubscriptionEntity>,
}

impl Tables {
    fn insert_subscription(&mut self, subscription: SubscriptionEntity) -> RepositoryResult<()> {
        if self
            .subscriptions
            .iter()
            .any(|existing| existing.payment_id == subscription.payment_id)
        {
            return Err(RepositoryError::Conflict(
                "subscriptions_payment_id_key".to_string(),
            ));
        }
        self.subscriptions.push(subscription);
        Ok(())
    }
}

fn newest_first<T: Clone>(rows: impl DoubleEndedIterator<Item = T>, take: i64) -> Vec<T> {
    let rows = rows.rev();
    if take > 0 {
        rows.take(take as usize).collect()
    } else {
        rows.collect()
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_subscription_insert: AtomicBool,
}

impl InMemoryStore {
    pub fn monthly_plan() -> PlanEntity {
        PlanEntity {
            id: 1,
            plan_name: "Monthly".to_string(),
            amount: 500.0,
            interval: "month".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn plus_plan() -> PlanEntity {
        PlanEntity {
            id: 2,
            plan_name: "Monthly Plus".to_string(),
            amount: 1000.0,
            interval: "month".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn user(id: &str, first_name: &str, last_name: &str) -> UserEntity {
        UserEntity {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            profile_image: None,
            customer_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Users `u1` (Ada Lovelace) and `u2` (Bob Builder), plans 1 (Monthly) and 2 (Monthly Plus).
    pub fn seeded() -> Arc<Self> {
        let store = Self::default();
        {
            let mut tables = store.lock();
            tables.users.push(Self::user("u1", "Ada", "Lovelace"));
            tables.users.push(Self::user("u2", "Bob", "Builder"));
            tables.plans.push(Self::plus_plan());
            tables.plans.push(Self::monthly_plan());
        }
        Arc::new(store)
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn put_site(&self, site: InsertSiteEntity) -> Uuid {
        let site = SiteEntity::from(site);
        let id = site.id;
        self.lock().sites.push(site);
        id
    }

    pub fn put_initiated_payment(&self, pidx: &str, user_id: &str, plan_id: i32) -> Uuid {
        let now = Utc::now();
        let payment = PaymentEntity::from(InsertPaymentEntity {
            id: Uuid::now_v7(),
            pidx: pidx.to_string(),
            status: PaymentStatus::Initiated.to_string(),
            plan_id,
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        });
        let id = payment.id;
        self.lock().payments.push(payment);
        id
    }

    pub fn put_subscription(&self, subscription: SubscriptionEntity) {
        self.lock().subscriptions.push(subscription);
    }

    /// Makes the next subscription insert inside an activation fail.
    pub fn fail_next_subscription_insert(&self) {
        self.fail_subscription_insert.store(true, Ordering::SeqCst);
    }

    pub fn payment(&self, pidx: &str) -> Option<PaymentEntity> {
        self.lock().payments.iter().find(|p| p.pidx == pidx).cloned()
    }

    pub fn payment_count(&self) -> usize {
        self.lock().payments.len()
    }

    pub fn site_count(&self) -> usize {
        self.lock().sites.len()
    }

    pub fn post_count(&self) -> usize {
        self.lock().posts.len()
    }

    pub fn subscriptions_for_payment(&self, payment_id: Uuid) -> usize {
        self.lock()
            .subscriptions
            .iter()
            .filter(|s| s.payment_id == payment_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, register_user_entity: RegisterUserEntity) -> RepositoryResult<UserEntity> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.id == register_user_entity.id) {
            return Err(RepositoryError::Conflict("users_pkey".to_string()));
        }
        let user = UserEntity {
            id: register_user_entity.id,
            first_name: register_user_entity.first_name,
            last_name: register_user_entity.last_name,
            email: register_user_entity.email,
            profile_image: register_user_entity.profile_image,
            customer_id: register_user_entity.customer_id,
            created_at: register_user_entity.created_at,
            updated_at: register_user_entity.updated_at,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, user_id: String) -> RepositoryResult<Option<UserEntity>> {
        Ok(self.lock().users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn update_customer_id(&self, user_id: String, customer_id: String) -> RepositoryResult<usize> {
        let mut tables = self.lock();
        if tables
            .users
            .iter()
            .any(|u| u.id != user_id && u.customer_id.as_deref() == Some(customer_id.as_str()))
        {
            return Err(RepositoryError::Conflict("users_customer_id_key".to_string()));
        }
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.customer_id = Some(customer_id);
                user.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_user_by_customer_id(&self, customer_id: String) -> RepositoryResult<Option<UserEntity>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.customer_id.as_deref() == Some(customer_id.as_str()))
            .cloned())
    }
}

#[async_trait]
impl SiteRepository for InMemoryStore {
    async fn create_site(&self, insert_site_entity: InsertSiteEntity) -> RepositoryResult<SiteEntity> {
        let mut tables = self.lock();
        if tables
            .sites
            .iter()
            .any(|s| s.subdirectory == insert_site_entity.subdirectory)
        {
            return Err(RepositoryError::Conflict("sites_subdirectory_key".to_string()));
        }
        let site = SiteEntity::from(insert_site_entity);
        tables.sites.push(site.clone());
        Ok(site)
    }

    async fn find_site_by_id(&self, site_id: Uuid) -> RepositoryResult<Option<SiteEntity>> {
        Ok(self.lock().sites.iter().find(|s| s.id == site_id).cloned())
    }

    async fn find_site_by_subdirectory(&self, subdirectory: String) -> RepositoryResult<Option<SiteEntity>> {
        Ok(self
            .lock()
            .sites
            .iter()
            .find(|s| s.subdirectory == subdirectory)
            .cloned())
    }

    async fn list_sites_by_user_id(&self, user_id: String, take: i64) -> RepositoryResult<Vec<SiteEntity>> {
        let tables = self.lock();
        let owned = tables.sites.iter().filter(|s| s.user_id == user_id).cloned();
        Ok(newest_first(owned.collect::<Vec<_>>().into_iter(), take))
    }

    async fn update_site_image(
        &self,
        site_id: Uuid,
        user_id: String,
        image_url: String,
    ) -> RepositoryResult<usize> {
        let mut tables = self.lock();
        match tables
            .sites
            .iter_mut()
            .find(|s| s.id == site_id && s.user_id == user_id)
        {
            Some(site) => {
                site.image_url = Some(image_url);
                site.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_site(&self, site_id: Uuid, user_id: String) -> RepositoryResult<usize> {
        let mut tables = self.lock();
        let before = tables.sites.len();
        tables.sites.retain(|s| !(s.id == site_id && s.user_id == user_id));
        let affected = before - tables.sites.len();
        if affected > 0 {
            tables.posts.retain(|p| p.site_id != site_id);
        }
        Ok(affected)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list_posts_by_user_id(&self, user_id: String, take: i64) -> RepositoryResult<Vec<PostEntity>> {
        let tables = self.lock();
        let owned: Vec<_> = tables.posts.iter().filter(|p| p.user_id == user_id).cloned().collect();
        Ok(newest_first(owned.into_iter(), take))
    }

    async fn list_posts_by_user_and_site(
        &self,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<Vec<PostEntity>> {
        let tables = self.lock();
        let owned: Vec<_> = tables
            .posts
            .iter()
            .filter(|p| p.user_id == user_id && p.site_id == site_id)
            .cloned()
            .collect();
        Ok(newest_first(owned.into_iter(), 0))
    }

    async fn create_post(&self, insert_post_entity: InsertPostEntity) -> RepositoryResult<PostEntity> {
        let mut tables = self.lock();
        if tables.posts.iter().any(|p| {
            p.site_id == insert_post_entity.site_id
                && p.user_id == insert_post_entity.user_id
                && p.slug == insert_post_entity.slug
        }) {
            return Err(RepositoryError::Conflict(
                "posts_site_id_user_id_slug_key".to_string(),
            ));
        }
        let post = PostEntity::from(insert_post_entity);
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn find_post_by_slug(
        &self,
        slug: String,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<Option<PostEntity>> {
        Ok(self
            .lock()
            .posts
            .iter()
            .find(|p| p.slug == slug && p.user_id == user_id && p.site_id == site_id)
            .cloned())
    }

    async fn find_post_by_id(
        &self,
        post_id: Uuid,
        site_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<Option<PostEntity>> {
        Ok(self
            .lock()
            .posts
            .iter()
            .find(|p| p.id == post_id && p.site_id == site_id && p.user_id == user_id)
            .cloned())
    }

    async fn edit_post(
        &self,
        edit_post_entity: EditPostEntity,
        post_id: Uuid,
        user_id: String,
        site_id: Uuid,
    ) -> RepositoryResult<usize> {
        let mut tables = self.lock();
        if let Some(slug) = &edit_post_entity.slug {
            if tables.posts.iter().any(|p| {
                p.id != post_id && p.site_id == site_id && p.user_id == user_id && &p.slug == slug
            }) {
                return Err(RepositoryError::Conflict(
                    "posts_site_id_user_id_slug_key".to_string(),
                ));
            }
        }
        let Some(post) = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post_id && p.site_id == site_id && p.user_id == user_id)
        else {
            return Ok(0);
        };

        let EditPostEntity {
            title,
            article_content,
            small_description,
            image,
            slug,
            updated_at,
        } = edit_post_entity;
        if let Some(title) = title {
            post.title = title;
        }
        if let Some(article_content) = article_content {
            post.article_content = article_content;
        }
        if small_description.is_some() {
            post.small_description = small_description;
        }
        if image.is_some() {
            post.image = image;
        }
        if let Some(slug) = slug {
            post.slug = slug;
        }
        post.updated_at = updated_at;
        Ok(1)
    }

    async fn delete_post(&self, post_id: Uuid, site_id: Uuid, user_id: String) -> RepositoryResult<usize> {
        let mut tables = self.lock();
        let before = tables.posts.len();
        tables
            .posts
            .retain(|p| !(p.id == post_id && p.site_id == site_id && p.user_id == user_id));
        Ok(before - tables.posts.len())
    }

    async fn list_site_posts_by_subdirectory(&self, subdirectory: String) -> RepositoryResult<Vec<PostEntity>> {
        let tables = self.lock();
        let Some(site) = tables.sites.iter().find(|s| s.subdirectory == subdirectory) else {
            return Ok(Vec::new());
        };
        let posts: Vec<_> = tables
            .posts
            .iter()
            .filter(|p| p.site_id == site.id)
            .cloned()
            .collect();
        Ok(newest_first(posts.into_iter(), 0))
    }

    async fn find_site_post_by_slug(
        &self,
        subdirectory: String,
        slug: String,
    ) -> RepositoryResult<Option<PostEntity>> {
        let tables = self.lock();
        let Some(site) = tables.sites.iter().find(|s| s.subdirectory == subdirectory) else {
            return Ok(None);
        };
        Ok(tables
            .posts
            .iter()
            .find(|p| p.site_id == site.id && p.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl PlanRepository for InMemoryStore {
    async fn find_plan_by_id(&self, plan_id: i32) -> RepositoryResult<Option<PlanEntity>> {
        Ok(self.lock().plans.iter().find(|p| p.id == plan_id).cloned())
    }

    async fn list_plans(&self) -> RepositoryResult<Vec<PlanEntity>> {
        let mut plans = self.lock().plans.clone();
        plans.sort_by(|a, b| a.amount.total_cmp(&b.amount).then(a.id.cmp(&b.id)));
        Ok(plans)
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn insert_payment(&self, insert_payment_entity: InsertPaymentEntity) -> RepositoryResult<PaymentEntity> {
        let mut tables = self.lock();
        if tables.payments.iter().any(|p| p.pidx == insert_payment_entity.pidx) {
            return Err(RepositoryError::Conflict("payments_pidx_key".to_string()));
        }
        let payment = PaymentEntity::from(insert_payment_entity);
        tables.payments.push(payment.clone());
        Ok(payment)
    }

    async fn find_payment_by_pidx(&self, pidx: String) -> RepositoryResult<Option<PaymentEntity>> {
        Ok(self.payment(&pidx))
    }

    /// Works on a copy of the tables and swaps it in only on success, which
    /// gives the same all-or-nothing result as the SQL transaction.
    async fn activate_subscription(
        &self,
        activation_command: ActivationCommand,
    ) -> RepositoryResult<ActivationOutcome> {
        let mut tables = self.lock();
        let mut draft = tables.clone();

        let Some(payment) = draft.payments.iter_mut().find(|p| {
            p.pidx == activation_command.pidx && p.user_id == activation_command.user_id
        }) else {
            return Ok(ActivationOutcome::PaymentNotFound);
        };

        let current = PaymentStatus::from_stored(&payment.status)
            .ok_or_else(|| RepositoryError::Store(anyhow!("unknown payment status")))?;
        if current.is_settled() {
            return Ok(ActivationOutcome::AlreadySettled(current));
        }
        if payment.plan_id != activation_command.plan_id {
            return Ok(ActivationOutcome::PlanMismatch {
                initiated_plan_id: payment.plan_id,
            });
        }

        payment.status = activation_command.status.to_string();
        payment.transaction_id = Some(activation_command.transaction_id.clone());
        payment.amount = Some(activation_command.amount);
        payment.total_amount = Some(activation_command.total_amount);
        payment.mobile = Some(activation_command.mobile.clone());
        payment.updated_at = Utc::now();
        let payment_id = payment.id;

        let outcome = match activation_command.status {
            PaymentStatus::Completed => {
                if self.fail_subscription_insert.swap(false, Ordering::SeqCst) {
                    return Err(RepositoryError::Store(anyhow!(
                        "injected subscription insert failure"
                    )));
                }
                let subscription = activation_command.subscription_for(payment_id);
                draft.insert_subscription(subscription.clone())?;
                ActivationOutcome::Activated(subscription)
            }
            _ => ActivationOutcome::Declined(payment_id),
        };

        *tables = draft;
        Ok(outcome)
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn find_latest_subscription_by_user_id(
        &self,
        user_id: String,
    ) -> RepositoryResult<Option<SubscriptionEntity>> {
        Ok(self
            .lock()
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| s.end_date)
            .cloned())
    }

    async fn find_subscription_by_id(
        &self,
        subscription_id: Uuid,
        user_id: String,
    ) -> RepositoryResult<Option<SubscriptionEntity>> {
        Ok(self
            .lock()
            .subscriptions
            .iter()
            .find(|s| s.id == subscription_id && s.user_id == user_id)
            .cloned())
    }
}
