use std::sync::Arc;

use tracing::{error, info};

use crate::{
    application::{
        usecases::errors::{UseCaseError, UseCaseResult},
        validation::PayloadValidator,
    },
    domain::{
        repositories::users::UserRepository,
        value_objects::iam::{
            CallerId, CreateUserPayload, CustomerIdDto, UpdateCustomerIdPayload, UserDto,
        },
    },
};

pub struct UserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    validator: Arc<PayloadValidator>,
}

impl<U> UserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, validator: Arc<PayloadValidator>) -> Self {
        Self {
            user_repo,
            validator,
        }
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> UseCaseResult<UserDto> {
        self.validator.validate(&payload)?;

        let user_id = payload.id.clone();
        let user = self
            .user_repo
            .create_user(payload.to_entity())
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "users: failed to create user");
                UseCaseError::from_repository(err, "user already exists")
            })?;

        info!(%user_id, "users: user created");
        Ok(UserDto::from(user))
    }

    pub async fn get_user_by_id(&self, user_id: String) -> UseCaseResult<UserDto> {
        let user = self
            .user_repo
            .find_user_by_id(user_id.clone())
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "users: failed to load user");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("user"))?;

        Ok(UserDto::from(user))
    }

    /// Callers may only attach a billing reference to themselves.
    pub async fn update_customer_id(
        &self,
        caller: &CallerId,
        user_id: String,
        payload: UpdateCustomerIdPayload,
    ) -> UseCaseResult<CustomerIdDto> {
        self.validator.validate(&payload)?;

        if caller.as_str() != user_id {
            return Err(UseCaseError::not_found("user"));
        }

        let affected = self
            .user_repo
            .update_customer_id(user_id.clone(), payload.customer_id.clone())
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "users: failed to update customer id");
                UseCaseError::from_repository(err, "customer id already linked to another user")
            })?;

        if affected == 0 {
            return Err(UseCaseError::not_found("user"));
        }

        info!(%user_id, "users: customer id updated");
        Ok(CustomerIdDto {
            customer_id: payload.customer_id,
        })
    }

    pub async fn get_customer_by_id(&self, customer_id: String) -> UseCaseResult<UserDto> {
        let user = self
            .user_repo
            .find_user_by_customer_id(customer_id.clone())
            .await
            .map_err(|err| {
                error!(%customer_id, db_error = ?err, "users: failed to load customer");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("customer"))?;

        Ok(UserDto::from(user))
    }
}
