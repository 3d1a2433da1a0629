use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::{
    application::{
        usecases::errors::{UseCaseError, UseCaseResult},
        validation::PayloadValidator,
    },
    domain::{
        repositories::sites::SiteRepository,
        value_objects::{
            iam::CallerId,
            sites::{CreateSitePayload, SiteDto, UpdateSiteImagePayload},
        },
    },
};

pub struct SiteUseCase<S>
where
    S: SiteRepository + Send + Sync + 'static,
{
    site_repo: Arc<S>,
    validator: Arc<PayloadValidator>,
}

impl<S> SiteUseCase<S>
where
    S: SiteRepository + Send + Sync + 'static,
{
    pub fn new(site_repo: Arc<S>, validator: Arc<PayloadValidator>) -> Self {
        Self {
            site_repo,
            validator,
        }
    }

    pub async fn create_site(
        &self,
        payload: CreateSitePayload,
        caller: &CallerId,
    ) -> UseCaseResult<SiteDto> {
        self.validator.validate(&payload)?;

        let subdirectory = payload.subdirectory.clone();
        let site = self
            .site_repo
            .create_site(payload.to_entity(caller))
            .await
            .map_err(|err| {
                error!(
                    user_id = %caller,
                    %subdirectory,
                    db_error = ?err,
                    "sites: failed to create site"
                );
                UseCaseError::from_repository(err, "subdirectory already taken")
            })?;

        info!(user_id = %caller, site_id = %site.id, %subdirectory, "sites: site created");
        Ok(SiteDto::from(site))
    }

    pub async fn list_sites(
        &self,
        caller: &CallerId,
        take: Option<i64>,
    ) -> UseCaseResult<Vec<SiteDto>> {
        let take = self.validator.take(take)?;

        let sites = self
            .site_repo
            .list_sites_by_user_id(caller.as_str().to_string(), take)
            .await
            .map_err(|err| {
                error!(user_id = %caller, db_error = ?err, "sites: failed to list sites");
                UseCaseError::from(err)
            })?;

        Ok(sites.into_iter().map(SiteDto::from).collect())
    }

    pub async fn get_site_by_subdirectory(&self, subdirectory: String) -> UseCaseResult<SiteDto> {
        let site = self
            .site_repo
            .find_site_by_subdirectory(subdirectory.clone())
            .await
            .map_err(|err| {
                error!(%subdirectory, db_error = ?err, "sites: failed to load site");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("site"))?;

        Ok(SiteDto::from(site))
    }

    pub async fn update_site_image(
        &self,
        site_id: Uuid,
        caller: &CallerId,
        payload: UpdateSiteImagePayload,
    ) -> UseCaseResult<()> {
        self.validator.validate(&payload)?;

        let affected = self
            .site_repo
            .update_site_image(site_id, caller.as_str().to_string(), payload.image_url)
            .await
            .map_err(|err| {
                error!(%site_id, user_id = %caller, db_error = ?err, "sites: failed to update image");
                UseCaseError::from(err)
            })?;

        if affected == 0 {
            return Err(UseCaseError::not_found("site"));
        }
        Ok(())
    }

    pub async fn delete_site(&self, site_id: Uuid, caller: &CallerId) -> UseCaseResult<()> {
        let affected = self
            .site_repo
            .delete_site(site_id, caller.as_str().to_string())
            .await
            .map_err(|err| {
                error!(%site_id, user_id = %caller, db_error = ?err, "sites: failed to delete site");
                UseCaseError::from(err)
            })?;

        if affected == 0 {
            return Err(UseCaseError::not_found("site"));
        }

        info!(%site_id, user_id = %caller, "sites: site deleted");
        Ok(())
    }
}
