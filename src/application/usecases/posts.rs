use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::{
    application::{
        usecases::errors::{UseCaseError, UseCaseResult},
        validation::PayloadValidator,
    },
    domain::{
        entities::sites::SiteEntity,
        repositories::{posts::PostRepository, sites::SiteRepository},
        value_objects::{
            iam::CallerId,
            posts::{
                CreatePostPayload, EditPostPayload, PostDto, PostSummaryDto, PublicSiteFeedDto,
                SitePostsDto,
            },
            sites::{SiteNameDto, SiteSubdirectoryDto},
        },
    },
};

const SLUG_TAKEN: &str = "slug already used on this site";

pub struct PostUseCase<S, P>
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    site_repo: Arc<S>,
    post_repo: Arc<P>,
    validator: Arc<PayloadValidator>,
}

impl<S, P> PostUseCase<S, P>
where
    S: SiteRepository + Send + Sync + 'static,
    P: PostRepository + Send + Sync + 'static,
{
    pub fn new(site_repo: Arc<S>, post_repo: Arc<P>, validator: Arc<PayloadValidator>) -> Self {
        Self {
            site_repo,
            post_repo,
            validator,
        }
    }

    /// Sites owned by someone else are reported exactly like missing ones.
    async fn owned_site(&self, site_id: Uuid, caller: &CallerId) -> UseCaseResult<SiteEntity> {
        let site = self
            .site_repo
            .find_site_by_id(site_id)
            .await
            .map_err(|err| {
                error!(%site_id, user_id = %caller, db_error = ?err, "posts: failed to load site");
                UseCaseError::from(err)
            })?;

        match site {
            Some(site) if site.user_id == caller.as_str() => Ok(site),
            _ => Err(UseCaseError::not_found("site")),
        }
    }

    pub async fn create_post(
        &self,
        payload: CreatePostPayload,
        caller: &CallerId,
        site_id: Uuid,
    ) -> UseCaseResult<PostDto> {
        self.validator.validate(&payload)?;
        self.owned_site(site_id, caller).await?;

        let post = self
            .post_repo
            .create_post(payload.to_entity(caller, site_id))
            .await
            .map_err(|err| {
                error!(
                    %site_id,
                    user_id = %caller,
                    slug = %payload.slug,
                    db_error = ?err,
                    "posts: failed to create post"
                );
                UseCaseError::from_repository(err, SLUG_TAKEN)
            })?;

        info!(%site_id, user_id = %caller, post_id = %post.id, "posts: post created");
        Ok(PostDto::from(post))
    }

    pub async fn list_posts_by_user(
        &self,
        caller: &CallerId,
        take: Option<i64>,
    ) -> UseCaseResult<Vec<PostDto>> {
        let take = self.validator.take(take)?;

        let posts = self
            .post_repo
            .list_posts_by_user_id(caller.as_str().to_string(), take)
            .await
            .map_err(|err| {
                error!(user_id = %caller, db_error = ?err, "posts: failed to list posts");
                UseCaseError::from(err)
            })?;

        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    pub async fn list_posts_by_site(
        &self,
        caller: &CallerId,
        site_id: Uuid,
    ) -> UseCaseResult<SitePostsDto> {
        let site = self.owned_site(site_id, caller).await?;

        let posts = self
            .post_repo
            .list_posts_by_user_and_site(caller.as_str().to_string(), site_id)
            .await
            .map_err(|err| {
                error!(%site_id, user_id = %caller, db_error = ?err, "posts: failed to list site posts");
                UseCaseError::from(err)
            })?;

        Ok(SitePostsDto {
            posts: posts.into_iter().map(PostSummaryDto::from).collect(),
            site: SiteSubdirectoryDto {
                id: site.id,
                subdirectory: site.subdirectory,
            },
        })
    }

    pub async fn get_post_by_id(
        &self,
        post_id: Uuid,
        site_id: Uuid,
        caller: &CallerId,
    ) -> UseCaseResult<PostDto> {
        let post = self
            .post_repo
            .find_post_by_id(post_id, site_id, caller.as_str().to_string())
            .await
            .map_err(|err| {
                error!(%post_id, %site_id, user_id = %caller, db_error = ?err, "posts: failed to load post");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("post"))?;

        Ok(PostDto::from(post))
    }

    pub async fn get_post_by_slug(
        &self,
        slug: String,
        site_id: Uuid,
        caller: &CallerId,
    ) -> UseCaseResult<PostDto> {
        let post = self
            .post_repo
            .find_post_by_slug(slug.clone(), caller.as_str().to_string(), site_id)
            .await
            .map_err(|err| {
                error!(%slug, %site_id, user_id = %caller, db_error = ?err, "posts: failed to load post");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("post"))?;

        Ok(PostDto::from(post))
    }

    pub async fn edit_post(
        &self,
        payload: EditPostPayload,
        post_id: Uuid,
        caller: &CallerId,
        site_id: Uuid,
    ) -> UseCaseResult<()> {
        self.validator.validate(&payload)?;

        let affected = self
            .post_repo
            .edit_post(payload.to_entity(), post_id, caller.as_str().to_string(), site_id)
            .await
            .map_err(|err| {
                error!(%post_id, %site_id, user_id = %caller, db_error = ?err, "posts: failed to edit post");
                UseCaseError::from_repository(err, SLUG_TAKEN)
            })?;

        if affected == 0 {
            return Err(UseCaseError::not_found("post"));
        }
        Ok(())
    }

    pub async fn delete_post(
        &self,
        post_id: Uuid,
        site_id: Uuid,
        caller: &CallerId,
    ) -> UseCaseResult<()> {
        let affected = self
            .post_repo
            .delete_post(post_id, site_id, caller.as_str().to_string())
            .await
            .map_err(|err| {
                error!(%post_id, %site_id, user_id = %caller, db_error = ?err, "posts: failed to delete post");
                UseCaseError::from(err)
            })?;

        if affected == 0 {
            return Err(UseCaseError::not_found("post"));
        }

        info!(%post_id, %site_id, user_id = %caller, "posts: post deleted");
        Ok(())
    }

    pub async fn get_site_posts(&self, subdirectory: String) -> UseCaseResult<PublicSiteFeedDto> {
        let site = self
            .site_repo
            .find_site_by_subdirectory(subdirectory.clone())
            .await
            .map_err(|err| {
                error!(%subdirectory, db_error = ?err, "posts: failed to load public site");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("site"))?;

        let posts = self
            .post_repo
            .list_site_posts_by_subdirectory(subdirectory.clone())
            .await
            .map_err(|err| {
                error!(%subdirectory, db_error = ?err, "posts: failed to list public posts");
                UseCaseError::from(err)
            })?;

        Ok(PublicSiteFeedDto {
            site: SiteNameDto {
                id: site.id,
                name: site.name,
            },
            posts: posts.into_iter().map(PostDto::from).collect(),
        })
    }

    pub async fn get_site_post_by_slug(
        &self,
        subdirectory: String,
        slug: String,
    ) -> UseCaseResult<PostDto> {
        let post = self
            .post_repo
            .find_site_post_by_slug(subdirectory.clone(), slug.clone())
            .await
            .map_err(|err| {
                error!(%subdirectory, %slug, db_error = ?err, "posts: failed to load public post");
                UseCaseError::from(err)
            })?
            .ok_or_else(|| UseCaseError::not_found("post"))?;

        Ok(PostDto::from(post))
    }
}
