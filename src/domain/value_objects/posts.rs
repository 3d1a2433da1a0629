use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    entities::posts::{EditPostEntity, InsertPostEntity, PostEntity},
    value_objects::{
        iam::CallerId,
        sites::{SiteNameDto, SiteSubdirectoryDto},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostPayload {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub article_content: Value,
    #[serde(default)]
    pub small_description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[validate(length(min = 1, max = 255, message = "slug is required"))]
    pub slug: String,
}

impl CreatePostPayload {
    pub fn to_entity(&self, caller: &CallerId, site_id: Uuid) -> InsertPostEntity {
        let now = Utc::now();
        InsertPostEntity {
            id: Uuid::now_v7(),
            title: self.title.clone(),
            article_content: self.article_content.clone(),
            small_description: self.small_description.clone(),
            image: self.image.clone(),
            slug: self.slug.clone(),
            site_id,
            user_id: caller.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EditPostPayload {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub article_content: Option<Value>,
    pub small_description: Option<String>,
    pub image: Option<String>,
    #[validate(length(min = 1, max = 255, message = "slug must not be empty"))]
    pub slug: Option<String>,
}

impl EditPostPayload {
    pub fn to_entity(&self) -> EditPostEntity {
        EditPostEntity {
            title: self.title.clone(),
            article_content: self.article_content.clone(),
            small_description: self.small_description.clone(),
            image: self.image.clone(),
            slug: self.slug.clone(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostDto {
    pub id: Uuid,
    pub title: String,
    pub article_content: Value,
    pub small_description: Option<String>,
    pub image: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    pub site_id: Uuid,
}

impl From<PostEntity> for PostDto {
    fn from(value: PostEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            article_content: value.article_content,
            small_description: value.small_description,
            image: value.image,
            slug: value.slug,
            created_at: value.created_at,
            updated_at: value.updated_at,
            user_id: value.user_id,
            site_id: value.site_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PostEntity> for PostSummaryDto {
    fn from(value: PostEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            image: value.image,
            created_at: value.created_at,
        }
    }
}

/// Owner view of one site and its posts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SitePostsDto {
    pub posts: Vec<PostSummaryDto>,
    pub site: SiteSubdirectoryDto,
}

/// Public feed of a site, addressed by subdirectory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicSiteFeedDto {
    pub site: SiteNameDto,
    pub posts: Vec<PostDto>,
}
