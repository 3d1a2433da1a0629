use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{
    entities::sites::{InsertSiteEntity, SiteEntity},
    value_objects::iam::CallerId,
};

pub const SUBDIRECTORY_MAX_LEN: usize = 63;

/// Subdirectories become URL path segments: lowercase ASCII, digits and `-`.
pub fn validate_subdirectory(value: &str) -> Result<(), ValidationError> {
    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if value.is_empty() || value.len() > SUBDIRECTORY_MAX_LEN || !valid_chars {
        let mut err = ValidationError::new("subdirectory");
        err.message = Some("subdirectory must be 1-63 characters of [a-z0-9-]".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSitePayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validate_subdirectory"))]
    pub subdirectory: String,
    #[serde(default)]
    #[validate(url(message = "image_url must be a valid url"))]
    pub image_url: Option<String>,
}

impl CreateSitePayload {
    pub fn to_entity(&self, caller: &CallerId) -> InsertSiteEntity {
        let now = Utc::now();
        InsertSiteEntity {
            id: Uuid::now_v7(),
            name: self.name.clone(),
            description: self.description.clone(),
            subdirectory: self.subdirectory.clone(),
            image_url: self.image_url.clone(),
            user_id: caller.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSiteImagePayload {
    #[validate(url(message = "image_url must be a valid url"))]
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub subdirectory: String,
    pub image_url: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SiteEntity> for SiteDto {
    fn from(value: SiteEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            subdirectory: value.subdirectory,
            image_url: value.image_url,
            user_id: value.user_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteNameDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteSubdirectoryDto {
    pub id: Uuid,
    pub subdirectory: String,
}
