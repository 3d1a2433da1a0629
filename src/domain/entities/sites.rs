use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::sites;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = sites)]
pub struct SiteEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub subdirectory: String,
    pub image_url: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = sites)]
pub struct InsertSiteEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub subdirectory: String,
    pub image_url: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InsertSiteEntity> for SiteEntity {
    fn from(value: InsertSiteEntity) -> Self {
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
