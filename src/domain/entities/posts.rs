use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::posts;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = posts)]
pub struct PostEntity {
    pub id: Uuid,
    pub title: String,
    pub article_content: Value,
    pub small_description: Option<String>,
    pub image: Option<String>,
    pub slug: String,
    pub site_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = posts)]
pub struct InsertPostEntity {
    pub id: Uuid,
    pub title: String,
    pub article_content: Value,
    pub small_description: Option<String>,
    pub image: Option<String>,
    pub slug: String,
    pub site_id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InsertPostEntity> for PostEntity {
    fn from(value: InsertPostEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            article_content: value.article_content,
            small_description: value.small_description,
            image: value.image,
            slug: value.slug,
            site_id: value.site_id,
            user_id: value.user_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// `None` fields are left untouched by the update.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = posts)]
pub struct EditPostEntity {
    pub title: Option<String>,
    pub article_content: Option<Value>,
    pub small_description: Option<String>,
    pub image: Option<String>,
    pub slug: Option<String>,
    pub updated_at: DateTime<Utc>,
}
