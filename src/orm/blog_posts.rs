//! SeaORM entity for the blog_posts table.
//!
//! Soft deletion is a nullable `deleted_at`; rows with it set only surface
//! through the trashed scope until they are permanently removed. Actor
//! columns (`*_by`) hold upstream user ids, resolved to profiles at
//! response time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

impl Default for PublishStatus {
    fn default() -> Self {
        Self::Draft
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title_th: Option<String>,
    pub title_en: Option<String>,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub content_th: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub content_en: Option<Json>,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary_th: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary_en: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub cover_image: Option<Json>,
    pub status: PublishStatus,
    pub published_by: Option<i64>,
    pub published_at: Option<DateTimeUtc>,
    pub locked_by: Option<i64>,
    pub locked_at: Option<DateTimeUtc>,
    pub created_by: i64,
    pub updated_by: Option<i64>,
    pub deleted_by: Option<i64>,
    pub deleted_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
