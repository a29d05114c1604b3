//! SeaORM entity for the blog_articles table.
//!
//! Same shape and lifecycle as blog_posts; articles are the long-form
//! editorial surface and additionally link to bylined authors.

use sea_orm::entity::prelude::*;
use serde::Serialize;

pub use super::blog_posts::PublishStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "blog_articles")]
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
