//! SeaORM entity for the blog_activity_logs table.
//!
//! Append-only: rows are written inside the transaction of the mutation
//! they describe and are never updated or deleted. The subject references
//! use SET NULL so the trail outlives permanent deletion of its subject.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    #[sea_orm(string_value = "created")]
    Created,
    #[sea_orm(string_value = "updated")]
    Updated,
    #[sea_orm(string_value = "deleted")]
    Deleted,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "permanently_deleted")]
    PermanentlyDeleted,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "blog_activity_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Actor attributed with the mutation. Always present.
    pub user_id: i64,
    pub post_id: Option<String>,
    pub article_id: Option<String>,
    pub action: LogAction,
    /// Opaque structured payload; only readers interpret its shape.
    #[sea_orm(column_type = "Json", nullable)]
    pub details: Option<Json>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blog_posts::Entity",
        from = "Column::PostId",
        to = "super::blog_posts::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::blog_articles::Entity",
        from = "Column::ArticleId",
        to = "super::blog_articles::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Article,
}

impl Related<super::blog_posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::blog_articles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
