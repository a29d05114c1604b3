//! SeaORM entity for the blog_authors table.
//!
//! Authors are display bylines, not platform users; they carry no actor-id
//! columns and no soft-delete lifecycle.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "blog_authors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name_th: String,
    #[sea_orm(unique)]
    pub name_en: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub profile_image: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
