//! Blog author registry.
//!
//! Authors are editorial bylines managed by staff; they have no lifecycle
//! beyond plain create/update/delete and no activity logging.

use crate::datetime::{day_after, day_start};
use crate::error::ApiError;
use crate::orm::blog_authors;
use crate::pagination::{fetch_page, Page, PageRequest};
use chrono::{NaiveDate, Utc};
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct AuthorFilters {
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Authors, newest first. The name search spans both languages.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filters: &AuthorFilters,
    page: PageRequest,
) -> Result<Page<blog_authors::Model>, ApiError> {
    let mut query =
        blog_authors::Entity::find().order_by_desc(blog_authors::Column::CreatedAt);

    if let Some(term) = &filters.search {
        query = query.filter(
            Condition::any()
                .add(blog_authors::Column::NameTh.contains(term))
                .add(blog_authors::Column::NameEn.contains(term)),
        );
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_authors::Column::CreatedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_authors::Column::CreatedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

pub async fn create(
    db: &DatabaseConnection,
    name_th: &str,
    name_en: &str,
    profile_image: Option<serde_json::Value>,
) -> Result<blog_authors::Model, ApiError> {
    let now = Utc::now();
    let author = blog_authors::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name_th: Set(name_th.trim().to_owned()),
        name_en: Set(name_en.trim().to_owned()),
        profile_image: Set(profile_image),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(author)
}

/// Update names and, when given, the profile image. An absent image in
/// the payload leaves the stored one alone.
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    name_th: &str,
    name_en: &str,
    profile_image: Option<serde_json::Value>,
) -> Result<blog_authors::Model, ApiError> {
    let author = blog_authors::Entity::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Author not found.".to_owned()))?;

    let mut active: blog_authors::ActiveModel = author.into();
    active.name_th = Set(name_th.trim().to_owned());
    active.name_en = Set(name_en.trim().to_owned());
    if let Some(image) = profile_image {
        active.profile_image = Set(Some(image));
    }
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    let result = blog_authors::Entity::delete_by_id(id.to_owned())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Author not found.".to_owned()));
    }
    Ok(())
}
