//! Categories and tags.
//!
//! Both are flat name registries with generated slugs. Categories refuse
//! deletion while any post still references them; tags delete freely and
//! rely on the join table's cascade.

use crate::datetime::{day_after, day_start};
use crate::error::ApiError;
use crate::orm::{blog_categories, blog_post_categories, blog_post_tags, blog_posts, blog_tags};
use crate::pagination::{fetch_page, Page, PageRequest};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct TaxonomyFilters {
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Slug from a display name: alphanumerics kept and lowercased, every
/// other run collapsed to a single hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    slug
}

pub async fn list_categories<C: ConnectionTrait>(
    conn: &C,
    filters: &TaxonomyFilters,
    page: PageRequest,
) -> Result<Page<blog_categories::Model>, ApiError> {
    let mut query = blog_categories::Entity::find()
        .order_by_desc(blog_categories::Column::UpdatedAt);

    if let Some(term) = &filters.search {
        query = query.filter(
            Condition::any()
                .add(blog_categories::Column::NameTh.contains(term))
                .add(blog_categories::Column::NameEn.contains(term)),
        );
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_categories::Column::CreatedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_categories::Column::CreatedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

async fn category_name_taken<C: ConnectionTrait>(
    conn: &C,
    name_th: &str,
    name_en: &str,
    exclude_id: Option<&str>,
) -> Result<bool, ApiError> {
    let mut query = blog_categories::Entity::find().filter(
        Condition::any()
            .add(blog_categories::Column::NameTh.eq(name_th))
            .add(blog_categories::Column::NameEn.eq(name_en)),
    );
    if let Some(id) = exclude_id {
        query = query.filter(blog_categories::Column::Id.ne(id));
    }
    Ok(query.one(conn).await?.is_some())
}

pub async fn create_category(
    db: &DatabaseConnection,
    name_th: &str,
    name_en: &str,
) -> Result<blog_categories::Model, ApiError> {
    if category_name_taken(db, name_th, name_en, None).await? {
        return Err(ApiError::Validation(
            "Category name already exists.".to_owned(),
        ));
    }

    let now = Utc::now();
    let category = blog_categories::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name_th: Set(name_th.to_owned()),
        name_en: Set(name_en.to_owned()),
        slug: Set(slugify(name_en)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(category)
}

pub async fn update_category(
    db: &DatabaseConnection,
    id: &str,
    name_th: &str,
    name_en: &str,
) -> Result<blog_categories::Model, ApiError> {
    let category = blog_categories::Entity::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found.".to_owned()))?;

    if category_name_taken(db, name_th, name_en, Some(id)).await? {
        return Err(ApiError::Validation(
            "Category name already exists.".to_owned(),
        ));
    }

    let mut active: blog_categories::ActiveModel = category.into();
    active.name_th = Set(name_th.to_owned());
    active.name_en = Set(name_en.to_owned());
    active.slug = Set(slugify(name_en));
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Delete a category only while no post links to it. The reference check
/// is folded into the DELETE itself so a link created between check and
/// delete still blocks the removal.
pub async fn delete_category(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    let exists = blog_categories::Entity::find_by_id(id.to_owned())
        .one(db)
        .await?
        .is_some();
    if !exists {
        return Err(ApiError::NotFound("Category not found.".to_owned()));
    }

    let referenced = Query::select()
        .expr(Expr::val(1))
        .from(blog_post_categories::Entity)
        .and_where(Expr::col(blog_post_categories::Column::CategoryId).eq(id))
        .to_owned();

    let result = blog_categories::Entity::delete_many()
        .filter(blog_categories::Column::Id.eq(id))
        .filter(Condition::all().add(Expr::exists(referenced)).not())
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::PreconditionFailed(
            "Cannot delete category because it is linked to blog posts.".to_owned(),
        ));
    }
    Ok(())
}

/// Active posts under a category, most recently updated first.
pub async fn category_posts<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    page: PageRequest,
) -> Result<Page<blog_posts::Model>, ApiError> {
    let exists = blog_categories::Entity::find_by_id(id.to_owned())
        .one(conn)
        .await?
        .is_some();
    if !exists {
        return Err(ApiError::NotFound("Category not found.".to_owned()));
    }

    let member_posts = Query::select()
        .column(blog_post_categories::Column::PostId)
        .from(blog_post_categories::Entity)
        .and_where(Expr::col(blog_post_categories::Column::CategoryId).eq(id))
        .to_owned();

    let query = blog_posts::Entity::find()
        .filter(blog_posts::Column::Id.in_subquery(member_posts))
        .filter(blog_posts::Column::DeletedAt.is_null())
        .order_by_desc(blog_posts::Column::UpdatedAt);

    Ok(fetch_page(conn, query, page).await?)
}

pub async fn list_tags<C: ConnectionTrait>(
    conn: &C,
    filters: &TaxonomyFilters,
    page: PageRequest,
) -> Result<Page<blog_tags::Model>, ApiError> {
    let mut query = blog_tags::Entity::find().order_by_desc(blog_tags::Column::UpdatedAt);

    if let Some(term) = &filters.search {
        query = query.filter(
            Condition::any()
                .add(blog_tags::Column::NameTh.contains(term))
                .add(blog_tags::Column::NameEn.contains(term)),
        );
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_tags::Column::CreatedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_tags::Column::CreatedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

async fn tag_name_taken<C: ConnectionTrait>(
    conn: &C,
    name_th: &str,
    name_en: &str,
    exclude_id: Option<&str>,
) -> Result<bool, ApiError> {
    let mut query = blog_tags::Entity::find().filter(
        Condition::any()
            .add(blog_tags::Column::NameTh.eq(name_th))
            .add(blog_tags::Column::NameEn.eq(name_en)),
    );
    if let Some(id) = exclude_id {
        query = query.filter(blog_tags::Column::Id.ne(id));
    }
    Ok(query.one(conn).await?.is_some())
}

pub async fn create_tag(
    db: &DatabaseConnection,
    name_th: &str,
    name_en: &str,
) -> Result<blog_tags::Model, ApiError> {
    if tag_name_taken(db, name_th, name_en, None).await? {
        return Err(ApiError::Validation("Tag name already exists.".to_owned()));
    }

    let now = Utc::now();
    let tag = blog_tags::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name_th: Set(name_th.to_owned()),
        name_en: Set(name_en.to_owned()),
        slug: Set(slugify(name_en)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    Ok(tag)
}

pub async fn update_tag(
    db: &DatabaseConnection,
    id: &str,
    name_th: &str,
    name_en: &str,
) -> Result<blog_tags::Model, ApiError> {
    let tag = blog_tags::Entity::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tag not found.".to_owned()))?;

    if tag_name_taken(db, name_th, name_en, Some(id)).await? {
        return Err(ApiError::Validation("Tag name already exists.".to_owned()));
    }

    let mut active: blog_tags::ActiveModel = tag.into();
    active.name_th = Set(name_th.to_owned());
    active.name_en = Set(name_en.to_owned());
    active.slug = Set(slugify(name_en));
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Tags delete unconditionally; post links go with them via cascade.
pub async fn delete_tag(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    let result = blog_tags::Entity::delete_by_id(id.to_owned()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Tag not found.".to_owned()));
    }
    Ok(())
}

/// Active posts carrying a tag, most recently updated first.
pub async fn tag_posts<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    page: PageRequest,
) -> Result<Page<blog_posts::Model>, ApiError> {
    let exists = blog_tags::Entity::find_by_id(id.to_owned())
        .one(conn)
        .await?
        .is_some();
    if !exists {
        return Err(ApiError::NotFound("Tag not found.".to_owned()));
    }

    let member_posts = Query::select()
        .column(blog_post_tags::Column::PostId)
        .from(blog_post_tags::Entity)
        .and_where(Expr::col(blog_post_tags::Column::TagId).eq(id))
        .to_owned();

    let query = blog_posts::Entity::find()
        .filter(blog_posts::Column::Id.in_subquery(member_posts))
        .filter(blog_posts::Column::DeletedAt.is_null())
        .order_by_desc(blog_posts::Column::UpdatedAt);

    Ok(fetch_page(conn, query, page).await?)
}
