//! Blog article lifecycle.
//!
//! Articles share the posts' shape and rules but live in their own table
//! and log under their own subject column, so the two content types keep
//! independent audit trails.

use crate::activity_log::{self, Subject};
use crate::datetime::{day_after, day_start};
use crate::error::ApiError;
use crate::orm::blog_activity_logs::LogAction;
use crate::orm::blog_articles::{self, PublishStatus};
use crate::pagination::{fetch_page, Page, PageRequest};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct ArticleFilters {
    pub search: Option<String>,
    pub status: Option<PublishStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn search_condition(term: &str) -> Condition {
    Condition::any()
        .add(blog_articles::Column::TitleTh.contains(term))
        .add(blog_articles::Column::TitleEn.contains(term))
        .add(blog_articles::Column::SummaryTh.contains(term))
        .add(blog_articles::Column::SummaryEn.contains(term))
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filters: &ArticleFilters,
    page: PageRequest,
) -> Result<Page<blog_articles::Model>, ApiError> {
    let mut query = blog_articles::Entity::find()
        .filter(blog_articles::Column::DeletedAt.is_null())
        .order_by_desc(blog_articles::Column::UpdatedAt);

    if let Some(term) = &filters.search {
        query = query.filter(search_condition(term));
    }
    if let Some(status) = &filters.status {
        query = query.filter(blog_articles::Column::Status.eq(status.clone()));
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_articles::Column::CreatedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_articles::Column::CreatedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

pub async fn list_trashed<C: ConnectionTrait>(
    conn: &C,
    filters: &ArticleFilters,
    page: PageRequest,
) -> Result<Page<blog_articles::Model>, ApiError> {
    let mut query = blog_articles::Entity::find()
        .filter(blog_articles::Column::DeletedAt.is_not_null())
        .order_by_desc(blog_articles::Column::DeletedAt);

    if let Some(term) = &filters.search {
        query = query.filter(search_condition(term));
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_articles::Column::DeletedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_articles::Column::DeletedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    include_trashed: bool,
) -> Result<Option<blog_articles::Model>, ApiError> {
    let mut query = blog_articles::Entity::find_by_id(id.to_owned());
    if !include_trashed {
        query = query.filter(blog_articles::Column::DeletedAt.is_null());
    }
    Ok(query.one(conn).await?)
}

pub async fn create(
    db: &DatabaseConnection,
    actor_id: i64,
) -> Result<blog_articles::Model, ApiError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let txn = db.begin().await?;

    let article = blog_articles::ActiveModel {
        id: Set(id.clone()),
        slug: Set(id),
        status: Set(PublishStatus::Draft),
        created_by: Set(actor_id),
        updated_by: Set(Some(actor_id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    activity_log::log_activity(
        &txn,
        actor_id,
        Subject::Article(&article.id),
        LogAction::Created,
        None,
    )
    .await?;

    txn.commit().await?;
    Ok(article)
}

pub async fn soft_delete(
    db: &DatabaseConnection,
    id: &str,
    actor_id: i64,
) -> Result<(), ApiError> {
    let article = find_by_id(db, id, true)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog article not found.".to_owned()))?;
    if article.deleted_at.is_some() {
        return Err(ApiError::AlreadyDeleted(
            "Blog article is already deleted.".to_owned(),
        ));
    }

    let txn = db.begin().await?;

    let result = blog_articles::Entity::update_many()
        .col_expr(blog_articles::Column::DeletedAt, Expr::value(Some(Utc::now())))
        .col_expr(blog_articles::Column::DeletedBy, Expr::value(Some(actor_id)))
        .filter(blog_articles::Column::Id.eq(id))
        .filter(blog_articles::Column::DeletedAt.is_null())
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::AlreadyDeleted(
            "Blog article is already deleted.".to_owned(),
        ));
    }

    activity_log::log_activity(
        &txn,
        actor_id,
        Subject::Article(id),
        LogAction::Deleted,
        Some(json!({ "action": "Soft Delete" })),
    )
    .await?;

    txn.commit().await?;
    Ok(())
}

pub async fn restore(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    let article = find_by_id(db, id, true)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog article not found.".to_owned()))?;

    let mut active: blog_articles::ActiveModel = article.into();
    active.deleted_at = Set(None);
    active.deleted_by = Set(None);
    active.update(db).await?;
    Ok(())
}

pub async fn permanently_delete(
    db: &DatabaseConnection,
    id: &str,
    actor_id: i64,
) -> Result<(), ApiError> {
    let article = find_by_id(db, id, true)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog article not found.".to_owned()))?;
    if article.deleted_at.is_none() {
        return Err(ApiError::PreconditionFailed(
            "Blog article must be soft deleted before permanently deleting.".to_owned(),
        ));
    }

    let snapshot = serde_json::to_value(&article)
        .map_err(|e| ApiError::Internal(format!("Failed to snapshot blog article: {}", e)))?;

    let txn = db.begin().await?;

    activity_log::log_activity(
        &txn,
        actor_id,
        Subject::Article(id),
        LogAction::PermanentlyDeleted,
        Some(snapshot),
    )
    .await?;

    blog_articles::Entity::delete_by_id(id.to_owned()).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

pub fn listing_actor_ids(articles: &[blog_articles::Model]) -> Vec<Option<i64>> {
    articles
        .iter()
        .flat_map(|a| {
            [
                Some(a.created_by),
                a.updated_by,
                a.published_by,
                a.locked_by,
            ]
        })
        .collect()
}

pub fn trashed_actor_ids(articles: &[blog_articles::Model]) -> Vec<Option<i64>> {
    articles
        .iter()
        .flat_map(|a| [Some(a.created_by), a.updated_by, a.deleted_by])
        .collect()
}
