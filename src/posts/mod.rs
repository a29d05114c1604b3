//! Blog post lifecycle: create, list, soft delete, restore, permanent
//! delete.
//!
//! Every mutation commits its activity log entry in the same transaction.
//! Soft deletion is a conditional update so two concurrent deletes cannot
//! both log; permanent deletion snapshots the full row into the log before
//! the row goes away.

use crate::activity_log::{self, Subject};
use crate::datetime::{day_after, day_start};
use crate::error::ApiError;
use crate::orm::blog_activity_logs::LogAction;
use crate::orm::blog_posts::{self, PublishStatus};
use crate::pagination::{fetch_page, Page, PageRequest};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;
use uuid::Uuid;

#[derive(Clone, Debug, Default)]
pub struct PostFilters {
    pub search: Option<String>,
    pub status: Option<PublishStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn search_condition(term: &str) -> Condition {
    Condition::any()
        .add(blog_posts::Column::TitleTh.contains(term))
        .add(blog_posts::Column::TitleEn.contains(term))
        .add(blog_posts::Column::SummaryTh.contains(term))
        .add(blog_posts::Column::SummaryEn.contains(term))
}

/// Active posts, most recently updated first. Date bounds apply to
/// `created_at`.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filters: &PostFilters,
    page: PageRequest,
) -> Result<Page<blog_posts::Model>, ApiError> {
    let mut query = blog_posts::Entity::find()
        .filter(blog_posts::Column::DeletedAt.is_null())
        .order_by_desc(blog_posts::Column::UpdatedAt);

    if let Some(term) = &filters.search {
        query = query.filter(search_condition(term));
    }
    if let Some(status) = &filters.status {
        query = query.filter(blog_posts::Column::Status.eq(status.clone()));
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_posts::Column::CreatedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_posts::Column::CreatedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

/// Soft-deleted posts, most recently deleted first. Date bounds apply to
/// `deleted_at`; status filters do not apply in the trash.
pub async fn list_trashed<C: ConnectionTrait>(
    conn: &C,
    filters: &PostFilters,
    page: PageRequest,
) -> Result<Page<blog_posts::Model>, ApiError> {
    let mut query = blog_posts::Entity::find()
        .filter(blog_posts::Column::DeletedAt.is_not_null())
        .order_by_desc(blog_posts::Column::DeletedAt);

    if let Some(term) = &filters.search {
        query = query.filter(search_condition(term));
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_posts::Column::DeletedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_posts::Column::DeletedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    include_trashed: bool,
) -> Result<Option<blog_posts::Model>, ApiError> {
    let mut query = blog_posts::Entity::find_by_id(id.to_owned());
    if !include_trashed {
        query = query.filter(blog_posts::Column::DeletedAt.is_null());
    }
    Ok(query.one(conn).await?)
}

/// Insert an empty draft owned by `actor_id`. The slug starts out as the
/// id; editing gives it a real value later.
pub async fn create(
    db: &DatabaseConnection,
    actor_id: i64,
) -> Result<blog_posts::Model, ApiError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let txn = db.begin().await?;

    let post = blog_posts::ActiveModel {
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

    activity_log::log_activity(&txn, actor_id, Subject::Post(&post.id), LogAction::Created, None)
        .await?;

    txn.commit().await?;
    Ok(post)
}

/// Move a post to the trash. The update is conditional on the row still
/// being active, so a concurrent delete loses cleanly instead of logging
/// twice.
pub async fn soft_delete(
    db: &DatabaseConnection,
    id: &str,
    actor_id: i64,
) -> Result<(), ApiError> {
    let post = find_by_id(db, id, true)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog post not found.".to_owned()))?;
    if post.deleted_at.is_some() {
        return Err(ApiError::AlreadyDeleted(
            "Blog post is already deleted.".to_owned(),
        ));
    }

    let txn = db.begin().await?;

    let result = blog_posts::Entity::update_many()
        .col_expr(blog_posts::Column::DeletedAt, Expr::value(Some(Utc::now())))
        .col_expr(blog_posts::Column::DeletedBy, Expr::value(Some(actor_id)))
        .filter(blog_posts::Column::Id.eq(id))
        .filter(blog_posts::Column::DeletedAt.is_null())
        .exec(&txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::AlreadyDeleted(
            "Blog post is already deleted.".to_owned(),
        ));
    }

    activity_log::log_activity(
        &txn,
        actor_id,
        Subject::Post(id),
        LogAction::Deleted,
        Some(json!({ "action": "Soft Delete" })),
    )
    .await?;

    txn.commit().await?;
    Ok(())
}

/// Bring a trashed post back into the active scope.
pub async fn restore(db: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    let post = find_by_id(db, id, true)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog post not found.".to_owned()))?;

    let mut active: blog_posts::ActiveModel = post.into();
    active.deleted_at = Set(None);
    active.deleted_by = Set(None);
    active.update(db).await?;
    Ok(())
}

/// Remove a trashed post for good. A full snapshot of the row is written
/// to the activity log before the delete so the record remains auditable.
pub async fn permanently_delete(
    db: &DatabaseConnection,
    id: &str,
    actor_id: i64,
) -> Result<(), ApiError> {
    let post = find_by_id(db, id, true)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog post not found.".to_owned()))?;
    if post.deleted_at.is_none() {
        return Err(ApiError::PreconditionFailed(
            "Blog post must be soft deleted before permanently deleting.".to_owned(),
        ));
    }

    let snapshot = serde_json::to_value(&post)
        .map_err(|e| ApiError::Internal(format!("Failed to snapshot blog post: {}", e)))?;

    let txn = db.begin().await?;

    // Log first: the FK nulls post_id once the row is gone, and the
    // snapshot must be durable regardless.
    activity_log::log_activity(
        &txn,
        actor_id,
        Subject::Post(id),
        LogAction::PermanentlyDeleted,
        Some(snapshot),
    )
    .await?;

    blog_posts::Entity::delete_by_id(id.to_owned()).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Actor ids an active listing renders, in row order. Duplicates and
/// nulls are fine; the directory dedups.
pub fn listing_actor_ids(posts: &[blog_posts::Model]) -> Vec<Option<i64>> {
    posts
        .iter()
        .flat_map(|p| {
            [
                Some(p.created_by),
                p.updated_by,
                p.published_by,
                p.locked_by,
            ]
        })
        .collect()
}

/// Actor ids a trash listing renders.
pub fn trashed_actor_ids(posts: &[blog_posts::Model]) -> Vec<Option<i64>> {
    posts
        .iter()
        .flat_map(|p| [Some(p.created_by), p.updated_by, p.deleted_by])
        .collect()
}
