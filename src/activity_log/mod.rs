//! Immutable activity trail for blog content mutations.
//!
//! The write path is always invoked on the caller's connection so the log
//! row commits or rolls back together with the mutation it describes. There
//! is deliberately no update or delete surface here.

use crate::datetime::{day_after, day_start};
use crate::orm::blog_activity_logs::{self, LogAction};
use crate::pagination::{fetch_page, Page, PageRequest};
use chrono::{NaiveDate, Utc};
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr};
use uuid::Uuid;

/// Subject of a log entry. After permanent deletion of the subject, the
/// stored reference is nulled by the foreign key, not by this module.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    Post(&'a str),
    Article(&'a str),
    None,
}

/// Append one activity record. Must run inside the same transaction as the
/// mutation being recorded; a failure here aborts that transaction.
pub async fn log_activity<C: ConnectionTrait>(
    conn: &C,
    actor_id: i64,
    subject: Subject<'_>,
    action: LogAction,
    details: Option<serde_json::Value>,
) -> Result<(), DbErr> {
    let (post_id, article_id) = match subject {
        Subject::Post(id) => (Some(id.to_owned()), None),
        Subject::Article(id) => (None, Some(id.to_owned())),
        Subject::None => (None, None),
    };

    blog_activity_logs::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(actor_id),
        post_id: Set(post_id),
        article_id: Set(article_id),
        action: Set(action),
        details: Set(details),
        created_at: Set(Utc::now()),
    }
    .insert(conn)
    .await?;

    Ok(())
}

#[derive(Clone, Debug, Default)]
pub struct LogFilters {
    pub user_id: Option<i64>,
    pub post_id: Option<String>,
    pub article_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Filtered log listing, newest first.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filters: &LogFilters,
    page: PageRequest,
) -> Result<Page<blog_activity_logs::Model>, DbErr> {
    let mut query = blog_activity_logs::Entity::find()
        .order_by_desc(blog_activity_logs::Column::CreatedAt);

    if let Some(user_id) = filters.user_id {
        query = query.filter(blog_activity_logs::Column::UserId.eq(user_id));
    }
    if let Some(post_id) = &filters.post_id {
        query = query.filter(blog_activity_logs::Column::PostId.eq(post_id.clone()));
    }
    if let Some(article_id) = &filters.article_id {
        query = query.filter(blog_activity_logs::Column::ArticleId.eq(article_id.clone()));
    }
    if let Some(start) = filters.start_date {
        query = query.filter(blog_activity_logs::Column::CreatedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(blog_activity_logs::Column::CreatedAt.lt(day_after(end)));
    }

    fetch_page(conn, query, page).await
}
