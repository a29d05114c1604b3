//! Member administration against the local members table.
//!
//! Unlike blog content, a member's soft delete is a status transition:
//! active, suspended and deleted are all states of the same row, and any
//! of them can be reached from any other. Permanent deletion removes the
//! row and has no soft-delete precondition.

use crate::datetime::{day_after, day_start};
use crate::error::ApiError;
use crate::orm::members::{self, MemberStatus};
use crate::pagination::{fetch_page, Page, PageRequest};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection};

#[derive(Clone, Debug, Default)]
pub struct MemberFilters {
    pub email: Option<String>,
    pub status: Option<MemberStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default)]
pub struct NewMember {
    pub email: String,
    pub phone: Option<String>,
    pub first_name_th: Option<String>,
    pub last_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub last_name_en: Option<String>,
}

fn email_matches(email: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(members::Column::Email))).eq(email.to_lowercase())
}

/// Members newest first. The listing spans every status; callers narrow
/// with the status filter, there is no separate trashed scope.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filters: &MemberFilters,
    page: PageRequest,
) -> Result<Page<members::Model>, ApiError> {
    let mut query = members::Entity::find().order_by_desc(members::Column::CreatedAt);

    if let Some(email) = &filters.email {
        query = query.filter(members::Column::Email.contains(email));
    }
    if let Some(status) = &filters.status {
        query = query.filter(members::Column::Status.eq(status.clone()));
    }
    if let Some(start) = filters.start_date {
        query = query.filter(members::Column::CreatedAt.gte(day_start(start)));
    }
    if let Some(end) = filters.end_date {
        query = query.filter(members::Column::CreatedAt.lt(day_after(end)));
    }

    Ok(fetch_page(conn, query, page).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
) -> Result<Option<members::Model>, ApiError> {
    Ok(members::Entity::find_by_id(user_id).one(conn).await?)
}

/// Insert an active member. The email is unique case-insensitively.
pub async fn create(
    db: &DatabaseConnection,
    new_member: NewMember,
) -> Result<members::Model, ApiError> {
    let taken = members::Entity::find()
        .filter(email_matches(&new_member.email))
        .one(db)
        .await?
        .is_some();
    if taken {
        return Err(ApiError::Validation(
            "This email is already in use.".to_owned(),
        ));
    }

    let now = Utc::now();
    let member = members::ActiveModel {
        email: Set(new_member.email.trim().to_owned()),
        phone: Set(new_member.phone),
        first_name_th: Set(new_member.first_name_th),
        last_name_th: Set(new_member.last_name_th),
        first_name_en: Set(new_member.first_name_en),
        last_name_en: Set(new_member.last_name_en),
        status: Set(MemberStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(member)
}

async fn set_status(
    db: &DatabaseConnection,
    user_id: i64,
    status: MemberStatus,
) -> Result<members::Model, ApiError> {
    let member = find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found.".to_owned()))?;

    let mut active: members::ActiveModel = member.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Status-flag soft delete. The row stays and remains restorable.
pub async fn soft_delete(db: &DatabaseConnection, user_id: i64) -> Result<members::Model, ApiError> {
    set_status(db, user_id, MemberStatus::Deleted).await
}

pub async fn suspend(db: &DatabaseConnection, user_id: i64) -> Result<members::Model, ApiError> {
    set_status(db, user_id, MemberStatus::Suspended).await
}

/// Restore: any status transitions back to active.
pub async fn activate(db: &DatabaseConnection, user_id: i64) -> Result<members::Model, ApiError> {
    set_status(db, user_id, MemberStatus::Active).await
}

/// Remove the row outright. Members have no soft-delete precondition.
pub async fn permanently_delete(db: &DatabaseConnection, user_id: i64) -> Result<(), ApiError> {
    let result = members::Entity::delete_by_id(user_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Member not found.".to_owned()));
    }
    Ok(())
}
