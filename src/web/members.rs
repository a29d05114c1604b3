//! Member administration endpoints.
//!
//! Member soft delete is the status-flag variant: `DELETE .../soft`,
//! `PUT /suspend/{id}` and `PUT /active/{id}` all flip the same status
//! column, and `PUT /active/{id}` is the restore path.

use crate::auth_api::CurrentUser;
use crate::datetime::format_timestamp;
use crate::db::get_db_pool;
use crate::error::ApiError;
use crate::members::{self, MemberFilters, NewMember};
use crate::orm::members::{self as member_orm, MemberStatus};
use crate::pagination::PageRequest;
use crate::web::params::parse_date;
use crate::web::response::{self, Paginated, PaginationMeta};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

pub fn configure(conf: &mut web::ServiceConfig) {
    conf.service(list_members)
        .service(create_member)
        .service(soft_delete_member)
        .service(force_delete_member)
        .service(suspend_member)
        .service(activate_member);
}

#[derive(Debug, Default, Deserialize)]
pub struct MemberQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MemberPayload {
    #[validate(email(message = "email must be a valid address."))]
    pub email: String,
    pub phone: Option<String>,
    pub first_name_th: Option<String>,
    pub last_name_th: Option<String>,
    pub first_name_en: Option<String>,
    pub last_name_en: Option<String>,
}

fn parse_status(raw: &Option<String>) -> Result<Option<MemberStatus>, ApiError> {
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some("active") => Ok(Some(MemberStatus::Active)),
        Some("suspended") => Ok(Some(MemberStatus::Suspended)),
        Some("deleted") => Ok(Some(MemberStatus::Deleted)),
        Some(other) => Err(ApiError::Validation(format!(
            "Invalid status '{}'; expected active, suspended or deleted.",
            other
        ))),
        None => Ok(None),
    }
}

fn member_row(member: &member_orm::Model) -> Value {
    json!({
        "user_id": member.user_id,
        "email": member.email,
        "phone": member.phone,
        "first_name_th": member.first_name_th,
        "last_name_th": member.last_name_th,
        "first_name_en": member.first_name_en,
        "last_name_en": member.last_name_en,
        "status": member.status,
        "created_at": format_timestamp(&member.created_at),
        "updated_at": format_timestamp(&member.updated_at),
    })
}

#[get("/v1/member")]
async fn list_members(
    _user: CurrentUser,
    query: web::Query<MemberQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = MemberFilters {
        email: query.email.clone(),
        status: parse_status(&query.status)?,
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    };
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = members::list(get_db_pool(), &filters, page_req).await?;
    let rows = page.items.iter().map(member_row).collect();

    Ok(response::ok(
        "Member list retrieved successfully",
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[post("/v1/member")]
async fn create_member(
    _user: CurrentUser,
    payload: web::Json<MemberPayload>,
) -> Result<HttpResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let payload = payload.into_inner();

    let member = members::create(
        get_db_pool(),
        NewMember {
            email: payload.email,
            phone: payload.phone,
            first_name_th: payload.first_name_th,
            last_name_th: payload.last_name_th,
            first_name_en: payload.first_name_en,
            last_name_en: payload.last_name_en,
        },
    )
    .await?;
    Ok(response::ok(
        "Member has been created successfully",
        member_row(&member),
    ))
}

#[delete("/v1/member/{id}/soft")]
async fn soft_delete_member(
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    members::soft_delete(get_db_pool(), path.into_inner()).await?;
    Ok(response::ok(
        "Member has been soft deleted successfully",
        Value::Null,
    ))
}

#[delete("/v1/member/{id}")]
async fn force_delete_member(
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    members::permanently_delete(get_db_pool(), path.into_inner()).await?;
    Ok(response::ok(
        "Member has been permanently deleted successfully",
        Value::Null,
    ))
}

#[put("/v1/member/suspend/{id}")]
async fn suspend_member(
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    members::suspend(get_db_pool(), path.into_inner()).await?;
    Ok(response::ok(
        "Member has been suspended successfully",
        Value::Null,
    ))
}

#[put("/v1/member/active/{id}")]
async fn activate_member(
    _user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    members::activate(get_db_pool(), path.into_inner()).await?;
    Ok(response::ok(
        "Member has been activated successfully",
        Value::Null,
    ))
}
