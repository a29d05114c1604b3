//! Activity log read endpoints. The log has no write surface over HTTP.

use crate::activity_log::{self, LogFilters};
use crate::auth_api::CurrentUser;
use crate::datetime::format_timestamp;
use crate::db::get_db_pool;
use crate::error::ApiError;
use crate::orm::blog_activity_logs;
use crate::pagination::PageRequest;
use crate::web::params::{parse_date, LogQuery};
use crate::web::response::{self, Paginated, PaginationMeta};
use actix_web::{get, web, HttpResponse};
use serde_json::{json, Value};

pub fn configure(conf: &mut web::ServiceConfig) {
    conf.service(list_logs)
        .service(post_logs)
        .service(article_logs)
        .service(user_logs);
}

fn log_row(entry: &blog_activity_logs::Model) -> Value {
    json!({
        "id": entry.id,
        "user_id": entry.user_id,
        "post_id": entry.post_id,
        "article_id": entry.article_id,
        "action": entry.action,
        "details": entry.details,
        "created_at": format_timestamp(&entry.created_at),
    })
}

async fn render(
    filters: LogFilters,
    page_req: PageRequest,
    message: &str,
) -> Result<HttpResponse, ApiError> {
    let page = activity_log::list(get_db_pool(), &filters, page_req).await?;
    let rows = page.items.iter().map(log_row).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[get("/v1/activity-log")]
async fn list_logs(
    _user: CurrentUser,
    query: web::Query<LogQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = LogFilters {
        user_id: query.user_id,
        post_id: query.post_id.clone(),
        article_id: query.article_id.clone(),
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    };
    render(
        filters,
        PageRequest::new(query.page, query.per_page),
        "Logs retrieved successfully",
    )
    .await
}

#[get("/v1/activity-log/post/{id}")]
async fn post_logs(
    _user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<LogQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = LogFilters {
        post_id: Some(path.into_inner()),
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
        ..Default::default()
    };
    render(
        filters,
        PageRequest::new(query.page, query.per_page),
        "Logs retrieved successfully",
    )
    .await
}

#[get("/v1/activity-log/article/{id}")]
async fn article_logs(
    _user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<LogQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = LogFilters {
        article_id: Some(path.into_inner()),
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
        ..Default::default()
    };
    render(
        filters,
        PageRequest::new(query.page, query.per_page),
        "Logs retrieved successfully",
    )
    .await
}

#[get("/v1/activity-log/user/{id}")]
async fn user_logs(
    _user: CurrentUser,
    path: web::Path<i64>,
    query: web::Query<LogQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = LogFilters {
        user_id: Some(path.into_inner()),
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
        ..Default::default()
    };
    render(
        filters,
        PageRequest::new(query.page, query.per_page),
        "User logs retrieved successfully",
    )
    .await
}
