//! Blog article endpoints.
//!
//! Listings live at `/v1/blog/articles`; single-record operations use
//! the singular `/v1/blog/article` form.

use crate::articles::{self, ArticleFilters};
use crate::auth_api::{AuthClient, CurrentUser};
use crate::datetime::{format_optional, format_timestamp};
use crate::db::get_db_pool;
use crate::enrich::MemberDirectory;
use crate::error::ApiError;
use crate::orm::blog_articles::{self, PublishStatus};
use crate::pagination::PageRequest;
use crate::web::params::{parse_date, ListQuery};
use crate::web::response::{self, Paginated, PaginationMeta};
use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::{json, Value};

pub fn configure(conf: &mut web::ServiceConfig) {
    conf.service(list_trashed_articles)
        .service(list_articles)
        .service(create_article)
        .service(force_delete_article)
        .service(delete_article);
}

fn parse_status(raw: &Option<String>) -> Result<Option<PublishStatus>, ApiError> {
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some("draft") => Ok(Some(PublishStatus::Draft)),
        Some("published") => Ok(Some(PublishStatus::Published)),
        Some("archived") => Ok(Some(PublishStatus::Archived)),
        Some(other) => Err(ApiError::Validation(format!(
            "Invalid status '{}'; expected draft, published or archived.",
            other
        ))),
        None => Ok(None),
    }
}

fn active_row(article: &blog_articles::Model, directory: &MemberDirectory) -> Value {
    json!({
        "id": article.id,
        "title_th": article.title_th,
        "title_en": article.title_en,
        "slug": article.slug,
        "summary_th": article.summary_th,
        "summary_en": article.summary_en,
        "cover_image": article.cover_image,
        "status": article.status,
        "published_by": directory.actor(article.published_by),
        "published_at": format_optional(&article.published_at),
        "locked_by": directory.actor(article.locked_by),
        "locked_at": format_optional(&article.locked_at),
        "created_by": directory.actor(Some(article.created_by)),
        "updated_by": directory.actor(article.updated_by),
        "created_at": format_timestamp(&article.created_at),
        "updated_at": format_timestamp(&article.updated_at),
    })
}

fn trashed_row(article: &blog_articles::Model, directory: &MemberDirectory) -> Value {
    json!({
        "id": article.id,
        "title_th": article.title_th,
        "title_en": article.title_en,
        "slug": article.slug,
        "status": article.status,
        "created_by": directory.actor(Some(article.created_by)),
        "updated_by": directory.actor(article.updated_by),
        "deleted_by": directory.actor(article.deleted_by),
        "deleted_at": format_optional(&article.deleted_at),
        "created_at": format_timestamp(&article.created_at),
        "updated_at": format_timestamp(&article.updated_at),
    })
}

#[get("/v1/blog/articles")]
async fn list_articles(
    _user: CurrentUser,
    auth: web::Data<AuthClient>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = ArticleFilters {
        search: query.search.clone(),
        status: parse_status(&query.status)?,
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    };
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = articles::list(get_db_pool(), &filters, page_req).await?;
    let directory =
        MemberDirectory::resolve(auth.get_ref(), articles::listing_actor_ids(&page.items))
            .await?;

    let message = if page.items.is_empty() {
        "No blog articles found."
    } else {
        "Blog articles retrieved successfully"
    };
    let rows = page.items.iter().map(|a| active_row(a, &directory)).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[get("/v1/blog/articles/trashed")]
async fn list_trashed_articles(
    _user: CurrentUser,
    auth: web::Data<AuthClient>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = ArticleFilters {
        search: query.search.clone(),
        status: None,
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    };
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = articles::list_trashed(get_db_pool(), &filters, page_req).await?;
    let directory =
        MemberDirectory::resolve(auth.get_ref(), articles::trashed_actor_ids(&page.items))
            .await?;

    let message = if page.items.is_empty() {
        "No soft deleted blog articles found."
    } else {
        "Soft deleted blog articles retrieved successfully"
    };
    let rows = page.items.iter().map(|a| trashed_row(a, &directory)).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[post("/v1/blog/article")]
async fn create_article(user: CurrentUser) -> Result<HttpResponse, ApiError> {
    let article = articles::create(get_db_pool(), user.user_id).await?;
    Ok(response::ok(
        "Blog article created successfully",
        json!({
            "id": article.id,
            "slug": article.slug,
            "status": article.status,
            "created_at": format_timestamp(&article.created_at),
            "updated_at": format_timestamp(&article.updated_at),
        }),
    ))
}

#[delete("/v1/blog/article/{id}")]
async fn delete_article(
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    articles::soft_delete(get_db_pool(), &path, user.user_id).await?;
    Ok(response::ok("Blog article deleted successfully", Value::Null))
}

#[delete("/v1/blog/article/{id}/force")]
async fn force_delete_article(
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    articles::permanently_delete(get_db_pool(), &path, user.user_id).await?;
    Ok(response::ok(
        "Blog article permanently deleted successfully",
        Value::Null,
    ))
}
