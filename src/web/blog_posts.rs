//! Blog post endpoints.
//!
//! Listings resolve every actor column through the member directory with a
//! single upstream batch call before rendering.

use crate::auth_api::{AuthClient, CurrentUser};
use crate::datetime::{format_optional, format_timestamp};
use crate::db::get_db_pool;
use crate::enrich::MemberDirectory;
use crate::error::ApiError;
use crate::orm::blog_posts::{self, PublishStatus};
use crate::pagination::PageRequest;
use crate::posts::{self, PostFilters};
use crate::web::params::{parse_date, ListQuery};
use crate::web::response::{self, Paginated, PaginationMeta};
use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::{json, Value};

pub fn configure(conf: &mut web::ServiceConfig) {
    // /trashed before /{id} so the literal segment wins.
    conf.service(list_trashed_posts)
        .service(list_posts)
        .service(create_post)
        .service(force_delete_post)
        .service(delete_post);
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

fn active_row(post: &blog_posts::Model, directory: &MemberDirectory) -> Value {
    json!({
        "id": post.id,
        "title_th": post.title_th,
        "title_en": post.title_en,
        "slug": post.slug,
        "summary_th": post.summary_th,
        "summary_en": post.summary_en,
        "cover_image": post.cover_image,
        "status": post.status,
        "published_by": directory.actor(post.published_by),
        "published_at": format_optional(&post.published_at),
        "locked_by": directory.actor(post.locked_by),
        "locked_at": format_optional(&post.locked_at),
        "created_by": directory.actor(Some(post.created_by)),
        "updated_by": directory.actor(post.updated_by),
        "created_at": format_timestamp(&post.created_at),
        "updated_at": format_timestamp(&post.updated_at),
    })
}

fn trashed_row(post: &blog_posts::Model, directory: &MemberDirectory) -> Value {
    json!({
        "id": post.id,
        "title_th": post.title_th,
        "title_en": post.title_en,
        "slug": post.slug,
        "status": post.status,
        "created_by": directory.actor(Some(post.created_by)),
        "updated_by": directory.actor(post.updated_by),
        "deleted_by": directory.actor(post.deleted_by),
        "deleted_at": format_optional(&post.deleted_at),
        "created_at": format_timestamp(&post.created_at),
        "updated_at": format_timestamp(&post.updated_at),
    })
}

#[get("/v1/blog-posts")]
async fn list_posts(
    _user: CurrentUser,
    auth: web::Data<AuthClient>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = PostFilters {
        search: query.search.clone(),
        status: parse_status(&query.status)?,
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    };
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = posts::list(get_db_pool(), &filters, page_req).await?;
    let directory =
        MemberDirectory::resolve(auth.get_ref(), posts::listing_actor_ids(&page.items)).await?;

    let message = if page.items.is_empty() {
        "No blog posts found."
    } else {
        "Blog posts retrieved successfully"
    };
    let rows = page.items.iter().map(|p| active_row(p, &directory)).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[get("/v1/blog-posts/trashed")]
async fn list_trashed_posts(
    _user: CurrentUser,
    auth: web::Data<AuthClient>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = PostFilters {
        search: query.search.clone(),
        status: None,
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    };
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = posts::list_trashed(get_db_pool(), &filters, page_req).await?;
    let directory =
        MemberDirectory::resolve(auth.get_ref(), posts::trashed_actor_ids(&page.items)).await?;

    let message = if page.items.is_empty() {
        "No soft deleted blog posts found."
    } else {
        "Soft deleted blog posts retrieved successfully"
    };
    let rows = page.items.iter().map(|p| trashed_row(p, &directory)).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[post("/v1/blog-posts")]
async fn create_post(user: CurrentUser) -> Result<HttpResponse, ApiError> {
    let post = posts::create(get_db_pool(), user.user_id).await?;
    Ok(response::ok(
        "Blog post created successfully",
        json!({
            "id": post.id,
            "slug": post.slug,
            "status": post.status,
            "created_at": format_timestamp(&post.created_at),
            "updated_at": format_timestamp(&post.updated_at),
        }),
    ))
}

#[delete("/v1/blog-posts/{id}")]
async fn delete_post(
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    posts::soft_delete(get_db_pool(), &path, user.user_id).await?;
    Ok(response::ok("Blog post deleted successfully", Value::Null))
}

#[delete("/v1/blog-posts/{id}/force")]
async fn force_delete_post(
    user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    posts::permanently_delete(get_db_pool(), &path, user.user_id).await?;
    Ok(response::ok(
        "Blog post permanently deleted successfully",
        Value::Null,
    ))
}
