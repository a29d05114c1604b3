//! Category and tag endpoints.

use crate::auth_api::{AuthClient, CurrentUser};
use crate::datetime::format_timestamp;
use crate::db::get_db_pool;
use crate::enrich::MemberDirectory;
use crate::error::ApiError;
use crate::orm::{blog_categories, blog_posts, blog_tags};
use crate::pagination::PageRequest;
use crate::taxonomy::{self, TaxonomyFilters};
use crate::web::params::{parse_date, ListQuery};
use crate::web::response::{self, Paginated, PaginationMeta};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::{json, Value};
use validator::Validate;

pub fn configure(conf: &mut web::ServiceConfig) {
    conf.service(list_categories)
        .service(create_category)
        .service(update_category)
        .service(delete_category)
        .service(category_posts)
        .service(list_tags)
        .service(create_tag)
        .service(update_tag)
        .service(delete_tag)
        .service(tag_posts);
}

#[derive(Debug, serde::Deserialize, Validate)]
pub struct NamePayload {
    #[validate(length(min = 1, message = "name_th must not be empty."))]
    pub name_th: String,
    #[validate(length(min = 1, message = "name_en must not be empty."))]
    pub name_en: String,
}

fn validate_names(payload: &NamePayload) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))
}

fn category_row(category: &blog_categories::Model) -> Value {
    json!({
        "id": category.id,
        "name_th": category.name_th,
        "name_en": category.name_en,
        "slug": category.slug,
        "created_at": format_timestamp(&category.created_at),
        "updated_at": format_timestamp(&category.updated_at),
    })
}

fn tag_row(tag: &blog_tags::Model) -> Value {
    json!({
        "id": tag.id,
        "name_th": tag.name_th,
        "name_en": tag.name_en,
        "slug": tag.slug,
        "created_at": format_timestamp(&tag.created_at),
        "updated_at": format_timestamp(&tag.updated_at),
    })
}

fn linked_post_row(post: &blog_posts::Model, directory: &MemberDirectory) -> Value {
    json!({
        "id": post.id,
        "title_th": post.title_th,
        "title_en": post.title_en,
        "slug": post.slug,
        "status": post.status,
        "created_by": directory.actor(Some(post.created_by)),
        "updated_by": directory.actor(post.updated_by),
        "created_at": format_timestamp(&post.created_at),
        "updated_at": format_timestamp(&post.updated_at),
    })
}

fn filters_from(query: &ListQuery) -> Result<TaxonomyFilters, ApiError> {
    Ok(TaxonomyFilters {
        search: query.search.clone(),
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    })
}

#[get("/v1/category")]
async fn list_categories(
    _user: CurrentUser,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = filters_from(&query)?;
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = taxonomy::list_categories(get_db_pool(), &filters, page_req).await?;
    let message = if page.items.is_empty() {
        "No categories found."
    } else {
        "Categories retrieved successfully"
    };
    let rows = page.items.iter().map(category_row).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[post("/v1/category")]
async fn create_category(
    _user: CurrentUser,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, ApiError> {
    validate_names(&payload)?;
    let category =
        taxonomy::create_category(get_db_pool(), &payload.name_th, &payload.name_en).await?;
    Ok(response::ok(
        "Category created successfully",
        category_row(&category),
    ))
}

#[put("/v1/category/{id}")]
async fn update_category(
    _user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, ApiError> {
    validate_names(&payload)?;
    let category =
        taxonomy::update_category(get_db_pool(), &path, &payload.name_th, &payload.name_en)
            .await?;
    Ok(response::ok(
        "Category updated successfully",
        category_row(&category),
    ))
}

#[delete("/v1/category/{id}")]
async fn delete_category(
    _user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    taxonomy::delete_category(get_db_pool(), &path).await?;
    Ok(response::ok("Category deleted successfully", Value::Null))
}

#[get("/v1/category/{id}/posts")]
async fn category_posts(
    _user: CurrentUser,
    auth: web::Data<AuthClient>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page_req = PageRequest::new(query.page, query.per_page);
    let page = taxonomy::category_posts(get_db_pool(), &path, page_req).await?;
    let directory = MemberDirectory::resolve(
        auth.get_ref(),
        crate::posts::listing_actor_ids(&page.items),
    )
    .await?;

    let message = if page.items.is_empty() {
        "No blog posts found."
    } else {
        "Blog posts retrieved successfully"
    };
    let rows = page
        .items
        .iter()
        .map(|p| linked_post_row(p, &directory))
        .collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[get("/v1/tag")]
async fn list_tags(
    _user: CurrentUser,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = filters_from(&query)?;
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = taxonomy::list_tags(get_db_pool(), &filters, page_req).await?;
    let message = if page.items.is_empty() {
        "No tags found."
    } else {
        "Tags retrieved successfully"
    };
    let rows = page.items.iter().map(tag_row).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[post("/v1/tag")]
async fn create_tag(
    _user: CurrentUser,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, ApiError> {
    validate_names(&payload)?;
    let tag = taxonomy::create_tag(get_db_pool(), &payload.name_th, &payload.name_en).await?;
    Ok(response::ok("Tag created successfully", tag_row(&tag)))
}

#[put("/v1/tag/{id}")]
async fn update_tag(
    _user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<NamePayload>,
) -> Result<HttpResponse, ApiError> {
    validate_names(&payload)?;
    let tag =
        taxonomy::update_tag(get_db_pool(), &path, &payload.name_th, &payload.name_en).await?;
    Ok(response::ok("Tag updated successfully", tag_row(&tag)))
}

#[delete("/v1/tag/{id}")]
async fn delete_tag(
    _user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    taxonomy::delete_tag(get_db_pool(), &path).await?;
    Ok(response::ok("Tag deleted successfully", Value::Null))
}

#[get("/v1/tag/{id}/posts")]
async fn tag_posts(
    _user: CurrentUser,
    auth: web::Data<AuthClient>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page_req = PageRequest::new(query.page, query.per_page);
    let page = taxonomy::tag_posts(get_db_pool(), &path, page_req).await?;
    let directory = MemberDirectory::resolve(
        auth.get_ref(),
        crate::posts::listing_actor_ids(&page.items),
    )
    .await?;

    let message = if page.items.is_empty() {
        "No blog posts found."
    } else {
        "Blog posts retrieved successfully"
    };
    let rows = page
        .items
        .iter()
        .map(|p| linked_post_row(p, &directory))
        .collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}
