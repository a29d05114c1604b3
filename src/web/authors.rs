//! Blog author endpoints.

use crate::auth_api::CurrentUser;
use crate::authors::{self, AuthorFilters};
use crate::datetime::format_timestamp;
use crate::db::get_db_pool;
use crate::error::ApiError;
use crate::orm::blog_authors;
use crate::pagination::PageRequest;
use crate::web::params::{parse_date, ListQuery};
use crate::web::response::{self, Paginated, PaginationMeta};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::{json, Value};
use validator::Validate;

pub fn configure(conf: &mut web::ServiceConfig) {
    conf.service(list_authors)
        .service(create_author)
        .service(update_author)
        .service(delete_author);
}

#[derive(Debug, serde::Deserialize, Validate)]
pub struct AuthorPayload {
    #[validate(length(min = 1, message = "name_th must not be empty."))]
    pub name_th: String,
    #[validate(length(min = 1, message = "name_en must not be empty."))]
    pub name_en: String,
    pub profile_image: Option<Value>,
}

fn author_row(author: &blog_authors::Model) -> Value {
    json!({
        "id": author.id,
        "name_th": author.name_th,
        "name_en": author.name_en,
        "profile_image": author.profile_image,
        "created_at": format_timestamp(&author.created_at),
        "updated_at": format_timestamp(&author.updated_at),
    })
}

#[get("/v1/blog-author")]
async fn list_authors(
    _user: CurrentUser,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filters = AuthorFilters {
        search: query.search.clone(),
        start_date: parse_date("start_date", &query.start_date)?,
        end_date: parse_date("end_date", &query.end_date)?,
    };
    let page_req = PageRequest::new(query.page, query.per_page);

    let page = authors::list(get_db_pool(), &filters, page_req).await?;
    let message = if page.items.is_empty() {
        "No authors found."
    } else {
        "Authors retrieved successfully"
    };
    let rows = page.items.iter().map(author_row).collect();

    Ok(response::ok(
        message,
        Paginated {
            pagination: PaginationMeta::from_page(&page),
            data: rows,
        },
    ))
}

#[post("/v1/blog-author")]
async fn create_author(
    _user: CurrentUser,
    payload: web::Json<AuthorPayload>,
) -> Result<HttpResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let payload = payload.into_inner();

    let author = authors::create(
        get_db_pool(),
        &payload.name_th,
        &payload.name_en,
        payload.profile_image,
    )
    .await?;
    Ok(response::ok(
        "Author created successfully",
        author_row(&author),
    ))
}

#[put("/v1/blog-author/{id}")]
async fn update_author(
    _user: CurrentUser,
    path: web::Path<String>,
    payload: web::Json<AuthorPayload>,
) -> Result<HttpResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let payload = payload.into_inner();

    let author = authors::update(
        get_db_pool(),
        &path,
        &payload.name_th,
        &payload.name_en,
        payload.profile_image,
    )
    .await?;
    Ok(response::ok(
        "Author updated successfully",
        author_row(&author),
    ))
}

#[delete("/v1/blog-author/{id}")]
async fn delete_author(
    _user: CurrentUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    authors::delete(get_db_pool(), &path).await?;
    Ok(response::ok("Author deleted successfully", Value::Null))
}
