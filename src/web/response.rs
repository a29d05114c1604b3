//! Success envelope and pagination block shared by every handler.

use crate::pagination::Page;
use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::{json, Value};

/// `200 {success: true, message, data}`.
pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": message,
        "data": data,
    }))
}

#[derive(Serialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl PaginationMeta {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            current_page: page.current_page,
            per_page: page.per_page,
            total: page.total,
            last_page: page.last_page,
        }
    }
}

/// Listing payload: `pagination` counters beside the rendered rows, so
/// lists render as `data.pagination` and `data.data`.
#[derive(Serialize)]
pub struct Paginated {
    pub pagination: PaginationMeta,
    pub data: Vec<Value>,
}
