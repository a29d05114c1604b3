use crate::config::AppConfig;
use crate::web::response;
use actix_web::{get, web::Data, HttpResponse, Responder};
use serde_json::json;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_index);
}

#[get("/")]
async fn view_index(config: Data<AppConfig>) -> impl Responder {
    response::ok(
        "API Services",
        json!({ "version": config.api_version }),
    )
}

/// Fallback for unmatched routes, wired as the default service.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": "Route not found",
        "data": null,
    }))
}
