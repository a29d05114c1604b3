//! Client for the upstream Auth/identity service.
//!
//! The client is constructed once at startup from [`AppConfig`] and shared
//! through `web::Data`; nothing in this crate reaches for a global HTTP
//! client. Every call carries the configured deadline; timeouts and
//! connection failures surface through the upstream error class, and error
//! responses from the service are passed to our caller verbatim.

use crate::config::AppConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

/// One resolved member profile from `GET /v1/member/batch`. Fields beyond
/// the id are upstream-defined and carried through untouched.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MemberProfile {
    pub user_id: i64,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, Value>,
}

/// Authenticated actor attached to every `/v1` request.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user_id: i64,
    /// Full profile object the Auth service returned for the token.
    pub profile: Value,
}

/// Seam for the batched member lookup so tests can inject a double.
#[async_trait]
pub trait MemberLookup: Send + Sync {
    async fn member_batch(&self, ids: &[i64]) -> Result<Vec<MemberProfile>, ApiError>;
}

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.auth_connection_key))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.auth_base_url.clone(),
        })
    }

    /// GET a service endpoint, returning the decoded body. Responses with a
    /// status >= 400 become [`ApiError::Upstream`] carrying that status and
    /// body unchanged.
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::Internal(format!("Invalid upstream endpoint: {}", e)))?;

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        if status >= 400 {
            return Err(ApiError::Upstream { status, body });
        }
        Ok(body)
    }

    /// Resolve a bearer token to its user via `GET /v1/auth/verify-token`.
    pub async fn verify_token(&self, token: &str) -> Result<CurrentUser, ApiError> {
        let body = self
            .get_json("/v1/auth/verify-token", &[("token", token)])
            .await?;

        let profile = body.get("data").cloned().unwrap_or(Value::Null);
        let user_id = profile
            .get("user_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                ApiError::Internal("Auth service returned no user_id for the token.".to_owned())
            })?;

        Ok(CurrentUser { user_id, profile })
    }
}

#[async_trait]
impl MemberLookup for AuthClient {
    async fn member_batch(&self, ids: &[i64]) -> Result<Vec<MemberProfile>, ApiError> {
        let csv = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let body = self.get_json("/v1/member/batch", &[("ids", &csv)]).await?;
        let members = body.get("data").cloned().unwrap_or(Value::Array(vec![]));

        serde_json::from_value(members).map_err(|e| {
            ApiError::Internal(format!("Unexpected member batch payload: {}", e))
        })
    }
}

/// Timeouts become 504, everything else on the wire 502. The body mirrors
/// the standard envelope so clients see one error shape.
fn transport_error(err: reqwest::Error) -> ApiError {
    let status = if err.is_timeout() { 504 } else { 502 };
    ApiError::Upstream {
        status,
        body: json!({
            "success": false,
            "message": format!("Auth service is unreachable: {}", err),
            "data": null,
        }),
    }
}
