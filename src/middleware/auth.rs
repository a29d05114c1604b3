//! Bearer-token authentication extractor.
//!
//! Handlers take [`CurrentUser`] as an argument; extraction verifies the
//! Authorization header against the Auth service once per request and
//! caches the result in the request extensions.

use crate::auth_api::{AuthClient, CurrentUser};
use actix_web::error::{ErrorServiceUnavailable, ErrorUnauthorized};
use actix_web::{dev::Payload, web::Data, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if let Some(user) = req.extensions().get::<CurrentUser>() {
                return Ok(user.clone());
            }

            let client = req
                .app_data::<Data<AuthClient>>()
                .ok_or_else(|| ErrorServiceUnavailable("Auth client is not configured."))?;

            let token = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ErrorUnauthorized("Missing bearer token."))?;

            let user = client.verify_token(token).await?;
            req.extensions_mut().insert(user.clone());
            Ok(user)
        })
    }
}
