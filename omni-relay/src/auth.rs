//! Shared-secret gate for mutating routes
//!
//! Routes wrapped with [`require_api_key`] only run when the request carries
//! an `X-API-KEY` header equal to one of the configured keys.

use crate::{config::Config, error::ServiceError};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, ResponseError,
};
use tracing::warn;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Keys accepted by the gate
///
/// More than one key may be active at a time so a key can be rotated
/// without rejecting clients that still hold the previous one.
#[derive(Debug, Clone)]
pub struct ApiKeys {
    keys: Vec<String>,
}

impl ApiKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_keys())
    }

    /// Whether `candidate` matches any configured key
    pub fn accepts(&self, candidate: &str) -> bool {
        // Check every key so timing does not reveal which one matched.
        self.keys
            .iter()
            .fold(false, |matched, key| {
                constant_time_eq(candidate.as_bytes(), key.as_bytes()) | matched
            })
    }
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Middleware rejecting requests without a valid API key
///
/// On rejection the wrapped service is never called and the response is
/// `401 {"error":"Unauthorized"}`.
pub async fn require_api_key(
    keys: web::Data<ApiKeys>,
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, Error> {
    let authorized = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| keys.accepts(value))
        .unwrap_or(false);

    if !authorized {
        warn!("Rejected {} {}: missing or invalid API key", req.method(), req.path());
        let (req, _payload) = req.into_parts();
        let response = ServiceError::Unauthorized.error_response().map_into_right_body();
        return Ok(ServiceResponse::new(req, response));
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
