// =============================================================================
// Admin Authentication — authenticated route tier
// =============================================================================
//
// The API has two tiers: `/api/v1/health` is public, everything else requires
// `Authorization: Bearer <token>` matching the `FINSIGHT_ADMIN_TOKEN`
// environment variable. Handlers opt in by taking the `AdminAuth` extractor;
// a failed check short-circuits with 403 and the service's standard
// `{"error": ...}` body before the handler runs.
// =============================================================================

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

pub const ADMIN_TOKEN_VAR: &str = "FINSIGHT_ADMIN_TOKEN";

/// Marker extractor: its presence in a handler signature makes the route
/// authenticated. Carries no data; the token itself is never passed on.
pub struct AdminAuth;

/// 403 rejection in the service's error-body shape.
#[derive(Serialize)]
pub struct Denied {
    error: &'static str,
}

impl IntoResponse for Denied {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, axum::Json(self)).into_response()
    }
}

/// XOR-accumulating equality over the full length of both tokens, so the
/// comparison time does not depend on where the first mismatch sits. Length
/// is allowed to leak; the caller does not control the expected token.
fn token_matches(presented: &str, expected: &str) -> bool {
    let (a, b) = (presented.as_bytes(), expected.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = Denied;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Re-read per request so a rotated token takes effect without a
        // restart. An unset/empty token locks the authenticated tier rather
        // than opening it.
        let expected = std::env::var(ADMIN_TOKEN_VAR).unwrap_or_default();
        if expected.is_empty() {
            warn!("{ADMIN_TOKEN_VAR} is not set, rejecting authenticated request");
            return Err(Denied {
                error: "server authentication not configured",
            });
        }

        match bearer_token(parts) {
            Some(token) if token_matches(token, &expected) => Ok(AdminAuth),
            Some(_) => {
                warn!("invalid admin token presented");
                Err(Denied {
                    error: "invalid authorization token",
                })
            }
            None => Err(Denied {
                error: "missing or invalid authorization token",
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
