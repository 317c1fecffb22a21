//! Gateway-asserted identity
//!
//! Authentication itself lives in the upstream gateway; by the time a
//! request reaches this service the gateway has verified the session and
//! asserts the principal through trusted headers. `AuthContext` extracts
//! that assertion and nothing more.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::{Actor, Role};

use super::common::{ApiResponse, EmptyData};

/// Header carrying the authenticated user's UUID
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's role (`user` or `admin`)
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the acting principal.
pub struct AuthContext(pub Actor);

/// 401 rejection shared by all handlers
pub type AuthRejection = (StatusCode, Json<ApiResponse<EmptyData>>);

fn unauthorized(message: &str) -> AuthRejection {
    (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(message)))
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized("Missing X-User-Id header"))?;
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| unauthorized("X-User-Id header is not a valid UUID"))?;

        let role = match parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            Some("admin") => Role::Admin,
            _ => Role::User,
        };

        Ok(AuthContext(Actor { user_id, role }))
    }
}

/// Guard for administrative endpoints.
pub fn require_admin<T>(actor: &Actor) -> Result<(), (StatusCode, Json<ApiResponse<T>>)> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Administrator role required")),
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────────
