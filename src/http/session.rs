use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;
use uuid::Uuid;

use crate::http::AppError;
use crate::AppState;

pub const SESSION_HEADER: HeaderName = HeaderName::from_static("x-session-id");

/// Session named by the `x-session-id` header. Rejects unknown sessions.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

#[axum::async_trait]
impl FromRequestParts<AppState> for SessionId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("missing x-session-id header"))?;

        let id = Uuid::parse_str(header.trim())
            .map_err(|_| AppError::unauthorized("invalid x-session-id header"))?;

        let exists = state.sessions.exists(id).map_err(|err| {
            tracing::error!(error = ?err, "failed to look up session");
            AppError::internal("failed to look up session")
        })?;

        if !exists {
            return Err(AppError::unauthorized("invalid session"));
        }

        Ok(SessionId(id))
    }
}
