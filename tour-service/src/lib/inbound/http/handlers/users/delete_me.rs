use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Deactivate the caller's account; the record is kept.
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .deactivate_me(&principal)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
