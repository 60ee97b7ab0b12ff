use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_review_id;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_review(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Path(review_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let review_id = parse_review_id(&review_id)?;

    state
        .review_service
        .delete_review(&principal, &review_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
