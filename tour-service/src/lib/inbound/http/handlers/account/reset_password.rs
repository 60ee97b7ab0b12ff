use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::domain::user::models::NewPassword;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TokenResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::session_response;
use crate::user::errors::UserError;

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    jar: CookieJar,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<(CookieJar, ApiSuccess<TokenResponseData>), ApiError> {
    let new_password = NewPassword::new(body.password, &body.password_confirm)
        .map_err(|e| ApiError::from(UserError::from(e)))?;

    let session = state
        .user_service
        .reset_password(&token, new_password)
        .await
        .map_err(ApiError::from)?;

    Ok(session_response(
        jar,
        &state.session_cookie,
        StatusCode::OK,
        session,
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    password: String,
    password_confirm: String,
}
