use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::domain::user::models::NewPassword;
use crate::domain::user::models::UpdatePasswordCommand;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TokenResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::session_response;
use crate::user::errors::UserError;

pub async fn update_password(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    jar: CookieJar,
    Json(body): Json<UpdatePasswordRequestBody>,
) -> Result<(CookieJar, ApiSuccess<TokenResponseData>), ApiError> {
    let new_password = NewPassword::new(body.password, &body.password_confirm)
        .map_err(|e| ApiError::from(UserError::from(e)))?;

    let command = UpdatePasswordCommand {
        current_password: body.current_password,
        new_password,
    };

    let session = state
        .user_service
        .update_password(&principal, command)
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
pub struct UpdatePasswordRequestBody {
    current_password: String,
    password: String,
    password_confirm: String,
}
