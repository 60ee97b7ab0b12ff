use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::domain::user::models::LoginCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TokenResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::session::session_response;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<TokenResponseData>), ApiError> {
    let command = LoginCommand {
        email: body.email.unwrap_or_default(),
        password: body.password.unwrap_or_default(),
    };

    let session = state
        .user_service
        .login(command)
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
pub struct LoginRequestBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}
