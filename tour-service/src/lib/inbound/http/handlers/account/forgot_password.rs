use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn forgot_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ForgotPasswordRequestBody>,
) -> Result<ApiSuccess<ForgotPasswordResponseData>, ApiError> {
    let reset_base_url = format!("{}/api/v1/users/resetPassword", public_url(&state, &headers));

    state
        .user_service
        .forgot_password(&body.email, &reset_base_url)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ForgotPasswordResponseData {
            message: "Token sent to email!".to_string(),
        },
    ))
}

/// Externally visible origin of this service.
///
/// The configured public URL wins; otherwise it is derived from the `Host`
/// header, over https outside development.
fn public_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(url) = &state.public_url {
        return url.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    let scheme = if state.environment.is_development() {
        "http"
    } else {
        "https"
    };

    format!("{}://{}", scheme, host)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequestBody {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordResponseData {
    pub message: String,
}
