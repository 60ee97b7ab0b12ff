use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UserName;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UserNameError;

pub async fn update_me(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    if body.password.is_some() || body.password_confirm.is_some() {
        return Err(ApiError::BadRequest(
            "This route is not for password updates. Please use /updateMyPassword.".to_string(),
        ));
    }

    state
        .user_service
        .update_me(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for updating the caller's profile.
///
/// Fields other than name, email and photo are ignored; role changes go
/// through the admin route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateMeRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    password_confirm: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateMeRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] UserNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl UpdateMeRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ParseUpdateMeRequestError> {
        Ok(UpdateProfileCommand {
            name: self.name.map(UserName::new).transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            photo: self.photo,
        })
    }
}

impl From<ParseUpdateMeRequestError> for ApiError {
    fn from(err: ParseUpdateMeRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
