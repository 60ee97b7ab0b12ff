use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::review::errors::ReviewError;
use crate::domain::tour::errors::TourError;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod account;
pub mod reviews;
pub mod tours;
pub mod users;

/// Message shown to clients for every unexpected failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went very wrong!";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    ServiceUnavailable(String),
}

/// Diagnostic detail of a 500 response, attached as a response extension.
///
/// Only the development-mode error middleware renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail(pub String);

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed unexpectedly");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let mut response = (
                    status,
                    Json(ApiResponseBody::new_error(
                        status,
                        INTERNAL_ERROR_MESSAGE.to_string(),
                    )),
                )
                    .into_response();
                response.extensions_mut().insert(ErrorDetail(detail));
                return response;
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Unauthenticated(_) => ApiError::Unauthorized(err.to_string()),
            UserError::Forbidden => ApiError::Forbidden(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::MissingCredentials
            | UserError::IncorrectCurrentPassword
            | UserError::ResetTokenInvalid => ApiError::BadRequest(err.to_string()),
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidRole(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Transient(_) => ApiError::ServiceUnavailable(err.to_string()),
            UserError::Fatal(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TourError> for ApiError {
    fn from(err: TourError) -> Self {
        match err {
            TourError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TourError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            TourError::InvalidTourId(_)
            | TourError::InvalidName(_)
            | TourError::InvalidDifficulty(_)
            | TourError::InvalidField(_) => ApiError::UnprocessableEntity(err.to_string()),
            TourError::DatabaseError(_) | TourError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(_) | ReviewError::TourNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ReviewError::Forbidden => ApiError::Forbidden(err.to_string()),
            ReviewError::InvalidReviewId(_)
            | ReviewError::InvalidTourId(_)
            | ReviewError::InvalidRating(_)
            | ReviewError::InvalidReview(_)
            | ReviewError::MissingField(_) => ApiError::UnprocessableEntity(err.to_string()),
            ReviewError::DatabaseError(_) | ReviewError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData {
                message,
                detail: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Public projection of a user; never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            photo: user.photo.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Body of every response that starts a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
    pub user: UserData,
}

pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Can't find {} on this server!", uri))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::errors::PasswordPolicyError;

    fn status_of(err: UserError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_user_error_status_mapping() {
        assert_eq!(
            status_of(UserError::Unauthenticated("no".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(UserError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(UserError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(UserError::EmailAlreadyExists("a@b.c".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(UserError::ResetTokenInvalid),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(UserError::IncorrectCurrentPassword),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(UserError::InvalidPassword(PasswordPolicyError::Mismatch)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(UserError::Transient("mail down".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(UserError::Fatal("no secret".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_hides_detail_but_attaches_it() {
        let response =
            ApiError::InternalServerError("connection reset".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<ErrorDetail>(),
            Some(&ErrorDetail("connection reset".to_string()))
        );
    }

    #[test]
    fn test_review_error_status_mapping() {
        let status = |err: ReviewError| ApiError::from(err).into_response().status();

        assert_eq!(
            status(ReviewError::TourNotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(ReviewError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status(ReviewError::MissingField("Please provide a rating".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(ReviewError::DatabaseError("gone".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forbidden_message() {
        assert_eq!(
            ApiError::from(UserError::Forbidden),
            ApiError::Forbidden("You do not have permission to perform this action".to_string())
        );
    }
}
