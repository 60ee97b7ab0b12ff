use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;

pub async fn get_me(
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, principal.user().into())
}
