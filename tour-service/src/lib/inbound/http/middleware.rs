use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::CookieJar;

use super::handlers::ApiError;
use super::handlers::ApiErrorData;
use super::handlers::ApiResponseBody;
use super::handlers::ErrorDetail;
use super::handlers::INTERNAL_ERROR_MESSAGE;
use super::session::SessionCookie;
use crate::domain::user::principal::AuthenticatedPrincipal;
use crate::domain::user::principal::RoleGuard;
use crate::inbound::http::router::AppState;
use crate::user::errors::NOT_LOGGED_IN;

/// Authentication gate: resolves the session token to a principal and adds
/// it to request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized(NOT_LOGGED_IN.to_string()))?;

    let principal = state
        .user_service
        .authenticate(&token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Authentication rejected");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Authorization gate: admits the principal only if its role is allowed.
///
/// Must run after `authenticate`; without a principal the request is
/// rejected as unauthenticated.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = req
        .extensions()
        .get::<AuthenticatedPrincipal>()
        .ok_or_else(|| {
            tracing::error!("Role check reached without an authenticated principal");
            ApiError::Unauthorized(NOT_LOGGED_IN.to_string())
        })?;

    guard.check(principal)?;

    Ok(next.run(req).await)
}

/// Development only: render the diagnostic detail of 500 responses.
pub async fn expose_error_detail(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<ErrorDetail>() {
        Some(ErrorDetail(detail)) => {
            let status = response.status();
            let data = ApiErrorData {
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                detail: Some(detail),
            };
            (status, Json(ApiResponseBody::new(status, data))).into_response()
        }
        None => response,
    }
}

/// Extract the session token; the `jwt` cookie wins over the
/// `Authorization: Bearer` header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SessionCookie::NAME) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::models::Role;

    #[test]
    fn test_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );

        assert_eq!(session_token(&headers), Some("header-token".to_string()));
    }

    #[test]
    fn test_cookie_takes_precedence_over_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; jwt=cookie-token"),
        );

        assert_eq!(session_token(&headers), Some("cookie-token".to_string()));
    }

    #[test]
    fn test_empty_cookie_falls_back_to_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("jwt="));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );

        assert_eq!(session_token(&headers), Some("header-token".to_string()));
    }

    #[test]
    fn test_no_token() {
        assert_eq!(session_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(session_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(session_token(&headers), None);
    }

    #[tokio::test]
    async fn test_require_role_without_principal_is_unauthorized() {
        let app = Router::new()
            .route("/", get(|| async { "reached" }))
            .route_layer(middleware::from_fn_with_state(
                RoleGuard::new(&[Role::Admin]),
                require_role,
            ));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expose_error_detail_renders_detail() {
        let app = Router::new()
            .route(
                "/",
                get(|| async { ApiError::InternalServerError("pool timed out".to_string()) }),
            )
            .layer(middleware::from_fn(expose_error_detail));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["message"], INTERNAL_ERROR_MESSAGE);
        assert_eq!(body["data"]["detail"], "pool timed out");
    }
}
