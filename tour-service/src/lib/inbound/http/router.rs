use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account::forgot_password;
use super::handlers::account::login;
use super::handlers::account::reset_password;
use super::handlers::account::signup;
use super::handlers::account::update_password;
use super::handlers::reviews::create_review;
use super::handlers::reviews::create_tour_review;
use super::handlers::reviews::delete_review;
use super::handlers::reviews::get_review;
use super::handlers::reviews::list_reviews;
use super::handlers::reviews::list_tour_reviews;
use super::handlers::reviews::update_review;
use super::handlers::route_not_found;
use super::handlers::tours::create_tour;
use super::handlers::tours::delete_tour;
use super::handlers::tours::get_tour;
use super::handlers::tours::list_tours;
use super::handlers::tours::update_tour;
use super::handlers::users::delete_me;
use super::handlers::users::delete_user;
use super::handlers::users::get_me;
use super::handlers::users::get_user;
use super::handlers::users::list_users;
use super::handlers::users::update_me;
use super::handlers::users::update_user;
use super::middleware::authenticate;
use super::middleware::expose_error_detail;
use super::middleware::require_role;
use super::session::SessionCookie;
use crate::config::Environment;
use crate::domain::review::ports::ReviewServicePort;
use crate::domain::tour::ports::TourServicePort;
use crate::domain::user::models::Role;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::principal::RoleGuard;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub tour_service: Arc<dyn TourServicePort>,
    pub review_service: Arc<dyn ReviewServicePort>,
    pub session_cookie: SessionCookie,
    pub environment: Environment,
    pub public_url: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/users/signup", post(signup))
        .route("/api/v1/users/login", post(login))
        .route("/api/v1/users/forgotPassword", post(forgot_password))
        .route("/api/v1/users/resetPassword/:token", patch(reset_password))
        .route("/api/v1/tours", get(list_tours))
        .route("/api/v1/tours/:tour_id", get(get_tour));

    let authenticated_routes = Router::new()
        .route("/api/v1/users/updateMyPassword", patch(update_password))
        .route("/api/v1/users/me", get(get_me))
        .route("/api/v1/users/updateMe", patch(update_me))
        .route("/api/v1/users/deleteMe", delete(delete_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    // Layers run outermost-last: authenticate, then the role check.
    let admin_routes = Router::new()
        .route("/api/v1/users", get(list_users))
        .route(
            "/api/v1/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(&[Role::Admin]),
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let tour_management_routes = Router::new()
        .route("/api/v1/tours", post(create_tour))
        .route(
            "/api/v1/tours/:tour_id",
            patch(update_tour).delete(delete_tour),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(&[Role::Admin, Role::LeadGuide]),
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let review_routes = Router::new()
        .route("/api/v1/reviews", get(list_reviews))
        .route("/api/v1/tours/:tour_id/reviews", get(list_tour_reviews))
        .route("/api/v1/reviews/:review_id", get(get_review))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let review_author_routes = Router::new()
        .route("/api/v1/reviews", post(create_review))
        .route("/api/v1/tours/:tour_id/reviews", post(create_tour_review))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(&[Role::User]),
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let review_management_routes = Router::new()
        .route(
            "/api/v1/reviews/:review_id",
            patch(update_review).delete(delete_review),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(&[Role::User, Role::Admin]),
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let router = Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(admin_routes)
        .merge(tour_management_routes)
        .merge(review_routes)
        .merge(review_author_routes)
        .merge(review_management_routes)
        .fallback(route_not_found);

    let router = if state.environment.is_development() {
        router.layer(middleware::from_fn(expose_error_detail))
    } else {
        router
    };

    router
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
