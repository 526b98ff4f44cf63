use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
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

use super::handlers::activate_email::activate_email;
use super::handlers::delete_user::delete_user;
use super::handlers::forgot_password::forgot_password;
use super::handlers::get_user_info::get_user_info;
use super::handlers::list_subscribers::list_subscribers;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use super::handlers::reset_password::reset_password;
use super::handlers::social_login::facebook_login;
use super::handlers::social_login::google_login;
use super::handlers::update_profile::update_profile;
use super::handlers::update_role::update_role;
use super::handlers::upload_avatar::upload_avatar;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin as admin_middleware;
use crate::user::ports::AccountService;
use crate::user::ports::AvatarUploader;

/// Shared handler state.
///
/// Ports are held as trait objects so the same router serves the Postgres
/// wiring in production and in-memory adapters in tests.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountService>,
    pub tokens: Arc<TokenService>,
    pub uploader: Arc<dyn AvatarUploader>,
}

pub fn create_router(
    accounts: Arc<dyn AccountService>,
    tokens: Arc<TokenService>,
    uploader: Arc<dyn AvatarUploader>,
) -> Router {
    let state = AppState {
        accounts,
        tokens,
        uploader,
    };

    let public_routes = Router::new()
        .route("/user/register", post(register))
        .route("/user/activation", post(activate_email))
        .route("/user/login", post(login))
        .route("/user/refresh_token", post(refresh_token))
        .route("/user/forgot", post(forgot_password))
        .route("/user/google_login", post(google_login))
        .route("/user/facebook_login", post(facebook_login))
        .route("/user/logout", get(logout));

    let protected_routes = Router::new()
        .route("/user/infor", get(get_user_info))
        .route("/user/reset", post(reset_password))
        .route("/user/update", patch(update_profile))
        .route("/api/upload_avatar", post(upload_avatar))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // require_admin is added first so that authenticate wraps it and runs
    // before it
    let admin_routes = Router::new()
        .route("/user/all_infor", get(list_users))
        .route("/user/all_subscriber_infor", get(list_subscribers))
        .route("/user/update_role/:user_id", patch(update_role))
        .route("/user/delete/:user_id", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
