//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and Leptos SSR rendering under a single
//! Axum router. `/` renders either the dashboard or the sign-in form
//! depending on the session cookie; everything under `/api` speaks JSON, and
//! `/pkg` serves the hydration bundle and stylesheet.

pub mod attendance;
pub mod auth;
pub mod error;
pub mod pages;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Redirect;
use axum::routing::{delete, get, post};
use attendance_client::app::{App, shell};
use leptos::config::LeptosOptions;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/login", get(redirect_login_to_root))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/session-token", get(auth::session_token_handler))
        .route("/api/theme", post(pages::set_theme))
        .route("/api/students", get(attendance::list_students).post(attendance::create_student))
        .route("/api/students/{id}", delete(attendance::delete_student))
        .route("/api/attendance", get(attendance::list_records).put(attendance::mark))
        .route("/api/attendance/summary", get(attendance::summary))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Leptos SSR routes, each request carrying its resolved shell context.
fn page_routes(state: AppState, leptos_options: &LeptosOptions) -> Router {
    let routes = generate_route_list(App);
    let shell_options = leptos_options.clone();

    Router::new()
        .leptos_routes(leptos_options, routes, move || {
            shell(shell_options.clone(), pages::request_shell_context())
        })
        .with_state(leptos_options.clone())
        .layer(middleware::from_fn_with_state(state, pages::attach_shell_context))
}

/// Full application router.
pub fn app(state: AppState, leptos_options: &LeptosOptions) -> Router {
    let pkg_dir = PathBuf::from(leptos_options.site_root.as_ref()).join(leptos_options.site_pkg_dir.as_ref());

    api_routes(state.clone())
        .merge(page_routes(state, leptos_options))
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .layer(TraceLayer::new_for_http())
}

async fn redirect_login_to_root() -> Redirect {
    Redirect::temporary("/")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "helpers_test.rs"]
pub(crate) mod test_helpers;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
