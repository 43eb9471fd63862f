//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API routes authenticate per handler through the `AuthUser`
//! extractor and answer 401 without a session. Page routes, including the
//! fallback, sit behind the route guard middleware, which redirects instead.

pub mod auth;
pub mod dids;
pub mod pages;
pub mod settings;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, patch, post};
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::state::AppState;

/// JSON API routes.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/sign-up", post(auth::sign_up))
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/api/auth/me", get(auth::me))
        .route("/api/dids", get(dids::list_dids).post(dids::create_did))
        .route("/api/dids/{id}", patch(dids::update_did).delete(dids::delete_did))
        .route("/api/settings", get(settings::get_settings).put(settings::put_settings))
        .route("/api/settings/reset", post(settings::reset_settings))
        .route("/healthz", get(healthz))
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    let pages = pages::routes(&state.guard).layer(middleware::from_fn_with_state(state.clone(), guard::gate));

    api_routes()
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
