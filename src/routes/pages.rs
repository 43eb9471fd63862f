//! Page routes. Each page is a bare HTML shell; the guard decides whether a
//! visitor may see it at all.

use axum::Router;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;

use crate::guard::RouteGuard;
use crate::state::AppState;

/// Page paths and titles. Configured auth/home paths replace the defaults;
/// when two entries share a path the first wins.
pub(crate) fn page_table(guard: &RouteGuard) -> Vec<(String, &'static str)> {
    let mut pages: Vec<(String, &'static str)> = Vec::new();
    for (path, title) in [
        (guard.home_path().to_owned(), "Home"),
        (guard.auth_path().to_owned(), "Sign in"),
        ("/dids".to_owned(), "DIDs"),
        ("/settings".to_owned(), "Settings"),
    ] {
        if !pages.iter().any(|(p, _)| *p == path) {
            pages.push((path, title));
        }
    }
    pages
}

pub(crate) fn render_shell(title: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | didlist</title></head>\n\
         <body><main id=\"app\" data-page=\"{title}\"></main></body>\n</html>\n"
    )
}

/// Page router, without the guard layer.
pub fn routes(guard: &RouteGuard) -> Router<AppState> {
    let mut router = Router::new();
    for (path, title) in page_table(guard) {
        router = router.route(&path, get(move || async move { Html(render_shell(title)) }));
    }
    router.fallback(not_found)
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(render_shell("Not found")))
}
