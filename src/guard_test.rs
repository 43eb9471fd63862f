use axum::Router;
use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers;

fn default_guard() -> RouteGuard {
    RouteGuard::new("/auth", "/", Vec::<String>::new())
}

fn redirect(to: &str) -> RouteDecision {
    RouteDecision::Redirect(to.to_owned())
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn signed_out_protected_path_redirects_to_auth() {
    assert_eq!(default_guard().decide("/dids", false), redirect("/auth"));
}

#[test]
fn signed_out_auth_path_continues() {
    assert_eq!(default_guard().decide("/auth", false), RouteDecision::Continue);
}

#[test]
fn signed_in_auth_path_redirects_home() {
    assert_eq!(default_guard().decide("/auth", true), redirect("/"));
}

#[test]
fn signed_in_protected_path_continues() {
    assert_eq!(default_guard().decide("/dids", true), RouteDecision::Continue);
}

#[test]
fn signed_out_home_redirects_to_auth() {
    assert_eq!(default_guard().decide("/", false), redirect("/auth"));
}

#[test]
fn empty_path_is_treated_as_root() {
    assert_eq!(default_guard().decide("", false), redirect("/auth"));
    assert_eq!(default_guard().decide("", true), RouteDecision::Continue);
}

#[test]
fn public_paths_match_exactly() {
    let guard = RouteGuard::new("/auth", "/", ["/about"]);
    assert_eq!(guard.decide("/about", false), RouteDecision::Continue);
    assert_eq!(guard.decide("/about/team", false), redirect("/auth"));
    assert_eq!(guard.decide("/auth/", false), redirect("/auth"));
}

#[test]
fn signed_in_may_visit_other_public_paths() {
    let guard = RouteGuard::new("/auth", "/", ["/about"]);
    assert_eq!(guard.decide("/about", true), RouteDecision::Continue);
}

#[test]
fn auth_path_always_public() {
    let guard = RouteGuard::new("/sign-in", "/home", ["/about"]);
    assert!(guard.is_public("/sign-in"));
    assert_eq!(guard.decide("/settings", false), redirect("/sign-in"));
    assert_eq!(guard.decide("/sign-in", true), redirect("/home"));
}

#[test]
fn decide_is_repeatable() {
    let guard = default_guard();
    let first = guard.decide("/settings", false);
    for _ in 0..3 {
        assert_eq!(guard.decide("/settings", false), first);
    }
}

#[test]
fn full_state_table() {
    let guard = default_guard();
    let cases = [
        ("/auth", false, RouteDecision::Continue),
        ("/auth", true, redirect("/")),
        ("/settings", false, redirect("/auth")),
        ("/settings", true, RouteDecision::Continue),
    ];
    for (path, session, expected) in cases {
        assert_eq!(guard.decide(path, session), expected, "path={path} session={session}");
    }
}

// =============================================================================
// gate middleware
// =============================================================================

fn guarded_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "home" }))
        .route("/auth", get(|| async { "auth" }))
        .route("/dids", get(|| async { "dids" }))
        .layer(middleware::from_fn_with_state(state.clone(), gate))
        .with_state(state)
}

async fn send(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut req = axum::http::Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

fn location(res: &Response) -> Option<&str> {
    res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn gate_redirects_signed_out_request() {
    let app = guarded_router(test_helpers::test_app_state());
    let res = send(app, "/dids", None).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/auth"));
}

#[tokio::test]
async fn gate_ignores_query_string() {
    let app = guarded_router(test_helpers::test_app_state());
    let res = send(app, "/auth?next=%2Fdids", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn gate_lets_signed_out_request_reach_auth_page() {
    let app = guarded_router(test_helpers::test_app_state());
    let res = send(app, "/auth", None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn gate_treats_empty_cookie_as_signed_out() {
    let app = guarded_router(test_helpers::test_app_state());
    let res = send(app, "/", Some(&format!("{SESSION_COOKIE}="))).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/auth"));
}

#[tokio::test]
async fn gate_treats_unreachable_session_store_as_signed_out() {
    let app = guarded_router(test_helpers::test_app_state());
    let res = send(app, "/dids", Some(&format!("{SESSION_COOKIE}=deadbeef"))).await;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/auth"));
}
