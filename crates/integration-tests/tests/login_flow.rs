//! End-to-end login flow through the full router.
//!
//! Uses an in-memory user store and session store; no database required.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use tower::ServiceExt;

use connexion_core::LoginOutcome;
use connexion_integration_tests::{
    FailingSessionStore, MemoryUserStore, test_app, test_app_with_sessions,
};

const FORM: &str = "application/x-www-form-urlencoded";

fn alice_store() -> MemoryUserStore {
    MemoryUserStore::with_records(&[("alice", "secret1")])
}

async fn post_login(app: &Router, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, FORM)
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::get(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// The `name=value` pair of the session cookie set by a response.
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("connexion_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================================================
// Login Outcomes
// ============================================================================

#[tokio::test]
async fn test_login_success_establishes_session() {
    let app = test_app(alice_store());

    let response = post_login(&app, "login=1&identifier=alice&secret=secret1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie(&response).expect("session cookie should be set");
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let body = body_text(response).await;
    assert!(body.contains(LoginOutcome::Success.message()));

    let account = get(&app, "/account", Some(&cookie)).await;
    assert_eq!(account.status(), StatusCode::OK);
    assert!(body_text(account).await.contains("<strong>alice</strong>"));
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
    let store = alice_store();
    let app = test_app(store.clone());

    let response = post_login(&app, "login=1&identifier=alice&secret=wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    assert!(
        body_text(response)
            .await
            .contains(LoginOutcome::InvalidCredentials.message())
    );
    assert_eq!(store.queries(), 1);
}

#[tokio::test]
async fn test_unknown_identifier_is_rejected() {
    let app = test_app(alice_store());

    let response = post_login(&app, "login=1&identifier=bob&secret=secret1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_identifier_never_queries_store() {
    let store = alice_store();
    let app = test_app(store.clone());

    for body in [
        "login=1&identifier=&secret=secret1",
        "login=1&identifier=alice&secret=",
        "login=1&secret=secret1",
        "login=1",
    ] {
        let response = post_login(&app, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert!(
            body_text(response)
                .await
                .contains(LoginOutcome::MissingField.message())
        );
    }
    assert_eq!(store.queries(), 0);
}

#[tokio::test]
async fn test_unreachable_store_reports_unavailable() {
    let store = alice_store();
    store.set_unreachable(true);
    let app = test_app(store.clone());

    let response = post_login(&app, "login=1&identifier=alice&secret=secret1").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(session_cookie(&response).is_none());
    assert!(
        body_text(response)
            .await
            .contains(LoginOutcome::StoreUnavailable.message())
    );
}

#[tokio::test]
async fn test_submission_without_marker_renders_blank_form() {
    let store = alice_store();
    let app = test_app(store.clone());

    let response = post_login(&app, "identifier=alice&secret=secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());

    let body = body_text(response).await;
    for outcome in LoginOutcome::ALL {
        assert!(!body.contains(outcome.message()));
    }
    assert_eq!(store.queries(), 0);
}

#[tokio::test]
async fn test_legacy_field_names_are_accepted() {
    let app = test_app(alice_store());

    let response = post_login(&app, "connexion=1&pseudo=alice&mdp=secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_repeated_field_keeps_last_value() {
    let app = test_app(alice_store());

    let response = post_login(&app, "login=1&identifier=alice&pseudo=alice&secret=secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_some());

    let response = post_login(&app, "login=1&pseudo=bob&identifier=alice&secret=secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unreadable_body_renders_blank_form() {
    let store = alice_store();
    let app = test_app(store.clone());

    for content_type in [None, Some("text/plain"), Some("application/json")] {
        let mut request = Request::post("/auth/login");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = app
            .clone()
            .oneshot(
                request
                    .body(Body::from("login=1&identifier=alice&secret=secret1"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "content type: {content_type:?}"
        );
        let body = body_text(response).await;
        assert!(body.contains("name=\"identifier\""));
        for outcome in LoginOutcome::ALL {
            assert!(!body.contains(outcome.message()));
        }
    }
    assert_eq!(store.queries(), 0);
}

#[tokio::test]
async fn test_session_store_failure_reports_unavailable() {
    let app = test_app_with_sessions(alice_store(), FailingSessionStore);

    let response = post_login(&app, "login=1&identifier=alice&secret=secret1").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(session_cookie(&response).is_none());
    assert!(
        body_text(response)
            .await
            .contains(LoginOutcome::StoreUnavailable.message())
    );
}

#[tokio::test]
async fn test_escaped_identifier_round_trip() {
    let app = test_app(MemoryUserStore::with_records(&[("&lt;b&gt;bob", "p&amp;ss")]));

    let response = post_login(&app, "login=1&identifier=%3Cb%3Ebob&secret=p%26ss").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();

    let body = body_text(get(&app, "/account", Some(&cookie)).await).await;
    assert!(body.contains("&lt;b&gt;bob"));
    assert!(!body.contains("<b>bob"));
}

#[tokio::test]
async fn test_accented_identifier_matches_entity_encoded_record() {
    let app = test_app(MemoryUserStore::with_records(&[("&eacute;lodie", "caf&eacute;")]));

    let response = post_login(&app, "login=1&identifier=%C3%A9lodie&secret=caf%C3%A9").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();

    let body = body_text(get(&app, "/account", Some(&cookie)).await).await;
    assert!(body.contains("<strong>&eacute;lodie</strong>"));
}

#[tokio::test]
async fn test_repeated_login_is_idempotent() {
    let store = alice_store();
    let app = test_app(store.clone());

    for _ in 0..2 {
        let response = post_login(&app, "login=1&identifier=alice&secret=secret1").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(store.len(), 1);
    assert_eq!(store.queries(), 2);
}

// ============================================================================
// Session Lifecycle
// ============================================================================

#[tokio::test]
async fn test_account_requires_login() {
    let app = test_app(alice_store());

    let response = get(&app, "/account", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}

#[tokio::test]
async fn test_login_issues_new_session_id() {
    let app = test_app(alice_store());

    let first = post_login(&app, "login=1&identifier=alice&secret=secret1").await;
    let old_cookie = session_cookie(&first).unwrap();

    let second = app
        .clone()
        .oneshot(
            Request::post("/auth/login")
                .header(header::CONTENT_TYPE, FORM)
                .header(header::COOKIE, &old_cookie)
                .body(Body::from("login=1&identifier=alice&secret=secret1"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);

    let new_cookie = session_cookie(&second).unwrap();
    assert_ne!(new_cookie, old_cookie);

    let stale = get(&app, "/account", Some(&old_cookie)).await;
    assert_eq!(stale.status(), StatusCode::SEE_OTHER);

    let fresh = get(&app, "/account", Some(&new_cookie)).await;
    assert_eq!(fresh.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = test_app(alice_store());

    let response = post_login(&app, "login=1&identifier=alice&secret=secret1").await;
    let cookie = session_cookie(&response).unwrap();

    let logout = app
        .clone()
        .oneshot(
            Request::post("/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);

    let account = get(&app, "/account", Some(&cookie)).await;
    assert_eq!(account.status(), StatusCode::SEE_OTHER);
}

// ============================================================================
// Surrounding Routes
// ============================================================================

#[tokio::test]
async fn test_login_page_renders_form() {
    let app = test_app(alice_store());

    let response = get(&app, "/auth/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("content-security-policy"));

    let body = body_text(response).await;
    assert!(body.contains("name=\"identifier\""));
    assert!(body.contains("name=\"secret\""));
}

#[tokio::test]
async fn test_root_redirects_to_login() {
    let app = test_app(alice_store());

    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_health_checks() {
    let store = alice_store();
    let app = test_app(store.clone());

    assert_eq!(get(&app, "/health", None).await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/health/ready", None).await.status(), StatusCode::OK);

    store.set_unreachable(true);
    assert_eq!(
        get(&app, "/health/ready", None).await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(get(&app, "/health", None).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = test_app(alice_store());

    let response = get(&app, "/nowhere", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
