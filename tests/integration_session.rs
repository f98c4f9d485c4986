mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    FailingLookup, HangingLookup, body_json, portal_lookup, send, setup_state, token_for,
    wait_until_loaded,
};

#[tokio::test]
async fn test_start_session_returns_loading_snapshot() {
    let state = setup_state(Arc::new(HangingLookup));
    let (_, token) = token_for("admin");

    let response = send(&state, "POST", "/api/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = body_json(response).await;
    assert_eq!(body["loading"], true);
    assert!(body["allowed_pages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_loads_derived_paths() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (owner, token) = token_for("admin");

    send(&state, "POST", "/api/session", Some(&token)).await;
    wait_until_loaded(&state, &owner).await;

    let response = send(&state, "GET", "/api/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["loading"], false);
    assert_eq!(
        body["allowed_pages"],
        serde_json::json!(["/admin/daily/attendance", "/admin"])
    );
}

#[tokio::test]
async fn test_fetch_failure_is_default_deny() {
    let state = setup_state(Arc::new(FailingLookup));
    let (owner, token) = token_for("admin");

    send(&state, "POST", "/api/session", Some(&token)).await;
    wait_until_loaded(&state, &owner).await;

    let body = body_json(send(&state, "GET", "/api/session", Some(&token)).await).await;
    assert_eq!(body["loading"], false);
    assert!(body["allowed_pages"].as_array().unwrap().is_empty());

    let body = body_json(
        send(
            &state,
            "GET",
            "/api/access/check?path=/admin",
            Some(&token),
        )
        .await,
    )
    .await;
    assert_eq!(body["state"], "denied");
}

#[tokio::test]
async fn test_get_session_without_start_is_not_found() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (_, token) = token_for("admin");

    let response = send(&state, "GET", "/api/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_requires_token() {
    let state = setup_state(Arc::new(portal_lookup()));

    let response = send(&state, "POST", "/api/session", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&state, "GET", "/api/session", Some("garbage")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_end_session_clears_store() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (owner, token) = token_for("admin");

    send(&state, "POST", "/api/session", Some(&token)).await;
    wait_until_loaded(&state, &owner).await;
    let handle = state.sessions.get(&owner).unwrap();

    let response = send(&state, "DELETE", "/api/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    {
        let store = handle.read().await;
        assert!(store.is_loading());
        assert!(store.allowed_pages().is_empty());
    }
    assert!(state.sessions.get(&owner).is_none());

    let response = send(&state, "GET", "/api/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_end_session_is_idempotent() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (_, token) = token_for("admin");

    let response = send(&state, "DELETE", "/api/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_restarting_session_reloads_permissions() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (owner, token) = token_for("admin");

    send(&state, "POST", "/api/session", Some(&token)).await;
    wait_until_loaded(&state, &owner).await;
    send(&state, "POST", "/api/session", Some(&token)).await;
    wait_until_loaded(&state, &owner).await;

    let body = body_json(send(&state, "GET", "/api/session", Some(&token)).await).await;
    assert_eq!(
        body["allowed_pages"],
        serde_json::json!(["/admin/daily/attendance", "/admin"])
    );
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn test_check_access_states() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (owner, token) = token_for("admin");

    let body = body_json(
        send(&state, "GET", "/api/access/check?path=/admin", Some(&token)).await,
    )
    .await;
    assert_eq!(body["state"], "unknown");

    send(&state, "POST", "/api/session", Some(&token)).await;
    wait_until_loaded(&state, &owner).await;

    let cases = [
        ("/admin/daily/attendance", "allowed"),
        ("/admin/other", "allowed"),
        ("/teacher/grades", "allowed"),
        ("/finance/invoices", "denied"),
    ];
    for (path, expected) in cases {
        let uri = format!("/api/access/check?path={}", path);
        let body = body_json(send(&state, "GET", &uri, Some(&token)).await).await;
        assert_eq!(body["path"], path);
        assert_eq!(body["state"], expected, "unexpected state for {}", path);
    }
}

#[tokio::test]
async fn test_check_access_reports_checking_while_loading() {
    let state = setup_state(Arc::new(HangingLookup));
    let (_, token) = token_for("admin");

    send(&state, "POST", "/api/session", Some(&token)).await;

    let body = body_json(
        send(&state, "GET", "/api/access/check?path=/finance", Some(&token)).await,
    )
    .await;
    assert_eq!(body["state"], "checking");
}

#[tokio::test]
async fn test_check_access_rejects_invalid_path() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (_, token) = token_for("admin");

    let response = send(&state, "GET", "/api/access/check?path=admin", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&state, "GET", "/api/access/check?path=", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&state, "GET", "/api/access/check", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_end_session_twice() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (owner, token) = token_for("admin");

    send(&state, "POST", "/api/session", Some(&token)).await;
    wait_until_loaded(&state, &owner).await;

    for _ in 0..2 {
        let response = send(&state, "DELETE", "/api/session", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_session_expires_with_its_token() {
    let state = setup_state(Arc::new(portal_lookup()));
    let (owner, token) = token_for("admin");
    let (other_owner, other_token) = token_for("registrar");

    send(&state, "POST", "/api/session", Some(&token)).await;
    send(&state, "POST", "/api/session", Some(&other_token)).await;
    wait_until_loaded(&state, &owner).await;
    wait_until_loaded(&state, &other_owner).await;

    // Tokens from `token_for` live for an hour.
    let now = chrono::Utc::now().timestamp() as usize;
    assert_eq!(state.sessions.sweep_expired(now), 0);
    assert_eq!(state.sessions.sweep_expired(now + 7200), 2);

    let response = send(&state, "GET", "/api/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&state, "GET", "/pages/admin", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
