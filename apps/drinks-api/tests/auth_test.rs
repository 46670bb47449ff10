mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;

use drinks_api::auth::permissions;

// ---------------------------------------------------------------------------
// Header extraction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_authorization_header_is_401() {
    let (app, _state, _keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server.get("/drinks-detail").await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
    assert_eq!(body["message"], "Authorization missing in header.");
}

#[tokio::test]
async fn header_without_token_is_401() {
    let (app, _state, _keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, "Bearer")
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<serde_json::Value>()["message"], "Header malformed.");
}

#[tokio::test]
async fn header_with_three_parts_is_401() {
    let (app, _state, _keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, "Bearer abc def")
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<serde_json::Value>()["message"], "Header malformed.");
}

#[tokio::test]
async fn non_bearer_scheme_is_401() {
    let (app, _state, _keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<serde_json::Value>()["message"], "Bearer type missing.");
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive() {
    let (app, state, keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    common::seed_drink(state.store.as_ref(), "Mocha", &common::mocha_recipe()).await;

    let token = common::mint_token(&keys, &[permissions::GET_DRINKS_DETAIL]);
    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, format!("bEaReR {token}"))
        .await;

    resp.assert_status_ok();
}

// ---------------------------------------------------------------------------
// Token verification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn garbage_token_is_400() {
    let (app, _state, _keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, "Bearer not-a-jwt")
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["error"], 400);
    assert_eq!(body["message"], "Unable to parse authentication token.");
}

#[tokio::test]
async fn unknown_kid_is_key_not_found_not_bad_signature() {
    let (app, _state, keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let token = common::mint_token_with_unknown_kid(&keys, &[permissions::GET_DRINKS_DETAIL]);
    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<serde_json::Value>()["message"],
        "Unable to find the appropriate key."
    );
}

#[tokio::test]
async fn forged_signature_is_401() {
    let (app, _state, _keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    // Same kid as the published key, signed by a key the provider never saw.
    let rogue = common::TestSigningKeys::from_pem(common::ROGUE_KEY_PEM);
    let token = common::mint_token(&rogue, &[permissions::GET_DRINKS_DETAIL]);

    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.json::<serde_json::Value>()["message"],
        "Token signature verification failed."
    );
}

#[tokio::test]
async fn expired_token_is_401_even_with_valid_signature() {
    let (app, _state, keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let token = common::mint_expired_token(&keys, &[permissions::GET_DRINKS_DETAIL]);
    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<serde_json::Value>()["message"], "Token expired.");
}

#[tokio::test]
async fn wrong_audience_is_401() {
    let (app, _state, keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let token =
        common::mint_token_with_audience(&keys, "other-api", &[permissions::GET_DRINKS_DETAIL]);
    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.json::<serde_json::Value>()["message"],
        "Incorrect claims. Please, check the audience and issuer."
    );
}

// ---------------------------------------------------------------------------
// Permission check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn token_without_permissions_claim_is_400() {
    let (app, _state, keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let token = common::mint_token_without_permissions(&keys);
    let resp = server
        .get("/drinks-detail")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<serde_json::Value>()["message"],
        "Permissions not in decoded JWT."
    );
}

#[tokio::test]
async fn missing_required_permission_is_403() {
    let (app, _state, keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    // Holds only the read permission; tries to create.
    let token = common::mint_token(&keys, &[permissions::GET_DRINKS_DETAIL]);
    let resp = server
        .post("/drinks")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&serde_json::json!({
            "title": "Flat White",
            "recipe": [{"color": "white", "name": "milk", "parts": 3}]
        }))
        .await;

    resp.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["error"], 403);
    assert_eq!(
        body["message"],
        "Permission: post:drinks not in decoded JWT."
    );
}

#[tokio::test]
async fn matching_permission_is_authorized() {
    let (app, _state, keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    let token = common::mint_token(&keys, &[permissions::POST_DRINKS]);
    let resp = server
        .post("/drinks")
        .add_header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&serde_json::json!({
            "title": "Flat White",
            "recipe": [{"color": "white", "name": "milk", "parts": 3}]
        }))
        .await;

    resp.assert_status_ok();
    assert_eq!(resp.json::<serde_json::Value>()["success"], true);
}

#[tokio::test]
async fn public_listing_needs_no_token() {
    let (app, state, _keys) = common::test_app();
    let server = TestServer::new(app).unwrap();

    common::seed_drink(state.store.as_ref(), "Mocha", &common::mocha_recipe()).await;

    let resp = server.get("/drinks").await;
    resp.assert_status_ok();
}
