mod common;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use drinks_api::auth::jwks::JwksClient;
use drinks_api::auth::token::verify_token;
use drinks_api::auth::AuthError;

#[tokio::test]
async fn fetches_keys_from_well_known_endpoint() {
    let keys = common::TestSigningKeys::from_pem(common::TEST_KEY_PEM);

    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keys.jwks_document()))
        .mount(&provider)
        .await;

    let jwks = JwksClient::new(&provider.uri());
    jwks.get_key(common::TEST_KID).await.expect("known key");
}

#[tokio::test]
async fn verifies_token_against_remotely_fetched_key() {
    let keys = common::TestSigningKeys::from_pem(common::TEST_KEY_PEM);

    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keys.jwks_document()))
        .mount(&provider)
        .await;

    let jwks = JwksClient::new(&provider.uri());
    let token = common::mint_token(&keys, &["get:drinks-detail"]);

    let claims = verify_token(
        &token,
        &jwks,
        common::TEST_AUDIENCE,
        &format!("https://{}/", common::TEST_DOMAIN),
    )
    .await
    .expect("valid token");

    assert_eq!(claims.sub, "auth0|tester");
    assert_eq!(
        claims.permissions.as_deref(),
        Some(&["get:drinks-detail".to_string()][..])
    );
}

#[tokio::test]
async fn kid_absent_from_fetched_set_is_key_not_found() {
    let keys = common::TestSigningKeys::from_pem(common::TEST_KEY_PEM);

    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keys.jwks_document()))
        .mount(&provider)
        .await;

    let jwks = JwksClient::new(&provider.uri());
    let err = jwks.get_key("no-such-key").await.unwrap_err();

    assert!(matches!(err, AuthError::KeyNotFound));
}

#[tokio::test]
async fn provider_error_is_key_set_unavailable() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&provider)
        .await;

    let jwks = JwksClient::new(&provider.uri());
    let err = jwks.get_key(common::TEST_KID).await.unwrap_err();

    assert!(matches!(err, AuthError::KeySetUnavailable));
}

#[tokio::test]
async fn unparseable_key_set_is_key_set_unavailable() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&provider)
        .await;

    let jwks = JwksClient::new(&provider.uri());
    let err = jwks.get_key(common::TEST_KID).await.unwrap_err();

    assert!(matches!(err, AuthError::KeySetUnavailable));
}

#[tokio::test]
async fn non_signing_and_non_rsa_keys_are_skipped() {
    let keys = common::TestSigningKeys::from_pem(common::TEST_KEY_PEM);

    let document = serde_json::json!({
        "keys": [
            {"kid": "enc-key", "kty": "RSA", "use": "enc", "n": keys.n, "e": keys.e},
            {"kid": "okp-key", "kty": "OKP", "use": "sig", "crv": "Ed25519", "x": "AA"},
            {"kid": common::TEST_KID, "kty": "RSA", "use": "sig", "n": keys.n, "e": keys.e}
        ]
    });

    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document))
        .mount(&provider)
        .await;

    let jwks = JwksClient::new(&provider.uri());
    jwks.get_key(common::TEST_KID).await.expect("signing key kept");

    let err = jwks.get_key("enc-key").await.unwrap_err();
    assert!(matches!(err, AuthError::KeyNotFound));
}
