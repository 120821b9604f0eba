//! Contract tests for the identity provider adapter against a mock server.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `{base}/v1/sessions:verify` | `session_verification_*` |
//! | POST   | `{base}/v1/idTokens:verify` | `id_token_verification_*` |
//! | POST   | `{base}/v1/sessions:create` | `session_creation_*` |

use std::time::Duration;

use conduct_desk::domain::ports::{IdentityOracle, IdentityOracleError};
use conduct_desk::domain::{IdToken, SessionCredential};
use conduct_desk::outbound::identity::HttpIdentityOracle;
use reqwest::Url;
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "provider-key";

fn oracle(server: &MockServer) -> HttpIdentityOracle {
    let base = Url::parse(&format!("{}/tenant/", server.uri())).expect("mock server url");
    HttpIdentityOracle::new(base, API_KEY, Duration::from_secs(5)).expect("client")
}

fn admin_claims_body() -> serde_json::Value {
    json!({
        "uid": "admin-1",
        "email": "admin@school.id",
        "emailVerified": true,
        "claims": { "admin": true }
    })
}

#[tokio::test]
async fn session_verification_sends_credential_with_revocation_check() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenant/v1/sessions:verify"))
        .and(header("authorization", "Bearer provider-key"))
        .and(body_json(json!({
            "sessionCredential": "cookie-credential",
            "checkRevoked": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(admin_claims_body()))
        .expect(1)
        .mount(&server)
        .await;

    let claims = oracle(&server)
        .verify_session_credential(&SessionCredential::new("cookie-credential"), true)
        .await
        .expect("claims");

    assert_eq!(claims.uid, "admin-1");
    assert_eq!(claims.email.as_deref(), Some("admin@school.id"));
    assert!(claims.admin);
}

#[rstest]
#[case::revoked(
    401,
    json!({"error": {"code": "CREDENTIAL_REVOKED", "message": "revoked"}}),
    "revoked"
)]
#[case::expired(
    401,
    json!({"error": {"code": "CREDENTIAL_EXPIRED", "message": "expired"}}),
    "invalid"
)]
#[case::outage(503, json!({}), "transport")]
#[tokio::test]
async fn session_verification_maps_provider_errors(
    #[case] status: u16,
    #[case] body: serde_json::Value,
    #[case] expected: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenant/v1/sessions:verify"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;

    let error = oracle(&server)
        .verify_session_credential(&SessionCredential::new("cookie-credential"), true)
        .await
        .expect_err("provider error");

    let kind = match error {
        IdentityOracleError::Revoked => "revoked",
        IdentityOracleError::Invalid { .. } => "invalid",
        IdentityOracleError::Transport { .. } => "transport",
    };
    assert_eq!(kind, expected);
}

#[tokio::test]
async fn id_token_verification_checks_revocation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenant/v1/idTokens:verify"))
        .and(header("authorization", "Bearer provider-key"))
        .and(body_json(json!({ "idToken": "fresh-id-token", "checkRevoked": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "uid": "staff-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = IdToken::new("fresh-id-token").expect("token");
    let claims = oracle(&server)
        .verify_id_token(&token, true)
        .await
        .expect("claims");

    assert_eq!(claims.uid, "staff-1");
    assert!(!claims.admin);
}

#[tokio::test]
async fn session_creation_requests_the_given_lifetime() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenant/v1/sessions:create"))
        .and(header("authorization", "Bearer provider-key"))
        .and(body_json(json!({ "idToken": "fresh-id-token", "validDurationSecs": 432_000 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "sessionCredential": "minted-credential" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = IdToken::new("fresh-id-token").expect("token");
    let credential = oracle(&server)
        .create_session_credential(&token, Duration::from_secs(432_000))
        .await
        .expect("credential");

    assert_eq!(credential.expose(), "minted-credential");
}

#[tokio::test]
async fn malformed_success_payload_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tenant/v1/sessions:verify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = oracle(&server)
        .verify_session_credential(&SessionCredential::new("cookie-credential"), true)
        .await
        .expect_err("bad payload");

    assert!(matches!(error, IdentityOracleError::Transport { .. }));
}
