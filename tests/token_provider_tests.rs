// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests for access token acquisition and refresh token rotation.

use fitbit_hr_sync::models::TokenGrant;
use fitbit_hr_sync::services::{FitbitClient, RefreshTokenStore, TokenProvider};
use fitbit_hr_sync::SyncError;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::{token_body, TestEnv};

fn provider(env: &TestEnv) -> TokenProvider {
    let client = FitbitClient::new(&env.config.fitbit).expect("Failed to build client");
    let store = RefreshTokenStore::new(env.token_file());
    TokenProvider::new(client, store, &env.config.fitbit)
}

#[tokio::test]
async fn test_refresh_grant_rotates_stored_token() {
    let env = TestEnv::start().await;
    env.seed_refresh_token("abc123");

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(query_param("client_id", "test_client_id"))
        .and(query_param("grant_type", "refresh_token"))
        .and(query_param("refresh_token", "abc123"))
        .and(header(
            "authorization",
            "Basic dGVzdF9jbGllbnRfaWQ6dGVzdF9zZWNyZXQ=",
        ))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-1", "rotated")))
        .expect(1)
        .mount(&env.fitbit)
        .await;

    let access_token = provider(&env).fetch_token().await.unwrap();

    assert_eq!(access_token, "access-1");
    assert_eq!(env.stored_refresh_token().as_deref(), Some("rotated"));
}

#[tokio::test]
async fn test_refresh_token_with_reserved_characters_is_encoded() {
    let env = TestEnv::start().await;
    env.seed_refresh_token("a+b/c=&d");

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(query_param("refresh_token", "a+b/c=&d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-3", "next")))
        .expect(1)
        .mount(&env.fitbit)
        .await;

    let access_token = provider(&env).fetch_token().await.unwrap();

    assert_eq!(access_token, "access-3");
    assert_eq!(env.stored_refresh_token().as_deref(), Some("next"));
}

#[tokio::test]
async fn test_first_run_uses_authorization_code() {
    let env = TestEnv::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(query_param("grant_type", "authorization_code"))
        .and(query_param("redirect_uri", "http://localhost:3000/fitbit"))
        .and(query_param("code", "test_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2", "first")))
        .expect(1)
        .mount(&env.fitbit)
        .await;

    let access_token = provider(&env).fetch_token().await.unwrap();

    assert_eq!(access_token, "access-2");
    assert_eq!(env.stored_refresh_token().as_deref(), Some("first"));
}

#[tokio::test]
async fn test_blank_token_file_counts_as_first_run() {
    let env = TestEnv::start().await;
    env.seed_refresh_token("");

    let grant = provider(&env).grant().await.unwrap();
    assert_eq!(
        grant,
        TokenGrant::AuthorizationCode {
            code: "test_code".to_string(),
            redirect_uri: "http://localhost:3000/fitbit".to_string(),
        }
    );
}

#[tokio::test]
async fn test_first_run_without_code_fails_before_any_request() {
    let mut env = TestEnv::start().await;
    env.config.fitbit.authorization_code = None;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&env.fitbit)
        .await;

    let err = provider(&env).fetch_token().await.unwrap_err();

    match err {
        SyncError::MissingAuthorizationCode { authorize_url } => {
            assert!(authorize_url.starts_with("https://www.fitbit.com/oauth2/authorize?"));
            assert!(authorize_url.contains("client_id=test_client_id"));
        }
        other => panic!("Expected MissingAuthorizationCode, got {other:?}"),
    }
    assert_eq!(env.stored_refresh_token(), None);
}

#[tokio::test]
async fn test_rejected_refresh_reports_status_and_keeps_token() {
    let env = TestEnv::start().await;
    env.seed_refresh_token("abc123");

    let error_body = r#"{"errors":[{"errorType":"invalid_grant","message":"Refresh token invalid"}],"success":false}"#;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(error_body))
        .expect(1)
        .mount(&env.fitbit)
        .await;

    let err = provider(&env).fetch_token().await.unwrap_err();

    match err {
        SyncError::HttpStatus { status, body, .. } => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
    assert_eq!(env.stored_refresh_token().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_undecodable_token_response_is_an_error() {
    let env = TestEnv::start().await;
    env.seed_refresh_token("abc123");

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&env.fitbit)
        .await;

    let err = provider(&env).fetch_token().await.unwrap_err();

    assert!(matches!(err, SyncError::Decode { .. }));
    assert_eq!(env.stored_refresh_token().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_unreachable_token_endpoint_is_transport_error() {
    let mut env = TestEnv::start().await;
    env.config.fitbit.api_url = "http://127.0.0.1:1".to_string();
    env.seed_refresh_token("abc123");

    let err = provider(&env).fetch_token().await.unwrap_err();

    assert!(matches!(err, SyncError::Transport { .. }));
    assert!(err.is_remote());
}
