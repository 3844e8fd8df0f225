mod common;

use anyhow::Result;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use talentup_cli::auth::{
    guard, AuthError, GuardDecision, OidcProvider, Session, SessionContext, SessionManager,
    SessionState, TokenRefresher,
};
use talentup_cli::config::Config;

use common::{access_token, token_response, CLIENT_ID, LOGOUT_PATH, TOKEN_PATH};

/// Manager wired to a mock identity provider, with the session stored in `dir`
fn manager_for(server: &Server, dir: &TempDir, token: Option<&str>) -> Result<Arc<SessionManager>> {
    let mut config = Config {
        path: Some(dir.path().join("config.toml")),
        ..Config::default()
    };
    config.identity.url = server.url();
    if let Some(token) = token {
        config.set_tokens(token.to_string(), "refresh-1".to_string());
    }
    config.save()?;

    let session = SessionContext::new(Session::from_config(&config));
    let provider = OidcProvider::new(&config.identity, 5)?;
    Ok(Arc::new(SessionManager::new(session, Arc::new(provider), config)))
}

#[tokio::test]
async fn test_login_stores_tokens() -> Result<()> {
    let mut server = Server::new_async().await;
    let issued = access_token("jdupont", &["apprenant"], 300);
    let mock = server
        .mock("POST", TOKEN_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "password".into()),
            Matcher::UrlEncoded("client_id".into(), CLIENT_ID.into()),
            Matcher::UrlEncoded("username".into(), "jdupont".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(token_response(&issued, "refresh-2"))
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let manager = manager_for(&server, &dir, None)?;

    let session = manager.login("jdupont", "secret").await?;
    mock.assert_async().await;

    assert_eq!(session.roles(), vec!["apprenant".to_string()]);
    assert_eq!(session.username(), Some("jdupont Test"));

    let saved = Config::load(Some(&dir.path().join("config.toml")))?;
    assert_eq!(saved.auth.token, issued);
    assert_eq!(saved.auth.refresh_token, "refresh-2");
    Ok(())
}

#[tokio::test]
async fn test_login_rejected() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", TOKEN_PATH)
        .with_status(401)
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid user credentials"}"#)
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let manager = manager_for(&server, &dir, None)?;

    let err = manager.login("jdupont", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials(_)));
    assert_eq!(
        err.to_string(),
        "Invalid credentials: Invalid user credentials (invalid_grant)"
    );
    assert!(!manager.context().snapshot().await.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_expiring_token_is_refreshed() -> Result<()> {
    let mut server = Server::new_async().await;
    let renewed = access_token("jdupont", &["apprenant"], 300);
    let mock = server
        .mock("POST", TOKEN_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "refresh-1".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(token_response(&renewed, "refresh-2"))
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let expiring = access_token("jdupont", &["apprenant"], 10);
    let manager = manager_for(&server, &dir, Some(&expiring))?;

    assert!(manager.update_token(30).await?);
    mock.assert_async().await;

    let session = manager.context().snapshot().await;
    assert_eq!(session.access_token.as_deref(), Some(renewed.as_str()));
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-2"));

    let saved = Config::load(Some(&dir.path().join("config.toml")))?;
    assert_eq!(saved.auth.token, renewed);
    assert_eq!(manager.context().state(), SessionState::Active);
    Ok(())
}

#[tokio::test]
async fn test_valid_token_is_left_alone() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", TOKEN_PATH)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let token = access_token("jdupont", &["apprenant"], 3600);
    let manager = manager_for(&server, &dir, Some(&token))?;

    assert!(!manager.update_token(30).await?);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_token_without_expiry_is_refreshed() -> Result<()> {
    let mut server = Server::new_async().await;
    let renewed = access_token("jdupont", &["apprenant"], 300);
    let mock = server
        .mock("POST", TOKEN_PATH)
        .with_header("content-type", "application/json")
        .with_body(token_response(&renewed, "refresh-2"))
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let no_exp = common::sign(&serde_json::json!({
        "sub": "1",
        "realm_access": { "roles": ["apprenant"] },
    }));
    let manager = manager_for(&server, &dir, Some(&no_exp))?;

    assert!(manager.update_token(30).await?);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_refresh_needs_a_session() -> Result<()> {
    let server = Server::new_async().await;
    let dir = TempDir::new()?;
    let manager = manager_for(&server, &dir, None)?;

    let err = manager.update_token(30).await.unwrap_err();
    assert!(matches!(err, AuthError::NotAuthenticated));
    Ok(())
}

#[tokio::test]
async fn test_failed_refresh_terminates_session() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", TOKEN_PATH)
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant","error_description":"Token is not active"}"#)
        .create_async()
        .await;
    let logout = server
        .mock("POST", LOGOUT_PATH)
        .with_status(204)
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let expiring = access_token("jdupont", &["apprenant"], 10);
    let manager = manager_for(&server, &dir, Some(&expiring))?;

    let refresher = TokenRefresher::new(manager.clone(), Duration::from_millis(20), 30);
    tokio::time::timeout(Duration::from_secs(5), refresher.run()).await?;

    logout.assert_async().await;
    assert_eq!(
        manager.context().state(),
        SessionState::Terminated {
            redirect: "/".to_string()
        }
    );
    assert!(!manager.context().snapshot().await.is_authenticated());

    let saved = Config::load(Some(&dir.path().join("config.toml")))?;
    assert!(saved.auth.token.is_empty());
    assert!(saved.auth.refresh_token.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_refresh_loop_keeps_session_alive() -> Result<()> {
    let mut server = Server::new_async().await;
    let renewed = access_token("jdupont", &["apprenant", "admin"], 10);
    let refresh = server
        .mock("POST", TOKEN_PATH)
        .match_body(Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()))
        .with_header("content-type", "application/json")
        .with_body(token_response(&renewed, "refresh-2"))
        .expect_at_least(2)
        .create_async()
        .await;
    let logout = server
        .mock("POST", LOGOUT_PATH)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let expiring = access_token("jdupont", &["apprenant"], 10);
    let manager = manager_for(&server, &dir, Some(&expiring))?;

    let handle = TokenRefresher::new(manager.clone(), Duration::from_millis(20), 30).spawn();
    tokio::time::sleep(Duration::from_millis(300)).await;
    handle.abort();
    let _ = handle.await;

    refresh.assert_async().await;
    logout.assert_async().await;
    assert_eq!(manager.context().state(), SessionState::Active);

    let session = manager.context().snapshot().await;
    assert!(session.is_authenticated());
    assert_eq!(session.access_token.as_deref(), Some(renewed.as_str()));

    let saved = Config::load(Some(&dir.path().join("config.toml")))?;
    assert_eq!(saved.auth.token, renewed);
    assert_eq!(saved.auth.refresh_token, "refresh-2");
    Ok(())
}

#[tokio::test]
async fn test_refresh_loop_stops_on_logout() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", LOGOUT_PATH)
        .with_status(204)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", TOKEN_PATH)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new()?;
    let token = access_token("jdupont", &["apprenant"], 3600);
    let manager = manager_for(&server, &dir, Some(&token))?;

    let handle = TokenRefresher::new(manager.clone(), Duration::from_secs(60), 30).spawn();
    manager.logout().await?;

    tokio::time::timeout(Duration::from_secs(5), handle).await??;
    refresh.assert_async().await;
    Ok(())
}

fn session_with(realm: &[&str], client: &[&str]) -> Session {
    let token = common::sign(&serde_json::json!({
        "sub": "1",
        "exp": chrono::Utc::now().timestamp() + 600,
        "realm_access": { "roles": realm },
        "resource_access": { CLIENT_ID: { "roles": client } },
    }));
    Session::from_tokens(token, None, CLIENT_ID).unwrap()
}

#[test]
fn test_guard_decisions() {
    let required = vec!["apprenant".to_string(), "admin".to_string()];

    assert_eq!(
        guard(&required, &Session::anonymous(CLIENT_ID)),
        GuardDecision::RedirectToLogin("/".to_string())
    );
    assert_eq!(
        guard(&required, &session_with(&["apprenant"], &[])),
        GuardDecision::Allow
    );
    assert_eq!(
        guard(&required, &session_with(&[], &["admin"])),
        GuardDecision::Allow
    );
    assert_eq!(
        guard(&required, &session_with(&["formateur"], &[])),
        GuardDecision::RedirectUnauthorized("/unauthorized".to_string())
    );
    assert_eq!(guard(&[], &session_with(&[], &[])), GuardDecision::Allow);
}

proptest! {
    #[test]
    fn prop_missing_role_never_allowed(roles in prop::collection::vec("[a-z]{3,10}", 0..5)) {
        let required = vec!["apprenant".to_string(), "admin".to_string()];
        let held: Vec<&str> = roles
            .iter()
            .map(String::as_str)
            .filter(|r| !required.iter().any(|q| q == r))
            .collect();

        let decision = guard(&required, &session_with(&held, &[]));
        prop_assert_eq!(decision, GuardDecision::RedirectUnauthorized("/unauthorized".to_string()));
    }

    #[test]
    fn prop_anonymous_always_sent_to_login(
        required in prop::collection::vec("[a-z]{3,10}", 0..5)
    ) {
        let decision = guard(&required, &Session::anonymous(CLIENT_ID));
        prop_assert_eq!(decision, GuardDecision::RedirectToLogin("/".to_string()));
    }
}
