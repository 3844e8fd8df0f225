mod common;

use anyhow::Result;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use talentup_cli::api::{ApiClient, ApiError, HttpSource, QueryClient, QueryKey, WebinarSource};
use talentup_cli::auth::{Session, SessionContext};
use talentup_cli::config::ApiConfig;
use talentup_cli::models::WebinarStatus;
use talentup_cli::services::WebinarDraft;

use common::{access_token, CLIENT_ID};

fn http_source(server: &Server, token: &str) -> Result<HttpSource> {
    let config = ApiConfig {
        base_url: server.url(),
        ..ApiConfig::default()
    };
    let session = Session::from_tokens(token.to_string(), None, CLIENT_ID)?;
    Ok(HttpSource::new(ApiClient::new(
        &config,
        SessionContext::new(session),
    )?))
}

fn french_list() -> String {
    json!({
        "webinaires": [
            {
                "webinaireId": 12,
                "titre": "Docker en pratique",
                "presentateur": "Luc Girard",
                "date": "2024-03-14",
                "heure": "14h30",
                "duree": "1h30",
                "participants": 18,
                "categorie": "DevOps",
                "statut": "à venir",
                "image": "docker.png"
            },
            {
                "id": "13",
                "title": "Kubernetes pour tous",
                "date": "2024-03-20T09:00:00",
                "duration": 60,
                "status": "completed",
                "thumbnail": "https://cdn.example.com/k8s.png"
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_list_sends_bearer_and_normalizes() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    let mock = server
        .mock("GET", "/api/webinaires")
        .match_header("authorization", format!("Bearer {}", token).as_str())
        .with_header("content-type", "application/json")
        .with_body(french_list())
        .create_async()
        .await;

    let source = http_source(&server, &token)?;
    let webinars = source.webinars().await?;
    mock.assert_async().await;

    assert_eq!(webinars.len(), 2);

    let docker = &webinars[0];
    assert_eq!(docker.id, "12");
    assert_eq!(docker.title, "Docker en pratique");
    assert_eq!(docker.presenter, "Luc Girard");
    assert_eq!(docker.duration_minutes, 90);
    assert_eq!(docker.attendees, 18);
    assert_eq!(docker.category, "DevOps");
    assert_eq!(docker.status, WebinarStatus::Upcoming);
    assert_eq!(docker.time_label(), "14:30");
    assert_eq!(
        docker.thumbnail.as_deref(),
        Some(format!("{}/uploads/docker.png", server.url()).as_str())
    );

    let k8s = &webinars[1];
    assert_eq!(k8s.id, "13");
    assert_eq!(k8s.status, WebinarStatus::Completed);
    assert_eq!(k8s.presenter, "Non renseigné");
    assert_eq!(k8s.category, "Non classé");
    assert_eq!(k8s.thumbnail.as_deref(), Some("https://cdn.example.com/k8s.png"));
    Ok(())
}

#[tokio::test]
async fn test_detail_not_found_is_none() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    server
        .mock("GET", "/api/webinaires/404")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/api/webinaires/12")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "webinaire": {
                    "id": 12,
                    "titre": "Docker en pratique",
                    "date": "2024-03-14",
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let source = http_source(&server, &token)?;
    assert!(source.webinar("404").await?.is_none());

    let found = source.webinar("12").await?.unwrap();
    assert_eq!(found.title, "Docker en pratique");
    Ok(())
}

#[tokio::test]
async fn test_detail_id_is_path_encoded() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    let other = server
        .mock("GET", "/api/webinaires/7")
        .match_query(Matcher::Any)
        .with_body(json!({ "id": 7, "title": "Autre", "date": "2024-03-14" }).to_string())
        .expect(0)
        .create_async()
        .await;
    let encoded = server
        .mock("GET", "/api/webinaires/7%3Fx")
        .with_status(404)
        .create_async()
        .await;

    let source = http_source(&server, &token)?;
    assert!(source.webinar("7?x").await?.is_none());

    other.assert_async().await;
    encoded.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_attendee_total_from_remote_list() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    server
        .mock("GET", "/api/webinaires")
        .with_body(
            json!([
                { "id": 1, "title": "a", "date": "2024-03-14", "participants": 4_000_000_000u32 },
                { "id": 2, "title": "b", "date": "2024-03-15", "participants": 1_000_000_000u32 }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let source = http_source(&server, &token)?;
    let stats = source.stats().await?;
    assert_eq!(stats[1].value, "5000000000");
    Ok(())
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    server
        .mock("GET", "/api/webinaires/recents")
        .with_status(401)
        .with_body("token expired")
        .create_async()
        .await;

    let source = http_source(&server, &token)?;
    let err = source.recent_webinars().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(ref msg) if msg == "token expired"));
    Ok(())
}

#[tokio::test]
async fn test_unreadable_body_is_decode_error() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    server
        .mock("GET", "/api/webinaires")
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let source = http_source(&server, &token)?;
    let err = source.webinars().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn test_query_client_caches_until_invalidated() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    let mock = server
        .mock("GET", "/api/webinaires")
        .with_body(french_list())
        .expect(2)
        .create_async()
        .await;

    let source: Arc<dyn WebinarSource> = Arc::new(http_source(&server, &token)?);
    let query = QueryClient::new(source, Duration::from_secs(60));

    assert_eq!(query.webinars().await?.len(), 2);
    assert_eq!(query.webinars().await?.len(), 2);
    assert!(query.is_fresh(&QueryKey::Webinars).await);

    query.invalidate(&QueryKey::Webinars).await;
    assert!(!query.is_fresh(&QueryKey::Webinars).await);
    assert_eq!(query.webinars().await?.len(), 2);

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_submit_posts_multipart_form() -> Result<()> {
    let mut server = Server::new_async().await;
    let token = access_token("jdupont", &["apprenant"], 600);
    let mock = server
        .mock("POST", "/api/webinaires")
        .match_header("authorization", format!("Bearer {}", token).as_str())
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data".to_string()),
        )
        .match_body(Matcher::Regex("Rust en production".to_string()))
        .with_status(201)
        .with_body(r#"{"id": 42}"#)
        .create_async()
        .await;

    let source = http_source(&server, &token)?;
    let draft = WebinarDraft {
        title: "Rust en production".to_string(),
        description: "Retour d'expérience".to_string(),
        category: "backend".to_string(),
        ..Default::default()
    };

    let submitted = source.submit(&draft).await?;
    mock.assert_async().await;
    assert!(matches!(
        submitted,
        talentup_cli::api::Submission::Remote(ref body) if body["id"] == 42
    ));
    Ok(())
}
