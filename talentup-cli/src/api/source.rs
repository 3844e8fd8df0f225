use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, Timelike};
use reqwest::multipart::{Form, Part};

use super::payload::{ItemEnvelope, ListEnvelope};
use super::{ApiClient, ApiError};
use crate::auth::SessionContext;
use crate::config::{Config, SourceKind};
use crate::locale;
use crate::models::{StatCard, UpcomingWebinar, Webinar, WebinarStatus};
use crate::services::form::{resolve_category, Attachment, WebinarDraft};
use crate::services::seed;

const RECENT_COUNT: usize = 3;
const UPCOMING_COUNT: usize = 4;

/// Outcome of the submission form
#[derive(Debug, Clone)]
pub enum Submission {
    /// Accepted by the backend
    Remote(serde_json::Value),
    /// Built locally; the caller keeps it in the overlay store
    Local(Webinar),
}

/// Per-resource fetch operations behind every view
#[async_trait]
pub trait WebinarSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn webinars(&self) -> Result<Vec<Webinar>, ApiError>;

    /// `None` when no webinar has this id
    async fn webinar(&self, id: &str) -> Result<Option<Webinar>, ApiError>;

    async fn recent_webinars(&self) -> Result<Vec<Webinar>, ApiError>;

    async fn upcoming_webinars(&self) -> Result<Vec<UpcomingWebinar>, ApiError>;

    async fn stats(&self) -> Result<Vec<StatCard>, ApiError>;

    async fn submit(&self, draft: &WebinarDraft) -> Result<Submission, ApiError>;
}

/// Static catalog answered after an artificial delay
pub struct MockSource {
    latency: Duration,
}

impl MockSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl WebinarSource for MockSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }

    async fn webinars(&self) -> Result<Vec<Webinar>, ApiError> {
        self.simulate_latency().await;
        Ok(seed::webinars())
    }

    async fn webinar(&self, id: &str) -> Result<Option<Webinar>, ApiError> {
        self.simulate_latency().await;
        Ok(seed::webinars().into_iter().find(|w| w.id == id))
    }

    async fn recent_webinars(&self) -> Result<Vec<Webinar>, ApiError> {
        self.simulate_latency().await;
        Ok(seed::webinars().into_iter().take(RECENT_COUNT).collect())
    }

    async fn upcoming_webinars(&self) -> Result<Vec<UpcomingWebinar>, ApiError> {
        self.simulate_latency().await;
        Ok(seed::upcoming_webinars())
    }

    async fn stats(&self) -> Result<Vec<StatCard>, ApiError> {
        self.simulate_latency().await;
        Ok(seed::stats())
    }

    async fn submit(&self, draft: &WebinarDraft) -> Result<Submission, ApiError> {
        let category =
            resolve_category(&draft.category).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        // Next full hour, so the new entry shows up as upcoming
        let now = Local::now().naive_local();
        let scheduled_at = now
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .map(|t| t + chrono::Duration::hours(1))
            .unwrap_or(now);

        let mut webinar = Webinar::new(
            draft.title.trim().to_string(),
            "Moi".to_string(),
            scheduled_at,
            60,
            category.to_string(),
            Some(draft.description.trim().to_string()),
        );
        webinar.thumbnail = draft.image.as_ref().map(|a| a.path.display().to_string());
        webinar.video = draft.video.as_ref().map(|a| a.path.display().to_string());

        self.simulate_latency().await;
        Ok(Submission::Local(webinar))
    }
}

/// REST backend; one GET per call, bearer token from the session
pub struct HttpSource {
    api: ApiClient,
}

impl HttpSource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn list(&self, path: &str) -> Result<Vec<Webinar>, ApiError> {
        let envelope: ListEnvelope = self.api.get_json(path).await?;
        envelope
            .into_items()
            .into_iter()
            .map(|item| item.into_webinar(self.api.base_url()))
            .collect()
    }
}

async fn file_part(attachment: &Attachment) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(&attachment.path)
        .await
        .map_err(|e| ApiError::BadRequest(format!("{}: {}", attachment.path.display(), e)))?;

    Part::bytes(bytes)
        .file_name(attachment.file_name())
        .mime_str(attachment.mime.essence_str())
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Summaries of the next scheduled webinars
pub fn upcoming_from(webinars: &[Webinar]) -> Vec<UpcomingWebinar> {
    webinars
        .iter()
        .filter(|w| w.status == WebinarStatus::Upcoming)
        .take(UPCOMING_COUNT)
        .map(|w| UpcomingWebinar {
            title: w.title.clone(),
            date: locale::format_day_month(w.date()),
            time: w.time_label(),
            presenter: w.presenter.clone(),
        })
        .collect()
}

/// Dashboard figures computed from a webinar list
pub fn stats_from(webinars: &[Webinar]) -> Vec<StatCard> {
    let total = webinars.len();
    let attendees: u64 = webinars.iter().map(|w| u64::from(w.attendees)).sum();
    let upcoming = webinars
        .iter()
        .filter(|w| w.status == WebinarStatus::Upcoming)
        .count();
    let completed = webinars
        .iter()
        .filter(|w| w.status == WebinarStatus::Completed)
        .count();
    let completion = if total > 0 { completed * 100 / total } else { 0 };

    let card = |title: &str, value: String| StatCard {
        title: title.to_string(),
        value,
        change: None,
    };

    vec![
        card("Webinaires Totaux", total.to_string()),
        card("Participants", attendees.to_string()),
        card("Sessions à venir", upcoming.to_string()),
        card("Taux d'achèvement", format!("{}%", completion)),
    ]
}

#[async_trait]
impl WebinarSource for HttpSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Http
    }

    async fn webinars(&self) -> Result<Vec<Webinar>, ApiError> {
        self.list("/api/webinaires").await
    }

    async fn webinar(&self, id: &str) -> Result<Option<Webinar>, ApiError> {
        match self
            .api
            .get_json_at::<ItemEnvelope>(&["api", "webinaires", id])
            .await
        {
            Ok(envelope) => envelope
                .into_item()
                .into_webinar(self.api.base_url())
                .map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn recent_webinars(&self) -> Result<Vec<Webinar>, ApiError> {
        self.list("/api/webinaires/recents").await
    }

    async fn upcoming_webinars(&self) -> Result<Vec<UpcomingWebinar>, ApiError> {
        Ok(upcoming_from(&self.webinars().await?))
    }

    async fn stats(&self) -> Result<Vec<StatCard>, ApiError> {
        Ok(stats_from(&self.webinars().await?))
    }

    async fn submit(&self, draft: &WebinarDraft) -> Result<Submission, ApiError> {
        let category =
            resolve_category(&draft.category).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let mut form = Form::new()
            .text("title", draft.title.trim().to_string())
            .text("description", draft.description.trim().to_string())
            .text("category", category.to_string());

        if let Some(image) = &draft.image {
            form = form.part("image", file_part(image).await?);
        }
        if let Some(video) = &draft.video {
            form = form.part("video", file_part(video).await?);
        }

        let body = self.api.post_multipart("/api/webinaires", form).await?;
        Ok(Submission::Remote(body))
    }
}

/// Source selected by `api.source`
pub fn build_source(
    config: &Config,
    session: SessionContext,
) -> anyhow::Result<Arc<dyn WebinarSource>> {
    match config.api.source {
        SourceKind::Mock => Ok(Arc::new(MockSource::new(Duration::from_millis(
            config.api.mock_latency_ms,
        )))),
        SourceKind::Http => Ok(Arc::new(HttpSource::new(ApiClient::new(
            &config.api,
            session,
        )?))),
    }
}
