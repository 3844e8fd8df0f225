// Wire shapes of the webinar API and their mapping onto `Webinar`

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::ApiError;
use crate::locale;
use crate::models::{parse_duration, Webinar, WebinarStatus};

const DEFAULT_CATEGORY: &str = "Non classé";
const DEFAULT_PRESENTER: &str = "Non renseigné";

/// Field that some backends send as a number and others as a string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(u64),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

/// One webinar as the backend sends it, French or English keys
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWebinar {
    #[serde(alias = "webinaireId")]
    pub id: Scalar,
    #[serde(alias = "titre")]
    pub title: String,
    #[serde(default, alias = "presentateur")]
    pub presenter: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "heure")]
    pub time: Option<String>,
    #[serde(default, alias = "duree")]
    pub duration: Option<Scalar>,
    #[serde(default, alias = "participants")]
    pub attendees: Option<u32>,
    #[serde(default, alias = "categorie")]
    pub category: Option<String>,
    #[serde(default, alias = "statut")]
    pub status: Option<String>,
    #[serde(default, alias = "image", alias = "thumbnailUrl")]
    pub thumbnail: Option<String>,
    #[serde(default, alias = "videoUrl")]
    pub video: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `GET /api/webinaires` and `/api/webinaires/recents`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope {
    Wrapped {
        #[serde(alias = "data", alias = "webinars")]
        webinaires: Vec<RemoteWebinar>,
    },
    Bare(Vec<RemoteWebinar>),
}

impl ListEnvelope {
    pub fn into_items(self) -> Vec<RemoteWebinar> {
        match self {
            ListEnvelope::Wrapped { webinaires } => webinaires,
            ListEnvelope::Bare(items) => items,
        }
    }
}

/// `GET /api/webinaires/{id}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope {
    Wrapped {
        #[serde(alias = "data")]
        webinaire: RemoteWebinar,
    },
    Bare(RemoteWebinar),
}

impl ItemEnvelope {
    pub fn into_item(self) -> RemoteWebinar {
        match self {
            ItemEnvelope::Wrapped { webinaire } => webinaire,
            ItemEnvelope::Bare(item) => item,
        }
    }
}

impl RemoteWebinar {
    /// Map onto the canonical record; media paths are resolved against `base_url`
    pub fn into_webinar(self, base_url: &str) -> Result<Webinar, ApiError> {
        let id = self.id.into_string();

        let scheduled_at = parse_schedule(self.date.as_deref(), self.time.as_deref())
            .ok_or_else(|| {
                ApiError::Decode(format!(
                    "webinar {}: unreadable date {:?} {:?}",
                    id, self.date, self.time
                ))
            })?;

        let duration_minutes = match self.duration {
            Some(Scalar::Number(minutes)) => u32::try_from(minutes).unwrap_or_else(|_| {
                tracing::warn!("webinar {}: duration out of range {}", id, minutes);
                0
            }),
            Some(Scalar::Text(text)) => parse_duration(&text).unwrap_or_else(|| {
                tracing::warn!("webinar {}: unreadable duration {:?}", id, text);
                0
            }),
            None => 0,
        };

        let status = match self.status.as_deref() {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("webinar {}: unknown status {:?}", id, raw);
                WebinarStatus::Upcoming
            }),
            None => WebinarStatus::Upcoming,
        };

        Ok(Webinar {
            title: self.title,
            presenter: non_empty(self.presenter).unwrap_or_else(|| DEFAULT_PRESENTER.to_string()),
            scheduled_at,
            duration_minutes,
            category: non_empty(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            status,
            attendees: self.attendees.unwrap_or(0),
            thumbnail: non_empty(self.thumbnail).map(|p| resolve_media(base_url, &p)),
            video: non_empty(self.video).map(|p| resolve_media(base_url, &p)),
            description: non_empty(self.description),
            id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts RFC 3339, ISO date-time, ISO date plus separate time, or "12 Juin 2023"
pub fn parse_schedule(date: Option<&str>, time: Option<&str>) -> Option<NaiveDateTime> {
    let date = date?.trim();
    let time = time.and_then(locale::parse_time);

    if let Ok(stamp) = DateTime::parse_from_rfc3339(date) {
        return Some(stamp.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(date, format) {
            return Some(stamp);
        }
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| locale::parse_long_date(date))?;

    match time {
        Some(time) => Some(day.and_time(time)),
        None => day.and_hms_opt(0, 0, 0),
    }
}

/// `{base}/uploads/{file}` unless the reference is already absolute or a bundled asset
pub fn resolve_media(base_url: &str, reference: &str) -> String {
    let reference = reference.trim();
    if reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("public/")
    {
        return reference.to_string();
    }

    let file = reference
        .trim_start_matches('/')
        .trim_start_matches("uploads/");
    format!("{}/uploads/{}", base_url.trim_end_matches('/'), file)
}
