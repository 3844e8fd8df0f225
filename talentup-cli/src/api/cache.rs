use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::{ApiError, WebinarSource};
use crate::models::{StatCard, UpcomingWebinar, Webinar};

/// Cache key of one request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Webinars,
    Webinar(String),
    Recent,
    Upcoming,
    Stats,
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKey::Webinars => write!(f, "webinars"),
            QueryKey::Webinar(id) => write!(f, "webinar:{}", id),
            QueryKey::Recent => write!(f, "recent"),
            QueryKey::Upcoming => write!(f, "upcoming"),
            QueryKey::Stats => write!(f, "stats"),
        }
    }
}

#[derive(Debug, Clone)]
enum Cached {
    Webinars(Vec<Webinar>),
    Webinar(Option<Webinar>),
    Upcoming(Vec<UpcomingWebinar>),
    Stats(Vec<StatCard>),
}

trait Cacheable: Clone + Sized {
    fn wrap(self) -> Cached;
    fn unwrap(cached: &Cached) -> Option<Self>;
}

impl Cacheable for Vec<Webinar> {
    fn wrap(self) -> Cached {
        Cached::Webinars(self)
    }
    fn unwrap(cached: &Cached) -> Option<Self> {
        match cached {
            Cached::Webinars(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Cacheable for Option<Webinar> {
    fn wrap(self) -> Cached {
        Cached::Webinar(self)
    }
    fn unwrap(cached: &Cached) -> Option<Self> {
        match cached {
            Cached::Webinar(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Cacheable for Vec<UpcomingWebinar> {
    fn wrap(self) -> Cached {
        Cached::Upcoming(self)
    }
    fn unwrap(cached: &Cached) -> Option<Self> {
        match cached {
            Cached::Upcoming(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Cacheable for Vec<StatCard> {
    fn wrap(self) -> Cached {
        Cached::Stats(self)
    }
    fn unwrap(cached: &Cached) -> Option<Self> {
        match cached {
            Cached::Stats(v) => Some(v.clone()),
            _ => None,
        }
    }
}

struct Entry {
    value: Cached,
    fetched_at: Instant,
}

/// Request-keyed cache in front of a `WebinarSource`. Entries stay fresh for
/// `stale_after`; failures are never cached.
pub struct QueryClient {
    source: Arc<dyn WebinarSource>,
    stale_after: Duration,
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryClient {
    pub fn new(source: Arc<dyn WebinarSource>, stale_after: Duration) -> Self {
        Self {
            source,
            stale_after,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &Arc<dyn WebinarSource> {
        &self.source
    }

    async fn query<T, F>(&self, key: QueryKey, fetch: F) -> Result<T, ApiError>
    where
        T: Cacheable,
        F: Future<Output = Result<T, ApiError>>,
    {
        {
            let entries = self.entries.lock().await;
            if let Some(entry) = entries.get(&key) {
                if entry.fetched_at.elapsed() < self.stale_after {
                    if let Some(hit) = T::unwrap(&entry.value) {
                        tracing::debug!("Cache hit for {}", key);
                        return Ok(hit);
                    }
                }
            }
        }

        tracing::debug!("Fetching {}", key);
        let value = fetch.await?;

        self.entries.lock().await.insert(
            key,
            Entry {
                value: value.clone().wrap(),
                fetched_at: Instant::now(),
            },
        );

        Ok(value)
    }

    pub async fn webinars(&self) -> Result<Vec<Webinar>, ApiError> {
        self.query(QueryKey::Webinars, self.source.webinars()).await
    }

    pub async fn webinar(&self, id: &str) -> Result<Option<Webinar>, ApiError> {
        self.query(QueryKey::Webinar(id.to_string()), self.source.webinar(id))
            .await
    }

    pub async fn recent_webinars(&self) -> Result<Vec<Webinar>, ApiError> {
        self.query(QueryKey::Recent, self.source.recent_webinars())
            .await
    }

    pub async fn upcoming_webinars(&self) -> Result<Vec<UpcomingWebinar>, ApiError> {
        self.query(QueryKey::Upcoming, self.source.upcoming_webinars())
            .await
    }

    pub async fn stats(&self) -> Result<Vec<StatCard>, ApiError> {
        self.query(QueryKey::Stats, self.source.stats()).await
    }

    pub async fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .lock()
            .await
            .get(key)
            .map(|e| e.fetched_at.elapsed() < self.stale_after)
            .unwrap_or(false)
    }

    pub async fn invalidate(&self, key: &QueryKey) {
        if self.entries.lock().await.remove(key).is_some() {
            tracing::debug!("Invalidated {}", key);
        }
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Submission, WebinarSource};
    use crate::config::SourceKind;
    use crate::services::form::WebinarDraft;
    use crate::services::seed;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WebinarSource for CountingSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Mock
        }
        async fn webinars(&self) -> Result<Vec<Webinar>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(seed::webinars())
        }
        async fn webinar(&self, id: &str) -> Result<Option<Webinar>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if id == "boom" {
                return Err(ApiError::ServerError("boom".to_string()));
            }
            Ok(seed::webinars().into_iter().find(|w| w.id == id))
        }
        async fn recent_webinars(&self) -> Result<Vec<Webinar>, ApiError> {
            Ok(Vec::new())
        }
        async fn upcoming_webinars(&self) -> Result<Vec<UpcomingWebinar>, ApiError> {
            Ok(Vec::new())
        }
        async fn stats(&self) -> Result<Vec<StatCard>, ApiError> {
            Ok(Vec::new())
        }
        async fn submit(&self, _draft: &WebinarDraft) -> Result<Submission, ApiError> {
            Err(ApiError::Unknown("unused".to_string()))
        }
    }

    fn client(stale_after: Duration) -> (QueryClient, Arc<CountingSource>) {
        let source = Arc::new(CountingSource::default());
        (QueryClient::new(source.clone(), stale_after), source)
    }

    #[tokio::test]
    async fn test_fresh_entries_are_reused() {
        let (client, source) = client(Duration::from_secs(60));

        client.webinars().await.unwrap();
        client.webinars().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(client.is_fresh(&QueryKey::Webinars).await);

        client.invalidate(&QueryKey::Webinars).await;
        client.webinars().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_staleness_always_refetches() {
        let (client, source) = client(Duration::ZERO);
        client.webinars().await.unwrap();
        client.webinars().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_keys_are_per_id_and_errors_not_cached() {
        let (client, source) = client(Duration::from_secs(60));

        assert!(client.webinar("1").await.unwrap().is_some());
        assert!(client.webinar("404").await.unwrap().is_none());
        assert!(client.webinar("boom").await.is_err());
        assert!(client.webinar("boom").await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);

        client.clear().await;
        assert!(!client.is_fresh(&QueryKey::Webinar("1".to_string())).await);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(QueryKey::Webinar("7".to_string()).to_string(), "webinar:7");
        assert_eq!(QueryKey::Upcoming.to_string(), "upcoming");
    }
}
