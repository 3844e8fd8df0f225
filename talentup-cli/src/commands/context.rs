use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{build_source, QueryClient};
use crate::auth::{AuthError, OidcProvider, Session, SessionContext, SessionManager};
use crate::config::Config;
use crate::models::Webinar;
use crate::routes::{Outcome, Route, Router};
use crate::storage::LocalStore;

/// Everything a command needs: config, live session, data access and the route gate
pub struct AppContext {
    pub config: Config,
    pub session: SessionContext,
    pub manager: Arc<SessionManager>,
    pub query: Arc<QueryClient>,
    pub router: Router,
    store_path: PathBuf,
}

impl AppContext {
    /// Build the context without checking the session
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;

        let session = SessionContext::new(Session::from_config(&config));
        let provider = OidcProvider::new(&config.identity, config.api.timeout_seconds)?;
        let manager = Arc::new(SessionManager::new(
            session.clone(),
            Arc::new(provider),
            config.clone(),
        ));

        let source = build_source(&config, session.clone())?;
        let query = Arc::new(QueryClient::new(
            source,
            Duration::from_secs(config.cache.stale_seconds),
        ));

        let router = Router::new(config.access.required_roles.clone());
        let store_path = LocalStore::db_path(&config)?;

        Ok(Self {
            config,
            session,
            manager,
            query,
            router,
            store_path,
        })
    }

    /// Build the context and pass the guard of `route`
    pub async fn protected(config_path: Option<&Path>, route: Route) -> Result<Self> {
        let ctx = Self::load(config_path)?;
        ctx.enter(route).await?;
        Ok(ctx)
    }

    /// Renew the token if it is about to expire; a failed renewal ends the session
    pub async fn ensure_fresh_token(&self) -> Result<()> {
        if !self.session.snapshot().await.is_authenticated() {
            return Ok(());
        }

        let min_validity = self.config.identity.min_validity_seconds as i64;
        match self.manager.update_token(min_validity).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!("Token refresh failed: {}", e);
                self.manager.terminate().await;
                bail!("Your session has expired ({}). Run `talentup login` again.", e)
            }
        }
    }

    /// Guard a route; errors for login-required and unauthorized outcomes
    pub async fn enter(&self, route: Route) -> Result<Route> {
        self.ensure_fresh_token().await?;

        let session = self.session.snapshot().await;
        match self.router.enter(route, &session) {
            Outcome::Render(route) => Ok(route),
            Outcome::LoginRequired => Err(AuthError::NotAuthenticated.into()),
            Outcome::Redirect(target) => bail!(
                "Access denied: this page requires one of the roles [{}] (your roles: [{}]). Redirected to {}",
                self.router.required_roles().join(", "),
                session.roles().join(", "),
                target.path()
            ),
        }
    }

    pub fn store(&self) -> Result<LocalStore> {
        LocalStore::open(&self.store_path)
    }

    /// Full list with local edits applied
    pub async fn load_webinars(&self) -> Result<Vec<Webinar>> {
        let fetched = self
            .query
            .webinars()
            .await
            .context("Failed to load webinars")?;
        self.store()?.apply(fetched)
    }

    pub async fn webinars(&self) -> Result<Vec<Webinar>> {
        with_spinner("Loading webinars...", self.load_webinars()).await
    }

    /// One webinar, local edits first; `None` when unknown or hidden
    pub async fn webinar(&self, id: &str) -> Result<Option<Webinar>> {
        let store = self.store()?;
        if store.is_hidden(id)? {
            return Ok(None);
        }
        if let Some(local) = store.get_webinar(id)? {
            return Ok(Some(local));
        }
        // The store lock is released before the (possibly slow) fetch
        drop(store);

        with_spinner("Loading webinar...", self.query.webinar(id))
            .await
            .with_context(|| format!("Failed to load webinar {}", id))
    }
}

/// Spinner on stderr while a fetch runs (hidden when stderr is not a terminal)
pub async fn with_spinner<T, F: Future<Output = T>>(message: &str, fut: F) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}
