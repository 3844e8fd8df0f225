use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::guard::LOGIN_ROUTE;
use super::{AuthError, IdentityProvider, Session, SessionContext, SessionState};
use crate::config::{Config, IdentityConfig};

/// Owns the session lifecycle: login, renewal, logout and forced termination.
/// Token changes are written back to the config file.
pub struct SessionManager {
    context: SessionContext,
    provider: Arc<dyn IdentityProvider>,
    config: Mutex<Config>,
}

impl SessionManager {
    pub fn new(context: SessionContext, provider: Arc<dyn IdentityProvider>, config: Config) -> Self {
        Self {
            context,
            provider,
            config: Mutex::new(config),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Copy of the config including the latest tokens
    pub async fn config(&self) -> Config {
        self.config.lock().await.clone()
    }

    async fn client_id(&self) -> String {
        self.config.lock().await.identity.client_id.clone()
    }

    async fn persist(&self, session: &Session) -> Result<(), AuthError> {
        let mut config = self.config.lock().await;
        config.set_tokens(
            session.access_token.clone().unwrap_or_default(),
            session.refresh_token.clone().unwrap_or_default(),
        );
        config
            .save()
            .map_err(|e| AuthError::Persistence(format!("{:#}", e)))
    }

    async fn clear_persisted(&self) -> Result<(), AuthError> {
        let mut config = self.config.lock().await;
        config.clear_tokens();
        config
            .save()
            .map_err(|e| AuthError::Persistence(format!("{:#}", e)))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let tokens = self.provider.login(username, password).await?;
        let session = Session::from_tokens(
            tokens.access_token,
            tokens.refresh_token,
            &self.client_id().await,
        )?;

        self.persist(&session).await?;
        self.context.replace(session.clone()).await;

        tracing::info!("Logged in as {}", session.username().unwrap_or(username));
        Ok(session)
    }

    /// Renew the access token unless it stays valid for more than
    /// `min_validity` seconds. Returns whether a renewal happened.
    pub async fn update_token(&self, min_validity: i64) -> Result<bool, AuthError> {
        let session = self.context.snapshot().await;
        if !session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }

        if let Some(left) = session.seconds_left(Utc::now()) {
            if left >= min_validity {
                tracing::debug!("Token not yet expired ({}s left)", left);
                return Ok(false);
            }
        }

        let refresh_token = session
            .refresh_token
            .clone()
            .ok_or(AuthError::MissingRefreshToken)?;

        let tokens = self.provider.refresh(&refresh_token).await?;
        let renewed = Session::from_tokens(
            tokens.access_token,
            tokens.refresh_token.or(Some(refresh_token)),
            &session.client_id,
        )?;

        self.persist(&renewed).await?;
        tracing::info!(roles = ?renewed.roles(), "Access token refreshed");
        self.context.replace(renewed).await;

        Ok(true)
    }

    /// User-initiated logout. The provider call is best effort, local tokens always go.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let session = self.context.snapshot().await;
        if let Some(refresh_token) = &session.refresh_token {
            if let Err(e) = self.provider.logout(refresh_token).await {
                tracing::warn!("Identity provider logout failed: {}", e);
            }
        }

        self.context.clear().await;
        self.clear_persisted().await?;
        self.context.publish_terminated(LOGIN_ROUTE);
        Ok(())
    }

    /// Forced end of the session after a failed renewal
    pub async fn terminate(&self) {
        if let Err(e) = self.logout().await {
            tracing::warn!("Failed to clear session: {}", e);
            self.context.publish_terminated(LOGIN_ROUTE);
        }
        tracing::warn!("Session terminated, redirecting to {}", LOGIN_ROUTE);
    }
}

/// Background task renewing the token on a fixed interval
pub struct TokenRefresher {
    manager: Arc<SessionManager>,
    interval: Duration,
    min_validity: i64,
}

impl TokenRefresher {
    pub fn new(manager: Arc<SessionManager>, interval: Duration, min_validity: i64) -> Self {
        Self {
            manager,
            interval,
            min_validity,
        }
    }

    pub fn from_config(manager: Arc<SessionManager>, identity: &IdentityConfig) -> Self {
        Self::new(
            manager,
            Duration::from_secs(identity.refresh_interval_seconds.max(1)),
            identity.min_validity_seconds as i64,
        )
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// One renewal attempt per tick; the first failure ends the session and the loop
    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        let mut state = self.manager.context().subscribe();
        if self.manager.context().is_terminated() {
            return;
        }

        tracing::debug!("Token refresh loop started ({:?} interval)", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.manager.update_token(self.min_validity).await {
                        Ok(true) => {}
                        Ok(false) => tracing::debug!("Token still valid, nothing to do"),
                        Err(e) => {
                            tracing::error!("Token refresh failed: {}", e);
                            self.manager.terminate().await;
                            break;
                        }
                    }
                }
                changed = state.changed() => {
                    let ended = changed.is_err()
                        || matches!(*state.borrow(), SessionState::Terminated { .. });
                    if ended {
                        break;
                    }
                }
            }
        }

        tracing::debug!("Token refresh loop stopped");
    }
}
