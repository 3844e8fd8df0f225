use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{watch, RwLock};

use super::{AuthError, TokenClaims};
use crate::config::Config;

/// Tokens issued by the identity provider and their decoded claims
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub claims: Option<TokenClaims>,
    /// Client whose `resource_access` roles count towards the user's roles
    pub client_id: String,
}

impl Session {
    pub fn anonymous(client_id: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            ..Self::default()
        }
    }

    pub fn from_tokens(
        access_token: String,
        refresh_token: Option<String>,
        client_id: &str,
    ) -> Result<Self, AuthError> {
        let claims = TokenClaims::decode(&access_token)?;
        Ok(Self {
            access_token: Some(access_token),
            refresh_token: refresh_token.filter(|t| !t.is_empty()),
            claims: Some(claims),
            client_id: client_id.to_string(),
        })
    }

    /// Session stored in the config; an unreadable token counts as logged out
    pub fn from_config(config: &Config) -> Self {
        let client_id = &config.identity.client_id;
        if !config.is_authenticated() {
            return Self::anonymous(client_id);
        }

        match Self::from_tokens(
            config.auth.token.clone(),
            Some(config.auth.refresh_token.clone()),
            client_id,
        ) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring stored access token: {}", e);
                Self::anonymous(client_id)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.claims.is_some()
    }

    pub fn roles(&self) -> Vec<String> {
        self.claims
            .as_ref()
            .map(|c| c.roles(&self.client_id))
            .unwrap_or_default()
    }

    pub fn has_any_role(&self, required: &[String]) -> bool {
        let roles = self.roles();
        required.iter().any(|r| roles.contains(r))
    }

    pub fn seconds_left(&self, now: DateTime<Utc>) -> Option<i64> {
        self.claims.as_ref().and_then(|c| c.seconds_left(now))
    }

    pub fn username(&self) -> Option<&str> {
        self.claims.as_ref().map(|c| c.display_name())
    }
}

/// Lifecycle of the session as seen by running views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Terminated { redirect: String },
}

/// Shared handle on the current session, passed to every component that needs it
#[derive(Clone)]
pub struct SessionContext {
    session: Arc<RwLock<Session>>,
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        let (state, _rx) = watch::channel(SessionState::Active);
        Self {
            session: Arc::new(RwLock::new(session)),
            state: Arc::new(state),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn replace(&self, session: Session) {
        *self.session.write().await = session;
    }

    /// Drop tokens and claims, keeping the client binding
    pub async fn clear(&self) {
        let mut session = self.session.write().await;
        let client_id = std::mem::take(&mut session.client_id);
        *session = Session::anonymous(&client_id);
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_terminated(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Terminated { .. })
    }

    /// Tell every subscriber the session is over and where to go next
    pub fn publish_terminated(&self, redirect: &str) {
        self.state.send_replace(SessionState::Terminated {
            redirect: redirect.to_string(),
        });
    }
}
