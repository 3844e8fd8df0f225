use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TALENTUP_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub access: AccessConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// File this config was loaded from; `save` writes back there
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// Where webinar data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Mock,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub source: SourceKind,

    #[serde(default = "default_mock_latency")]
    pub mock_latency_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_url")]
    pub url: String,

    #[serde(default = "default_realm")]
    pub realm: String,

    #[serde(default = "default_client_id")]
    pub client_id: String,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,

    #[serde(default = "default_min_validity")]
    pub min_validity_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default = "default_required_roles")]
    pub required_roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_stale_seconds")]
    pub stale_seconds: u64,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_mock_latency() -> u64 {
    1500
}

fn default_identity_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_realm() -> String {
    "talentup".to_string()
}

fn default_client_id() -> String {
    "talentup-frontend".to_string()
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_min_validity() -> u64 {
    30
}

fn default_required_roles() -> Vec<String> {
    vec!["apprenant".to_string(), "admin".to_string()]
}

fn default_stale_seconds() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            source: SourceKind::default(),
            mock_latency_ms: default_mock_latency(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            url: default_identity_url(),
            realm: default_realm(),
            client_id: default_client_id(),
            refresh_interval_seconds: default_refresh_interval(),
            min_validity_seconds: default_min_validity(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            required_roles: default_required_roles(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_seconds: default_stale_seconds(),
        }
    }
}

impl IdentityConfig {
    fn realm_endpoint(&self, action: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/{}",
            self.url.trim_end_matches('/'),
            self.realm,
            action
        )
    }

    pub fn token_endpoint(&self) -> String {
        self.realm_endpoint("token")
    }

    pub fn logout_endpoint(&self) -> String {
        self.realm_endpoint("logout")
    }
}

impl Config {
    /// Get config directory path (~/.talentup/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".talentup"))
    }

    /// Config file path: explicit override, then $TALENTUP_CONFIG, then ~/.talentup/config.toml
    pub fn config_file(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration, falling back to defaults when no file exists yet
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_file = Self::config_file(explicit)?;

        if !config_file.exists() {
            tracing::info!("Config file not found at {:?}, using defaults", config_file);
            return Ok(Self {
                path: Some(config_file),
                ..Self::default()
            });
        }

        let contents = fs::read_to_string(&config_file)
            .with_context(|| format!("Failed to read config file {:?}", config_file))?;

        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.path = Some(config_file);

        Ok(config)
    }

    /// Save configuration to the file it came from
    pub fn save(&self) -> Result<()> {
        let config_file = match &self.path {
            Some(path) => path.clone(),
            None => Self::config_file(None)?,
        };

        if let Some(parent) = config_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        tracing::debug!("Saved config to {:?}", config_file);
        Ok(())
    }

    /// Directory holding the local overlay store, next to the config file
    pub fn data_dir(&self) -> Result<PathBuf> {
        match self.path.as_ref().and_then(|p| p.parent()) {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.join("store")),
            _ => Ok(Self::config_dir()?.join("store")),
        }
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        !self.auth.token.is_empty()
    }

    /// Update auth tokens
    pub fn set_tokens(&mut self, token: String, refresh_token: String) {
        self.auth.token = token;
        self.auth.refresh_token = refresh_token;
    }

    /// Clear auth tokens
    pub fn clear_tokens(&mut self) {
        self.auth.token.clear();
        self.auth.refresh_token.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.source, SourceKind::Mock);
        assert_eq!(config.api.mock_latency_ms, 1500);
        assert_eq!(config.identity.refresh_interval_seconds, 300);
        assert_eq!(config.identity.min_validity_seconds, 30);
        assert_eq!(config.access.required_roles, vec!["apprenant", "admin"]);
        assert_eq!(config.cache.stale_seconds, 60);
    }

    #[test]
    fn test_partial_file_gets_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            source = "http"

            [access]
            required_roles = ["formateur"]
            "#,
        )
        .unwrap();

        assert_eq!(config.api.source, SourceKind::Http);
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.access.required_roles, vec!["formateur"]);
        assert_eq!(config.identity.realm, "talentup");
    }

    #[test]
    fn test_legacy_ui_section_is_ignored() {
        let config: Config = toml::from_str(
            r#"
            [ui]
            theme = "dark"
            date_format = "long"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.source, SourceKind::Mock);

        let written = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!written.contains("[ui]"));
    }

    #[test]
    fn test_identity_endpoints() {
        let mut identity = IdentityConfig::default();
        identity.url = "https://sso.example.com/".to_string();
        assert_eq!(
            identity.token_endpoint(),
            "https://sso.example.com/realms/talentup/protocol/openid-connect/token"
        );
        assert!(identity.logout_endpoint().ends_with("/openid-connect/logout"));
    }

    #[test]
    fn test_save_and_reload_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load(Some(&path)).unwrap();
        assert!(!config.is_authenticated());
        config.set_tokens("access".to_string(), "refresh".to_string());
        config.save().unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.auth.refresh_token, "refresh");
        assert_eq!(reloaded.data_dir().unwrap(), dir.path().join("nested").join("store"));
    }
}
