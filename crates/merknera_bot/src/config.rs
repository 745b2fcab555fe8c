//! Bot configuration.

use crate::models::RegistrationParams;
use crate::registration::HttpRegistrar;
use derive_getters::Getters;
use derive_more::{Display, Error};
use merknera_tictactoe::MoveSelector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Game name announced at registration.
pub const GAME: &str = "TICTACTOE";

/// Language tag announced at registration.
pub const PROGRAMMING_LANGUAGE: &str = "Rust";

/// Configuration for the bot process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Coordinating service URL that registration is posted to.
    #[serde(default)]
    base_url: Option<String>,

    /// Token issued by the coordinating service.
    #[serde(default)]
    token: Option<String>,

    /// Bot name announced at registration.
    #[serde(default = "default_bot_name")]
    bot_name: String,

    /// Public URL of this bot's RPC endpoint.
    #[serde(default = "default_rpc_endpoint")]
    rpc_endpoint: String,

    /// Version announced at registration.
    #[serde(default = "default_bot_version")]
    bot_version: String,

    /// Optional website announced at registration.
    #[serde(default)]
    website: Option<String>,

    /// Optional description announced at registration.
    #[serde(default)]
    description: Option<String>,

    /// Interface to listen on.
    #[serde(default = "default_host")]
    host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    port: u16,

    /// Abort startup when registration fails.
    #[serde(default)]
    fail_fast_registration: bool,

    /// Skip the registration call entirely.
    #[serde(default)]
    skip_registration: bool,

    /// Optional search deadline per move, in milliseconds.
    #[serde(default)]
    search_timeout_ms: Option<u64>,
}

fn default_bot_name() -> String {
    "merknera-tictactoe".to_string()
}

fn default_rpc_endpoint() -> String {
    "http://localhost:3003/".to_string()
}

fn default_bot_version() -> String {
    "2.1".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3003
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            bot_name: default_bot_name(),
            rpc_endpoint: default_rpc_endpoint(),
            bot_version: default_bot_version(),
            website: None,
            description: None,
            host: default_host(),
            port: default_port(),
            fail_fast_registration: false,
            skip_registration: false,
            search_timeout_ms: None,
        }
    }
}

impl BotConfig {
    /// Creates a configuration for the given coordinating service.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(bot_name = %config.bot_name, "Config loaded successfully");
        Ok(config)
    }

    /// Sets the bot name.
    pub fn with_bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = bot_name.into();
        self
    }

    /// Sets the public RPC endpoint.
    pub fn with_rpc_endpoint(mut self, rpc_endpoint: impl Into<String>) -> Self {
        self.rpc_endpoint = rpc_endpoint.into();
        self
    }

    /// Sets the announced version.
    pub fn with_bot_version(mut self, bot_version: impl Into<String>) -> Self {
        self.bot_version = bot_version.into();
        self
    }

    /// Sets the optional website and description.
    pub fn with_listing(mut self, website: Option<String>, description: Option<String>) -> Self {
        self.website = website;
        self.description = description;
        self
    }

    /// Sets the listen address.
    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Sets the registration policy.
    pub fn with_registration_policy(mut self, skip: bool, fail_fast: bool) -> Self {
        self.skip_registration = skip;
        self.fail_fast_registration = fail_fast;
        self
    }

    /// Sets the per-move search deadline.
    pub fn with_search_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.search_timeout_ms = timeout_ms;
        self
    }

    /// Builds the move selector this configuration asks for.
    pub fn selector(&self) -> MoveSelector {
        match self.search_timeout_ms {
            Some(ms) => MoveSelector::with_timeout(Duration::from_millis(ms)),
            None => MoveSelector::new(),
        }
    }

    /// Builds the registration payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no token is configured.
    #[instrument(skip(self), fields(bot_name = %self.bot_name))]
    pub fn registration_params(&self) -> Result<RegistrationParams, ConfigError> {
        let token = self
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::new("TOKEN is not set".to_string()))?;

        Ok(RegistrationParams {
            token,
            bot_name: self.bot_name.clone(),
            bot_version: self.bot_version.clone(),
            game: GAME.to_string(),
            rpc_endpoint: self.rpc_endpoint.clone(),
            programming_language: PROGRAMMING_LANGUAGE.to_string(),
            website: self.website.clone(),
            description: self.description.clone(),
        })
    }

    /// Builds the HTTP registrar for the coordinating service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no base URL is configured.
    #[instrument(skip(self))]
    pub fn registrar(&self) -> Result<HttpRegistrar, ConfigError> {
        let base_url = self
            .base_url
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::new("MERKNERA_URL is not set".to_string()))?;
        Ok(HttpRegistrar::new(base_url))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
