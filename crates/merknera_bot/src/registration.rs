//! One-shot registration with the coordinating service.

use crate::models::{RegistrationParams, RegistrationResult};
use crate::rpc::{ClientRpcRequest, REGISTER_METHOD, RpcResponse};
use async_trait::async_trait;
use derive_more::{Display, Error};
use reqwest::header::ACCEPT;
use tracing::{debug, error, info, instrument, warn};

/// Announces the bot to the coordinating service.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Registers the bot and returns the server's message.
    async fn register(&self, params: &RegistrationParams) -> Result<String, RegistrationError>;
}

/// Registrar that posts a JSON-RPC request over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRegistrar {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRegistrar {
    /// Creates a registrar posting to `base_url`.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        debug!("Creating HTTP registrar");
        Self {
            base_url: base_url.as_ref().to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Registrar for HttpRegistrar {
    #[instrument(skip(self, params), fields(base_url = %self.base_url, bot_name = %params.bot_name))]
    async fn register(&self, params: &RegistrationParams) -> Result<String, RegistrationError> {
        let body = ClientRpcRequest::new(REGISTER_METHOD, params, 1);
        debug!("Sending registration request");

        let response = self
            .client
            .post(&self.base_url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&params.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Registration request failed");
                RegistrationError::new(format!("Registration request failed: {}", e))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read registration response");
            RegistrationError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %text, "Registration rejected");
            return Err(RegistrationError::new(format!(
                "Registration rejected with {}: {}",
                status, text
            )));
        }

        let envelope: RpcResponse<RegistrationResult> = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, response = %text, "Failed to parse registration response");
            RegistrationError::new(format!("Failed to parse response: {}", e))
        })?;

        if envelope.is_error() {
            return Err(RegistrationError::new(format!(
                "Registration refused: {}",
                envelope.error
            )));
        }

        let message = envelope.result.unwrap_or_default().message;
        info!(%message, "Registration acknowledged");
        Ok(message)
    }
}

/// Registers on startup, applying the failure policy.
///
/// With `fail_fast` unset a failed registration is logged and startup goes
/// on (`Ok(None)`); with it set the error is returned.
#[instrument(skip(registrar, params), fields(bot_name = %params.bot_name))]
pub async fn announce(
    registrar: &dyn Registrar,
    params: &RegistrationParams,
    fail_fast: bool,
) -> Result<Option<String>, RegistrationError> {
    match registrar.register(params).await {
        Ok(message) => {
            info!("Registration complete, tic-tac-toe has begun");
            Ok(Some(message))
        }
        Err(e) if fail_fast => Err(e),
        Err(e) => {
            warn!(error = %e, "Registration failed, continuing without it");
            Ok(None)
        }
    }
}

/// Registration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Registration error: {} at {}:{}", message, file, line)]
pub struct RegistrationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RegistrationError {
    /// Creates a new registration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "Registration error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
