//! JSON-RPC envelopes exchanged with the Merknera server.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, instrument};

/// Method used to announce the bot to the coordinating service.
pub const REGISTER_METHOD: &str = "RegistrationService.Register";

/// Methods the bot answers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum Method {
    /// Liveness probe.
    #[strum(serialize = "Status.Ping")]
    StatusPing,
    /// Request for the bot's next move.
    #[strum(serialize = "TicTacToe.NextMove")]
    NextMove,
    /// The server reports a problem with a game.
    #[strum(serialize = "TicTacToe.Error")]
    GameError,
    /// The server reports a finished game.
    #[strum(serialize = "TicTacToe.Complete")]
    Complete,
}

/// Inbound request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Method name, e.g. `TicTacToe.NextMove`.
    pub method: String,
    /// Method-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Correlation id, echoed in the response.
    #[serde(default)]
    pub id: i64,
}

impl RpcRequest {
    /// Creates a request envelope.
    pub fn new(method: impl Into<String>, params: Option<Value>, id: i64) -> Self {
        Self {
            method: method.into(),
            params,
            id,
        }
    }
}

/// Outbound request envelope with typed params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct ClientRpcRequest<P> {
    /// Method name.
    #[new(into)]
    pub method: String,
    /// Method-specific payload.
    pub params: P,
    /// Correlation id.
    pub id: i64,
}

/// Response envelope.
///
/// `result` is always written (as `null` on failure); `error` is omitted
/// when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse<T = Value> {
    /// Method-specific result.
    pub result: Option<T>,
    /// Error message, empty on success.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    /// Echoed correlation id.
    #[serde(default)]
    pub id: i64,
}

impl RpcResponse<Value> {
    /// Builds a successful response from any serializable result.
    #[instrument(skip(result))]
    pub fn success(result: impl Serialize, id: i64) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self {
                result: Some(value),
                error: String::new(),
                id,
            },
            Err(e) => {
                error!(error = %e, "Failed to encode result");
                Self::failure(format!("failed to encode result: {}", e), id)
            }
        }
    }
}

impl<T> RpcResponse<T> {
    /// Builds an error response with no result.
    pub fn failure(error: impl Into<String>, id: i64) -> Self {
        Self {
            result: None,
            error: error.into(),
            id,
        }
    }

    /// Whether the response carries an error.
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
