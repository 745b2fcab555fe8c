//! Routes decoded RPC requests to their handlers.

use crate::models::{
    CompleteParams, ErrorParams, NextMoveParams, NextMoveResult, PingResult, StatusResult,
};
use crate::rpc::{Method, RpcRequest, RpcResponse};
use merknera_tictactoe::MoveSelector;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// What the dispatcher did with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Known method, params decoded, reply built.
    Decoded(RpcResponse),
    /// Known method whose params did not match the expected shape.
    DecodeFailed {
        /// Reply to send anyway.
        response: RpcResponse,
        /// Why decoding failed.
        reason: String,
    },
    /// Unknown method; nothing is written back.
    Ignored {
        /// The unrecognized method name.
        method: String,
    },
}

impl Dispatch {
    /// The reply to write, if any.
    pub fn response(&self) -> Option<&RpcResponse> {
        match self {
            Dispatch::Decoded(response) | Dispatch::DecodeFailed { response, .. } => Some(response),
            Dispatch::Ignored { .. } => None,
        }
    }

    /// Consumes the outcome, yielding the reply to write, if any.
    pub fn into_response(self) -> Option<RpcResponse> {
        match self {
            Dispatch::Decoded(response) | Dispatch::DecodeFailed { response, .. } => Some(response),
            Dispatch::Ignored { .. } => None,
        }
    }
}

/// Stateless request handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    selector: MoveSelector,
}

impl Dispatcher {
    /// Creates a dispatcher that picks moves with `selector`.
    pub fn new(selector: MoveSelector) -> Self {
        Self { selector }
    }

    /// Handles one request.
    #[instrument(skip(self, request), fields(method = %request.method, id = request.id))]
    pub async fn handle(&self, request: RpcRequest) -> Dispatch {
        let Ok(method) = request.method.parse::<Method>() else {
            warn!("Request method is of unknown type, ignoring");
            return Dispatch::Ignored {
                method: request.method,
            };
        };

        match method {
            Method::StatusPing => {
                debug!("Status ping");
                Dispatch::Decoded(RpcResponse::success(PingResult::ok(), request.id))
            }
            Method::NextMove => self.next_move(request).await,
            Method::GameError => game_error(request),
            Method::Complete => complete(request),
        }
    }

    async fn next_move(&self, request: RpcRequest) -> Dispatch {
        let id = request.id;
        let params: NextMoveParams = match decode_params(request.params) {
            Ok(params) => params,
            Err(reason) => {
                warn!(%reason, "Invalid NextMove params");
                return Dispatch::DecodeFailed {
                    response: RpcResponse::failure(format!("invalid params: {}", reason), id),
                    reason,
                };
            }
        };

        info!(game_id = params.game_id, mark = %params.mark, "You are playing {}", params.mark);
        debug!(game_id = params.game_id, "Board:\n{}", params.game_state);

        match self.selector.select(&params.game_state, params.mark).await {
            Ok(choice) => {
                for scored in &choice.scored {
                    debug!(
                        game_id = params.game_id,
                        position = scored.position,
                        score = scored.score,
                        "Candidate scored"
                    );
                }
                info!(
                    game_id = params.game_id,
                    position = choice.position,
                    "Chosen move is position {}",
                    choice.position
                );
                Dispatch::Decoded(RpcResponse::success(
                    NextMoveResult {
                        position: choice.position,
                    },
                    id,
                ))
            }
            Err(e) => {
                warn!(game_id = params.game_id, error = %e, "Move selection failed");
                Dispatch::Decoded(RpcResponse::failure(e.kind.to_string(), id))
            }
        }
    }
}

fn game_error(request: RpcRequest) -> Dispatch {
    let id = request.id;
    acknowledge(decode_params::<ErrorParams>(request.params), id, |params| {
        warn!(
            game_id = params.game_id,
            error_code = params.error_code,
            "Game {} encountered error {}: {}",
            params.game_id,
            params.error_code,
            params.message
        );
    })
}

fn complete(request: RpcRequest) -> Dispatch {
    let id = request.id;
    acknowledge(decode_params::<CompleteParams>(request.params), id, |params| {
        let verdict = if params.winner { "won" } else { "did not win" };
        info!(
            game_id = params.game_id,
            mark = %params.mark,
            winner = params.winner,
            "Game {} complete: playing {} we {}",
            params.game_id,
            params.mark,
            verdict
        );
        debug!(game_id = params.game_id, "Final board:\n{}", params.game_state);
    })
}

/// Informational methods log what they got and always reply `OK`.
/// A params mismatch is logged and handled as the zero-valued params.
fn acknowledge<P: Default>(
    decoded: Result<P, String>,
    id: i64,
    report: impl FnOnce(&P),
) -> Dispatch {
    let response = RpcResponse::success(StatusResult::ok(), id);
    match decoded {
        Ok(params) => {
            report(&params);
            Dispatch::Decoded(response)
        }
        Err(reason) => {
            warn!(%reason, "Invalid params, continuing with defaults");
            report(&P::default());
            Dispatch::DecodeFailed { response, reason }
        }
    }
}

/// Decodes a params payload; an absent payload reads as `{}`.
fn decode_params<P: DeserializeOwned>(params: Option<Value>) -> Result<P, String> {
    let value = params.unwrap_or_else(|| Value::Object(Default::default()));
    serde_json::from_value(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: &str, params: Option<Value>, id: i64) -> RpcRequest {
        RpcRequest::new(method, params, id)
    }

    #[tokio::test]
    async fn test_ping() {
        let dispatch = Dispatcher::default()
            .handle(request("Status.Ping", None, 42))
            .await;
        let response = dispatch.response().unwrap();
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"result": {"ping": "OK"}, "id": 42})
        );
    }

    #[tokio::test]
    async fn test_ping_ignores_params() {
        let dispatch = Dispatcher::default()
            .handle(request("Status.Ping", Some(json!([1, 2, 3])), 1))
            .await;
        assert!(matches!(dispatch, Dispatch::Decoded(_)));
    }

    #[tokio::test]
    async fn test_unknown_method_is_ignored() {
        let dispatch = Dispatcher::default()
            .handle(request("TicTacToe.Resign", None, 3))
            .await;
        assert_eq!(
            dispatch,
            Dispatch::Ignored {
                method: "TicTacToe.Resign".to_string()
            }
        );
        assert!(dispatch.response().is_none());
    }

    #[tokio::test]
    async fn test_next_move_without_params_fails_decode() {
        let dispatch = Dispatcher::default()
            .handle(request("TicTacToe.NextMove", None, 9))
            .await;
        match dispatch {
            Dispatch::DecodeFailed { response, reason } => {
                assert_eq!(response.id, 9);
                assert!(response.is_error());
                assert!(response.result.is_none());
                assert!(!reason.is_empty());
            }
            other => panic!("expected DecodeFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_informational_decode_failure_still_acknowledges() {
        let dispatch = complete(request(
            "TicTacToe.Complete",
            Some(json!({"gameid": "not a number"})),
            11,
        ));
        match dispatch {
            Dispatch::DecodeFailed { response, .. } => {
                assert!(!response.is_error());
                assert_eq!(response.result, Some(json!({"status": "OK"})));
                assert_eq!(response.id, 11);
            }
            other => panic!("expected DecodeFailed, got {:?}", other),
        }
    }
}
