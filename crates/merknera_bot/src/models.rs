//! Params and result payloads for each RPC method.

use merknera_tictactoe::{Board, Player};
use serde::{Deserialize, Serialize};

/// Reply to `Status.Ping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    /// Always `"OK"`.
    pub ping: String,
}

impl PingResult {
    /// The healthy ping reply.
    pub fn ok() -> Self {
        Self {
            ping: "OK".to_string(),
        }
    }
}

/// Acknowledgement for informational methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    /// Always `"OK"`.
    pub status: String,
}

impl StatusResult {
    /// The plain acknowledgement.
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// Params of `TicTacToe.NextMove`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMoveParams {
    /// Game identifier.
    #[serde(rename = "gameid")]
    pub game_id: i64,
    /// The mark the bot plays.
    pub mark: Player,
    /// Current board, nine cells of `""`, `"X"` or `"O"`.
    #[serde(rename = "gamestate")]
    pub game_state: Board,
}

/// Result of `TicTacToe.NextMove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMoveResult {
    /// Chosen cell (0-8).
    pub position: usize,
}

/// Params of `TicTacToe.Error`. Missing fields read as zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorParams {
    /// Game identifier.
    #[serde(rename = "gameid")]
    pub game_id: i64,
    /// Human-readable description.
    pub message: String,
    /// Server-defined error code.
    #[serde(rename = "errorcode")]
    pub error_code: i64,
}

/// Params of `TicTacToe.Complete`. Missing fields read as zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompleteParams {
    /// Game identifier.
    #[serde(rename = "gameid")]
    pub game_id: i64,
    /// The mark the bot played.
    pub mark: String,
    /// Whether the bot won.
    pub winner: bool,
    /// Final board.
    #[serde(rename = "gamestate")]
    pub game_state: Board,
}

/// Params of `RegistrationService.Register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationParams {
    /// Bearer token issued by the coordinating service.
    pub token: String,
    /// Display name of the bot.
    #[serde(rename = "botname")]
    pub bot_name: String,
    /// Bot version string.
    #[serde(rename = "botversion")]
    pub bot_version: String,
    /// Game the bot plays.
    pub game: String,
    /// URL the server should send RPC requests to.
    #[serde(rename = "rpcendpoint")]
    pub rpc_endpoint: String,
    /// Implementation language tag.
    #[serde(rename = "programminglanguage")]
    pub programming_language: String,
    /// Optional project website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of `RegistrationService.Register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResult {
    /// Server message.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_move_params_decode() {
        let params: NextMoveParams = serde_json::from_value(json!({
            "gameid": 789,
            "mark": "X",
            "gamestate": ["X", "O", "", "", "", "", "", "", ""]
        }))
        .unwrap();
        assert_eq!(params.game_id, 789);
        assert_eq!(params.mark, Player::X);
        assert_eq!(params.game_state.open_cells(), vec![2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_short_board_is_rejected() {
        let result = serde_json::from_value::<NextMoveParams>(json!({
            "gameid": 1,
            "mark": "O",
            "gamestate": ["X", "O", ""]
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("expected 9 cells"), "{}", err);
    }

    #[test]
    fn test_unknown_mark_is_rejected() {
        let result = serde_json::from_value::<NextMoveParams>(json!({
            "gameid": 1,
            "mark": "Z",
            "gamestate": ["", "", "", "", "", "", "", "", ""]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_complete_params_tolerate_missing_fields() {
        let params: CompleteParams = serde_json::from_value(json!({"gameid": 5})).unwrap();
        assert_eq!(params.game_id, 5);
        assert!(!params.winner);
        assert_eq!(params.game_state, Board::new());
    }

    #[test]
    fn test_registration_params_omit_empty_optionals() {
        let params = RegistrationParams {
            token: "t".into(),
            bot_name: "bot".into(),
            bot_version: "2.1".into(),
            game: "TICTACTOE".into(),
            rpc_endpoint: "http://bot/".into(),
            programming_language: "Rust".into(),
            website: None,
            description: None,
        };
        let encoded = serde_json::to_value(&params).unwrap();
        assert_eq!(
            encoded,
            json!({
                "token": "t",
                "botname": "bot",
                "botversion": "2.1",
                "game": "TICTACTOE",
                "rpcendpoint": "http://bot/",
                "programminglanguage": "Rust"
            })
        );
    }
}
