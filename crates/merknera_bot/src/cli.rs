//! Command-line interface for merknera_bot.

use crate::config::{BotConfig, ConfigError};
use clap::{Args, Parser, Subcommand};
use merknera_tictactoe::{Board, Player};
use std::path::PathBuf;
use tracing::instrument;

/// Merknera tic-tac-toe bot
#[derive(Parser, Debug)]
#[command(name = "merknera_bot")]
#[command(about = "Minimax tic-tac-toe bot for the Merknera game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register with the coordinating service, then serve RPC requests
    Serve(BotArgs),

    /// Register with the coordinating service and exit
    Register(BotArgs),

    /// Pick a move for a board without starting the server
    Suggest {
        /// Mark to play (X or O)
        #[arg(short, long)]
        mark: Player,

        /// Nine comma-separated cells, e.g. "X,X,,O,O,,,,"
        #[arg(short, long, allow_hyphen_values = true)]
        board: Board,

        /// Optional search deadline in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

/// Connection and listing settings shared by `serve` and `register`.
#[derive(Args, Debug, Clone, Default)]
pub struct BotArgs {
    /// TOML config file; when given, the other flags are ignored
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Coordinating service URL
    #[arg(long, env = "MERKNERA_URL")]
    pub base_url: Option<String>,

    /// Token issued by the coordinating service
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Bot name announced at registration
    #[arg(long, env = "BOTNAME")]
    pub bot_name: Option<String>,

    /// Public URL of this bot's RPC endpoint
    #[arg(long, env = "MY_URL")]
    pub rpc_endpoint: Option<String>,

    /// Version announced at registration
    #[arg(long, env = "BOT_VERSION")]
    pub bot_version: Option<String>,

    /// Website announced at registration
    #[arg(long, env = "BOT_WEBSITE")]
    pub website: Option<String>,

    /// Description announced at registration
    #[arg(long, env = "BOT_DESCRIPTION")]
    pub description: Option<String>,

    /// Interface to listen on
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Abort startup if registration fails
    #[arg(long, env = "FAIL_FAST_REGISTRATION")]
    pub fail_fast_registration: bool,

    /// Do not register on startup
    #[arg(long)]
    pub skip_registration: bool,

    /// Search deadline per move in milliseconds
    #[arg(long, env = "SEARCH_TIMEOUT_MS")]
    pub search_timeout_ms: Option<u64>,
}

impl BotArgs {
    /// Resolves the arguments into a [`BotConfig`].
    ///
    /// A `--config` file wins outright; otherwise unset flags keep the
    /// [`BotConfig`] defaults.
    #[instrument(skip(self), fields(config = ?self.config))]
    pub fn into_config(self) -> Result<BotConfig, ConfigError> {
        if let Some(path) = &self.config {
            return BotConfig::from_file(path);
        }

        let defaults = BotConfig::default();
        let config = BotConfig::new(
            self.base_url.unwrap_or_default(),
            self.token.unwrap_or_default(),
        )
        .with_bot_name(self.bot_name.unwrap_or_else(|| defaults.bot_name().clone()))
        .with_rpc_endpoint(
            self.rpc_endpoint
                .unwrap_or_else(|| defaults.rpc_endpoint().clone()),
        )
        .with_bot_version(
            self.bot_version
                .unwrap_or_else(|| defaults.bot_version().clone()),
        )
        .with_listing(self.website, self.description)
        .with_bind(
            self.host.unwrap_or_else(|| defaults.host().clone()),
            self.port.unwrap_or(*defaults.port()),
        )
        .with_registration_policy(self.skip_registration, self.fail_fast_registration)
        .with_search_timeout_ms(self.search_timeout_ms);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_suggest_parses_board_and_mark() {
        let cli = Cli::try_parse_from([
            "merknera_bot",
            "suggest",
            "--mark",
            "O",
            "--board",
            "X,X,,,O,,,,",
        ])
        .unwrap();
        match cli.command {
            Command::Suggest { mark, board, .. } => {
                assert_eq!(mark, Player::O);
                assert_eq!(board.open_cells(), vec![2, 3, 5, 6, 7, 8]);
            }
            other => panic!("expected suggest, got {:?}", other),
        }
    }

    #[test]
    fn test_args_fill_in_defaults() {
        let args = BotArgs {
            base_url: Some("http://merknera/rpc".to_string()),
            token: Some("secret".to_string()),
            port: Some(4000),
            ..BotArgs::default()
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.port(), &4000);
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.bot_version(), "2.1");
        assert_eq!(config.base_url().as_deref(), Some("http://merknera/rpc"));
    }
}
