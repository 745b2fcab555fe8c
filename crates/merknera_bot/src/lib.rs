//! Merknera tic-tac-toe bot.
//!
//! Answers the Merknera game server's JSON-RPC calls over HTTP and picks
//! moves with the exhaustive minimax engine in `merknera_tictactoe`.
//!
//! # Architecture
//!
//! - **Server**: a single `POST /` endpoint built on axum
//! - **Dispatch**: routes `Status.Ping`, `TicTacToe.NextMove`,
//!   `TicTacToe.Error` and `TicTacToe.Complete`; other methods are ignored
//! - **Registration**: one-shot announcement to the coordinating service
//! - **Config**: CLI flags, environment variables or a TOML file
//!
//! # Example
//!
//! ```no_run
//! use merknera_bot::{Dispatcher, server};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3003").await?;
//! server::serve(listener, Arc::new(Dispatcher::default())).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod dispatch;
pub mod models;
mod registration;
pub mod rpc;
pub mod server;

pub use config::{BotConfig, ConfigError, GAME, PROGRAMMING_LANGUAGE};
pub use dispatch::{Dispatch, Dispatcher};
pub use registration::{HttpRegistrar, Registrar, RegistrationError, announce};
pub use rpc::{Method, RpcRequest, RpcResponse};
