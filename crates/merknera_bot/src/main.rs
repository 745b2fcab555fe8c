//! Merknera bot - unified CLI

use anyhow::Result;
use clap::Parser;
use merknera_bot::cli::{BotArgs, Cli, Command};
use merknera_bot::{BotConfig, Dispatcher, announce, server};
use merknera_tictactoe::{Board, Player};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,merknera_bot=debug")),
        )
        .init();

    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Register(args) => run_register(args).await,
        Command::Suggest {
            mark,
            board,
            timeout_ms,
        } => run_suggest(board, mark, timeout_ms).await,
    }
}

/// Register (per policy), then serve RPC requests
#[instrument(skip_all)]
async fn run_serve(args: BotArgs) -> Result<()> {
    let config = args.into_config()?;
    info!(bot_name = %config.bot_name(), "Starting Merknera bot");

    if *config.skip_registration() {
        info!("Registration skipped");
    } else {
        register(&config, *config.fail_fast_registration()).await?;
    }

    let dispatcher = Arc::new(Dispatcher::new(config.selector()));
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    server::serve(listener, dispatcher).await?;

    Ok(())
}

/// Register once and exit
#[instrument(skip_all)]
async fn run_register(args: BotArgs) -> Result<()> {
    let config = args.into_config()?;
    if let Some(message) = register(&config, true).await? {
        println!("{}", message);
    }
    Ok(())
}

/// Registers with the coordinating service.
///
/// Missing connection settings count as a failed registration, so they are
/// only fatal when `fail_fast` is set.
async fn register(config: &BotConfig, fail_fast: bool) -> Result<Option<String>> {
    let prepared = config
        .registrar()
        .and_then(|registrar| Ok((registrar, config.registration_params()?)));

    match prepared {
        Ok((registrar, params)) => Ok(announce(&registrar, &params, fail_fast).await?),
        Err(e) if fail_fast => Err(e.into()),
        Err(e) => {
            warn!(error = %e, "Cannot register, continuing without it");
            Ok(None)
        }
    }
}

/// Pick a move offline and print it
#[instrument(skip(board))]
async fn run_suggest(board: Board, mark: Player, timeout_ms: Option<u64>) -> Result<()> {
    let selector = BotConfig::default()
        .with_search_timeout_ms(timeout_ms)
        .selector();
    let choice = selector.select(&board, mark).await?;

    println!("{}\n", board);
    match choice.score {
        Some(score) => println!("{} plays position {} (score {})", mark, choice.position, score),
        None => println!("{} plays position {} (search timed out)", mark, choice.position),
    }
    Ok(())
}
