//! Parallel root move selection.
//!
//! Every open cell is scored by its own worker on the tokio blocking pool.
//! The `JoinSet` is the single place results are gathered; the selector
//! waits for all workers (or the optional deadline) before choosing.

use crate::error::{EngineError, EngineErrorKind};
use crate::search::{self, Score};
use crate::types::{Board, Player};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// One candidate move and its search score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// Cell index (0-8).
    pub position: usize,
    /// Minimax score from the mover's perspective.
    pub score: Score,
}

/// The outcome of a move selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Chosen cell index (0-8).
    pub position: usize,
    /// Score of the chosen cell, `None` when no worker finished in time.
    pub score: Option<Score>,
    /// Every candidate that finished, in completion order.
    pub scored: Vec<ScoredMove>,
}

/// Picks the best move by scoring each open cell concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSelector {
    timeout: Option<Duration>,
}

impl MoveSelector {
    /// Creates a selector that waits for every worker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selector that stops waiting after `timeout`.
    ///
    /// When the deadline passes, the best finished candidate is played, or
    /// the lowest open cell if none finished. Blocking workers cannot be
    /// interrupted; their results are simply discarded.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// The configured search deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Chooses a move for `player` on `board`.
    ///
    /// Ties go to the first maximal score in completion order, so among
    /// equally good cells the pick may differ between runs.
    ///
    /// # Errors
    ///
    /// [`EngineErrorKind::NoLegalMove`] if the board is full, and
    /// [`EngineErrorKind::Worker`] if a search worker panics.
    #[instrument(skip_all, fields(player = %player, timeout = ?self.timeout))]
    pub async fn select(&self, board: &Board, player: Player) -> Result<Choice, EngineError> {
        let open = board.open_cells();
        let Some(&fallback) = open.first() else {
            warn!("Asked to move on a full board");
            return Err(EngineError::new(EngineErrorKind::NoLegalMove));
        };

        let mut workers = JoinSet::new();
        for position in open.iter().copied() {
            let board = *board;
            workers.spawn_blocking(move || ScoredMove {
                position,
                score: search::score(&board, player, position, player, 0),
            });
        }
        debug!(workers = open.len(), "Spawned search workers");

        let deadline = self.timeout.map(|t| Instant::now() + t);
        let mut scored = Vec::with_capacity(open.len());
        loop {
            let joined = match deadline {
                Some(at) => match tokio::time::timeout_at(at, workers.join_next()).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        warn!(
                            finished = scored.len(),
                            pending = workers.len(),
                            "Search deadline passed"
                        );
                        workers.abort_all();
                        break;
                    }
                },
                None => workers.join_next().await,
            };
            let Some(result) = joined else { break };
            let candidate = result?;
            debug!(
                position = candidate.position,
                score = candidate.score,
                "Worker finished"
            );
            scored.push(candidate);
        }

        let choice = decide(scored, fallback);
        info!(position = choice.position, score = ?choice.score, "Move selected");
        Ok(choice)
    }
}

/// Picks the first maximal candidate, or `fallback` if none finished.
fn decide(scored: Vec<ScoredMove>, fallback: usize) -> Choice {
    let best = scored
        .iter()
        .copied()
        .reduce(|best, c| if c.score > best.score { c } else { best });

    match best {
        Some(best) => Choice {
            position: best.position,
            score: Some(best.score),
            scored,
        },
        None => Choice {
            position: fallback,
            score: None,
            scored,
        },
    }
}

/// Chooses a move for `player` with the default [`MoveSelector`].
#[instrument(skip_all, fields(player = %player))]
pub async fn select_move(board: &Board, player: Player) -> Result<usize, EngineError> {
    MoveSelector::new()
        .select(board, player)
        .await
        .map(|choice| choice.position)
}
