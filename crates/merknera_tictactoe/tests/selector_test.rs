//! Tests for parallel move selection.

use std::time::Duration;

use merknera_tictactoe::{Board, EngineErrorKind, MoveSelector, Player, select_move};

fn parse(cells: &str) -> Board {
    cells.parse().expect("Failed to parse board")
}

#[tokio::test]
async fn test_takes_the_immediate_win() {
    let board = parse("X,X,,,,,,,");
    let position = select_move(&board, Player::X).await.expect("Selection failed");
    assert_eq!(position, 2);
}

#[tokio::test]
async fn test_o_takes_the_immediate_win() {
    let board = parse("O,O,,,,,,,");
    let position = select_move(&board, Player::O).await.expect("Selection failed");
    assert_eq!(position, 2);
}

#[tokio::test]
async fn test_prefers_winning_over_blocking() {
    let board = parse("X,X,,O,O,,,,");
    let position = select_move(&board, Player::O).await.expect("Selection failed");
    assert_eq!(position, 5);
}

#[tokio::test]
async fn test_blocks_when_it_cannot_win() {
    let board = parse("X,X,,,O,,,,");
    let choice = MoveSelector::new()
        .select(&board, Player::O)
        .await
        .expect("Selection failed");
    assert_eq!(choice.position, 2);
    assert_eq!(choice.score, Some(0));
}

#[tokio::test]
async fn test_single_open_cell_is_returned() {
    let board = parse("X,O,X,O,X,O,O,X,");
    let position = select_move(&board, Player::X).await.expect("Selection failed");
    assert_eq!(position, 8);
}

#[tokio::test]
async fn test_full_board_is_an_error() {
    let board = parse("X,O,X,O,X,O,O,X,O");
    let err = select_move(&board, Player::X)
        .await
        .expect_err("Full board should not yield a move");
    assert_eq!(err.kind, EngineErrorKind::NoLegalMove);
}

#[tokio::test]
async fn test_any_optimal_move_is_accepted() {
    let board = parse("X,O,,,,,,,");
    let choice = MoveSelector::new()
        .select(&board, Player::X)
        .await
        .expect("Selection failed");
    assert!(
        [3, 4, 6].contains(&choice.position),
        "expected one of 3, 4, 6, got {}",
        choice.position
    );
    assert_eq!(choice.score, Some(6));
}

#[tokio::test]
async fn test_every_open_cell_is_scored() {
    let board = parse("X,O,,,,,,,");
    let choice = MoveSelector::new()
        .select(&board, Player::X)
        .await
        .expect("Selection failed");

    let mut positions: Vec<usize> = choice.scored.iter().map(|m| m.position).collect();
    positions.sort_unstable();
    assert_eq!(positions, board.open_cells());
}

#[tokio::test]
async fn test_empty_board_picks_some_cell() {
    let board = Board::new();
    let choice = MoveSelector::new()
        .select(&board, Player::X)
        .await
        .expect("Selection failed");
    assert!(choice.position < 9);
    assert_eq!(choice.score, Some(0));
    assert_eq!(choice.scored.len(), 9);
}

#[tokio::test]
async fn test_board_is_not_modified() {
    let board = parse("X,,,,O,,,,");
    let before = board;
    select_move(&board, Player::X).await.expect("Selection failed");
    assert_eq!(board, before);
}

#[tokio::test]
async fn test_zero_timeout_still_returns_a_legal_cell() {
    let board = parse("X,O,,,,,,,");
    let selector = MoveSelector::with_timeout(Duration::ZERO);
    assert_eq!(selector.timeout(), Some(Duration::ZERO));

    let choice = selector
        .select(&board, Player::X)
        .await
        .expect("Selection failed");
    assert!(board.is_empty(choice.position));
    if choice.score.is_none() {
        assert_eq!(choice.position, board.open_cells()[0]);
        assert!(choice.scored.is_empty());
    }
}

#[tokio::test]
async fn test_expired_deadline_falls_back_to_lowest_open_cell() {
    let board = Board::new();
    let choice = MoveSelector::with_timeout(Duration::from_nanos(1))
        .select(&board, Player::X)
        .await
        .expect("Selection failed");

    match choice.score {
        None => {
            assert_eq!(choice.position, 0);
            assert!(choice.scored.is_empty());
        }
        Some(score) => {
            assert!(!choice.scored.is_empty());
            assert_eq!(score, 0);
        }
    }
}

#[tokio::test]
async fn test_generous_timeout_matches_untimed_result() {
    let board = parse("X,X,,,,,,,");
    let choice = MoveSelector::with_timeout(Duration::from_secs(30))
        .select(&board, Player::X)
        .await
        .expect("Selection failed");
    assert_eq!(choice.position, 2);
    assert_eq!(choice.score, Some(10));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_selections_do_not_interfere() {
    let cases = [
        ("X,X,,,,,,,", Player::X, 2),
        ("O,O,,,,,,,", Player::O, 2),
        ("X,X,,,O,,,,", Player::O, 2),
        ("X,O,X,O,X,O,O,X,", Player::X, 8),
        (",,,X,X,,O,O,", Player::O, 8),
        (",,,X,X,,O,O,", Player::X, 5),
    ];

    let handles: Vec<_> = cases
        .iter()
        .map(|&(cells, player, _)| {
            let board = parse(cells);
            tokio::spawn(async move { select_move(&board, player).await })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    for ((cells, player, expected), result) in cases.iter().zip(results) {
        let position = result
            .expect("Task panicked")
            .expect("Selection failed");
        assert_eq!(position, *expected, "board {} for {}", cells, player);
    }
}
