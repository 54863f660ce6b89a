
use std::time::Duration;

use pocs_core::{GuessError, HangmanSession, MAX_LIVES};
use pocs_server::session_manager::SessionError;
use pocs_types::{LastGuess, Outcome};
use test_helpers::*;

#[tokio::test]
async fn test_session_creation() {
    let manager = create_test_manager("python");

    let (session_id, view) = manager.create_session().await;
    assert_eq!(view.masked_word, "______");
    assert_eq!(view.lives_remaining, MAX_LIVES);
    assert_eq!(view.remaining_letters.len(), 26);
    assert!(view.end_message.is_none());
    assert_eq!(manager.active_session_count().await, 1);
    assert_eq!(manager.lives_remaining(session_id).await, Some(MAX_LIVES));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let manager = create_test_manager("python");
    let (first, _) = manager.create_session().await;
    let (second, _) = manager.create_session().await;

    manager.guess(first, 'Z').await.unwrap();

    assert_eq!(manager.lives_remaining(first).await, Some(MAX_LIVES - 1));
    assert_eq!(manager.lives_remaining(second).await, Some(MAX_LIVES));
}

#[tokio::test]
async fn test_full_game_win() {
    let manager = create_test_manager("python");
    let (session_id, _) = manager.create_session().await;

    let mut view = None;
    for letter in ['p', 'y', 't', 'h', 'o', 'n'] {
        view = Some(manager.guess(session_id, letter).await.unwrap());
    }
    let view = view.unwrap();

    assert_eq!(view.outcome, Outcome::Won);
    assert_eq!(view.masked_word, "PYTHON");
    assert_eq!(view.last_guess, LastGuess::Hit);
    assert_eq!(view.end_message.unwrap().title, "Gagné :-)");
}

#[tokio::test]
async fn test_full_game_loss_reveals_secret() {
    let manager = create_test_manager("python");
    let (session_id, _) = manager.create_session().await;

    let mut view = None;
    for letter in ['A', 'B', 'C', 'D', 'E', 'F'] {
        view = Some(manager.guess(session_id, letter).await.unwrap());
    }
    let view = view.unwrap();

    assert_eq!(view.outcome, Outcome::Lost);
    assert_eq!(view.lives_remaining, 0);
    assert!(view.end_message.unwrap().detail.contains("PYTHON"));

    let result = manager.guess(session_id, 'P').await;
    assert!(matches!(
        result,
        Err(SessionError::Guess(GuessError::GameOver(Outcome::Lost)))
    ));
    assert_eq!(manager.lives_remaining(session_id).await, Some(0));
}

#[tokio::test]
async fn test_reset_replaces_game() {
    let manager = create_test_manager("cloud");
    let session_id = manager
        .insert_session(HangmanSession::with_secret("BASE").unwrap())
        .await;
    manager.guess(session_id, 'Z').await.unwrap();

    let view = manager.reset(session_id).await.unwrap();
    assert_eq!(view.masked_word, "_____");
    assert_eq!(view.lives_remaining, MAX_LIVES);
    assert!(view.guessed_letters.is_empty());
}

#[tokio::test]
async fn test_unknown_session() {
    let manager = create_test_manager("cloud");
    let session_id = uuid::Uuid::new_v4();

    assert!(matches!(
        manager.render(session_id).await,
        Err(SessionError::NotFound(id)) if id == session_id
    ));
    assert!(manager.guess(session_id, 'A').await.is_err());
    assert!(manager.lives_remaining(session_id).await.is_none());
}

#[tokio::test]
async fn test_cleanup_expired_sessions() {
    let manager = create_test_manager("cloud");
    let (stale, _) = manager.create_session().await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    let (fresh, _) = manager.create_session().await;

    let removed = manager
        .cleanup_expired_sessions(Duration::from_millis(25))
        .await;

    assert_eq!(removed, 1);
    assert!(manager.render(stale).await.is_err());
    assert!(manager.render(fresh).await.is_ok());
}

#[tokio::test]
async fn test_activity_keeps_session_alive() {
    let manager = create_test_manager("cloud");
    let (session_id, _) = manager.create_session().await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    manager.render(session_id).await.unwrap();

    let removed = manager
        .cleanup_expired_sessions(Duration::from_millis(40))
        .await;
    assert_eq!(removed, 0);
    assert!(manager.session_age(session_id).await.unwrap() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_guess_input_checks_session_then_letter() {
    let manager = create_test_manager("cloud");
    let (session_id, _) = manager.create_session().await;

    assert!(matches!(
        manager.guess_input(uuid::Uuid::new_v4(), "AB").await,
        Err(SessionError::NotFound(_))
    ));
    assert!(matches!(
        manager.guess_input(session_id, "AB").await,
        Err(SessionError::Guess(GuessError::NotALetter(input))) if input == "AB"
    ));

    let view = manager.guess_input(session_id, "c").await.unwrap();
    assert_eq!(view.masked_word, "C____");
    assert_eq!(view.lives_remaining, MAX_LIVES);
}
