use pocs_core::{HangmanSession, MAX_LIVES, WordList};
use pocs_types::Outcome;

/// Creates a test word list with a known set of words
pub fn create_test_words() -> WordList {
    WordList::from_word_list("python\ncloud\nbase\nreseau\nserveur").unwrap()
}

/// Creates a game with a specific secret
pub fn create_game_with_secret(secret: &str) -> HangmanSession {
    HangmanSession::with_secret(secret).unwrap()
}

/// Letters of the alphabet that do not occur in `secret`
pub fn missing_letters(secret: &str) -> Vec<char> {
    let secret = secret.to_uppercase();
    ('A'..='Z').filter(|c| !secret.contains(*c)).collect()
}

/// Distinct letters of `secret` in order of first appearance
pub fn distinct_letters(secret: &str) -> Vec<char> {
    let mut letters = Vec::new();
    for c in secret.to_uppercase().chars() {
        if !letters.contains(&c) {
            letters.push(c);
        }
    }
    letters
}

/// Plays misses until the game is lost
pub fn lose_game(game: &mut HangmanSession) {
    let secret = game.secret().to_string();
    for letter in missing_letters(&secret).into_iter().take(MAX_LIVES as usize) {
        game.guess(letter).unwrap();
    }
}

/// Asserts outcome and lives together
pub fn assert_game_state(game: &HangmanSession, expected_outcome: Outcome, expected_lives: u8) {
    assert_eq!(
        game.outcome(),
        expected_outcome,
        "Expected outcome {:?}, got {:?}",
        expected_outcome,
        game.outcome()
    );
    assert_eq!(
        game.lives_remaining(),
        expected_lives,
        "Expected {} lives, got {}",
        expected_lives,
        game.lives_remaining()
    );
}
