use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type SessionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Result of the most recent guess. Drives the one-shot celebration
/// (`Hit`) or failure (`Miss`) animation and is cleared once rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LastGuess {
    #[default]
    None,
    Hit,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EndMessage {
    pub title: String,
    pub detail: String,
}

/// Everything a page needs to draw one hangman render.
/// The secret itself is only revealed through `end_message` once the game is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HangmanView {
    pub masked_word: String,
    pub display_word: String,
    pub word_length: usize,
    pub lives_remaining: u8,
    pub max_lives: u8,
    pub outcome: Outcome,
    pub last_guess: LastGuess,
    pub guessed_letters: Vec<char>,
    pub remaining_letters: Vec<char>,
    pub end_message: Option<EndMessage>,
    pub started_at: String, // ISO 8601 string
}
