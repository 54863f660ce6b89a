use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use pocs_types::{EndMessage, GameError, HangmanView, LastGuess, Outcome};
use rand::Rng;
use tracing::debug;

use crate::word_list::{WordList, WordListError, normalize_word};

pub const MAX_LIVES: u8 = 6;
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Guess(char),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("'{0}' is not a letter")]
    NotALetter(String),
    #[error("letter '{0}' was already guessed")]
    AlreadyGuessed(char),
    #[error("game is over ({0:?})")]
    GameOver(Outcome),
}

impl GuessError {
    pub fn to_game_error(&self) -> GameError {
        match self {
            GuessError::NotALetter(input) => GameError::NotALetter {
                letter: input.clone(),
            },
            GuessError::AlreadyGuessed(letter) => {
                GameError::LetterAlreadyGuessed { letter: *letter }
            }
            GuessError::GameOver(_) => GameError::GameAlreadyCompleted,
        }
    }
}

/// Parse user input into a single guessable letter.
///
/// Exactly one character is accepted; letter-ness is checked by [`HangmanSession::guess`].
pub fn parse_letter(input: &str) -> Result<char, GuessError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(GuessError::NotALetter(input.to_string())),
    }
}

/// State of one hangman game. A rejected guess leaves every field untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HangmanSession {
    secret: String,
    guessed: BTreeSet<char>,
    lives: u8,
    outcome: Outcome,
    last_guess: LastGuess,
    started_at: DateTime<Utc>,
}

impl HangmanSession {
    pub fn new(words: &WordList) -> Self {
        Self::new_with_rng(words, &mut rand::thread_rng())
    }

    pub fn new_with_rng<R: Rng + ?Sized>(words: &WordList, rng: &mut R) -> Self {
        Self::fresh(words.choose(rng).to_string())
    }

    /// Start a game on a known secret
    pub fn with_secret(secret: &str) -> Result<Self, WordListError> {
        Ok(Self::fresh(normalize_word(secret)?))
    }

    fn fresh(secret: String) -> Self {
        Self {
            secret,
            guessed: BTreeSet::new(),
            lives: MAX_LIVES,
            outcome: Outcome::InProgress,
            last_guess: LastGuess::None,
            started_at: Utc::now(),
        }
    }

    pub fn reset(&mut self, words: &WordList) {
        self.reset_with_rng(words, &mut rand::thread_rng());
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, words: &WordList, rng: &mut R) {
        *self = Self::new_with_rng(words, rng);
    }

    pub fn guess(&mut self, letter: char) -> Result<LastGuess, GuessError> {
        if self.outcome.is_terminal() {
            return Err(GuessError::GameOver(self.outcome));
        }
        if !letter.is_ascii_alphabetic() {
            return Err(GuessError::NotALetter(letter.to_string()));
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }

        if self.secret.contains(letter) {
            self.last_guess = LastGuess::Hit;
            if self.is_word_revealed() {
                self.outcome = Outcome::Won;
            }
        } else {
            self.last_guess = LastGuess::Miss;
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.outcome = Outcome::Lost;
            }
        }

        debug!(
            "Guess {}: {:?}, {} lives left, {:?}",
            letter, self.last_guess, self.lives, self.outcome
        );
        Ok(self.last_guess)
    }

    pub fn apply(&mut self, action: Action, words: &WordList) -> Result<(), GuessError> {
        match action {
            Action::Guess(letter) => self.guess(letter).map(|_| ()),
            Action::Reset => {
                self.reset(words);
                Ok(())
            }
        }
    }

    /// The secret with every un-guessed letter replaced by `_`
    pub fn masked_word(&self) -> String {
        self.secret
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { PLACEHOLDER })
            .collect()
    }

    /// Masked word spaced out for display, e.g. `P _ _ H _ N`
    pub fn display_word(&self) -> String {
        let chars: Vec<String> = self.masked_word().chars().map(String::from).collect();
        chars.join(" ")
    }

    pub fn remaining_letter_choices(&self) -> Vec<char> {
        ('A'..='Z').filter(|c| !self.guessed.contains(c)).collect()
    }

    pub fn take_last_guess(&mut self) -> LastGuess {
        std::mem::take(&mut self.last_guess)
    }

    fn is_word_revealed(&self) -> bool {
        self.secret.chars().all(|c| self.guessed.contains(&c))
    }

    pub fn end_message(&self) -> Option<EndMessage> {
        match self.outcome {
            Outcome::InProgress => None,
            Outcome::Won => Some(EndMessage {
                title: "Gagné :-)".to_string(),
                detail: "Vous avez deviné le mot!".to_string(),
            }),
            Outcome::Lost => Some(EndMessage {
                title: "Perdu :-(".to_string(),
                detail: format!("Le mot à trouver était : {}.", self.secret),
            }),
        }
    }

    /// Build the view for one render. Consumes the last guess result so the
    /// animation it drives plays exactly once.
    pub fn render(&mut self) -> HangmanView {
        let last_guess = self.take_last_guess();
        HangmanView {
            masked_word: self.masked_word(),
            display_word: self.display_word(),
            word_length: self.secret.chars().count(),
            lives_remaining: self.lives,
            max_lives: MAX_LIVES,
            outcome: self.outcome,
            last_guess,
            guessed_letters: self.guessed.iter().copied().collect(),
            remaining_letters: self.remaining_letter_choices(),
            end_message: self.end_message(),
            started_at: self.started_at.to_rfc3339(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn lives_remaining(&self) -> u8 {
        self.lives
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn last_guess(&self) -> LastGuess {
        self.last_guess
    }
}

/// Apply one action to a copy of `state`, leaving the original untouched.
pub fn apply(
    state: &HangmanSession,
    action: Action,
    words: &WordList,
) -> Result<HangmanSession, GuessError> {
    let mut next = state.clone();
    next.apply(action, words)?;
    Ok(next)
}
