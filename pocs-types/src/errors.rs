use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    SessionNotFound { session_id: String },
    NotALetter { letter: String },
    LetterAlreadyGuessed { letter: char },
    GameAlreadyCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DataError {
    UpstreamUnavailable { message: String },
    CommuneNotFound { name: String },
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    pub game_error: Option<GameError>,
    pub data_error: Option<DataError>,
}

impl ErrorResponse {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            game_error: None,
            data_error: None,
        }
    }

    pub fn game(error: impl Into<String>, game_error: GameError) -> Self {
        Self {
            error: error.into(),
            game_error: Some(game_error),
            data_error: None,
        }
    }

    pub fn data(error: impl Into<String>, data_error: DataError) -> Self {
        Self {
            error: error.into(),
            game_error: None,
            data_error: Some(data_error),
        }
    }
}
