use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use pocs_core::{Action, GuessError, HangmanSession, WordList, parse_letter};
use pocs_types::{GameError, HangmanView, SessionId};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error(transparent)]
    Guess(#[from] GuessError),
}

impl SessionError {
    pub fn to_game_error(&self) -> GameError {
        match self {
            SessionError::NotFound(session_id) => GameError::SessionNotFound {
                session_id: session_id.to_string(),
            },
            SessionError::Guess(e) => e.to_game_error(),
        }
    }
}

#[derive(Debug)]
struct ActiveSession {
    game: HangmanSession,
    created_at: Instant,
    last_activity: Instant,
}

impl ActiveSession {
    fn new(game: HangmanSession) -> Self {
        let now = Instant::now();
        Self {
            game,
            created_at: now,
            last_activity: now,
        }
    }

    fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

/// Hangman sessions keyed by session id. Each action runs under the write
/// lock, so one session never sees two actions at once.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, ActiveSession>>,
    words: Arc<WordList>,
}

impl SessionManager {
    pub fn new(words: WordList) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            words: Arc::new(words),
        }
    }

    pub async fn create_session(&self) -> (SessionId, HangmanView) {
        let session_id = Uuid::new_v4();
        let mut session = ActiveSession::new(HangmanSession::new(&self.words));
        let view = session.game.render();

        self.sessions.write().await.insert(session_id, session);
        info!("Created hangman session {}", session_id);
        (session_id, view)
    }

    /// Insert a game directly, e.g. one started on a known secret
    pub async fn insert_session(&self, game: HangmanSession) -> SessionId {
        let session_id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(session_id, ActiveSession::new(game));
        session_id
    }

    pub async fn render(&self, session_id: SessionId) -> Result<HangmanView, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        session.update_activity();
        Ok(session.game.render())
    }

    pub async fn apply(
        &self,
        session_id: SessionId,
        action: Action,
    ) -> Result<HangmanView, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        session.update_activity();
        session.game.apply(action, &self.words)?;

        if action == Action::Reset {
            info!("Session {} started a new game", session_id);
        }
        if session.game.outcome().is_terminal() {
            info!("Session {} finished: {:?}", session_id, session.game.outcome());
        }

        Ok(session.game.render())
    }

    pub async fn guess(
        &self,
        session_id: SessionId,
        letter: char,
    ) -> Result<HangmanView, SessionError> {
        self.apply(session_id, Action::Guess(letter)).await
    }

    /// Guess from raw user input. Unknown sessions are reported before bad input.
    pub async fn guess_input(
        &self,
        session_id: SessionId,
        input: &str,
    ) -> Result<HangmanView, SessionError> {
        if !self.sessions.read().await.contains_key(&session_id) {
            return Err(SessionError::NotFound(session_id));
        }
        let letter = parse_letter(input)?;
        self.guess(session_id, letter).await
    }

    pub async fn reset(&self, session_id: SessionId) -> Result<HangmanView, SessionError> {
        self.apply(session_id, Action::Reset).await
    }

    pub async fn lives_remaining(&self, session_id: SessionId) -> Option<u8> {
        let sessions = self.sessions.read().await;
        sessions.get(&session_id).map(|s| s.game.lives_remaining())
    }

    pub async fn session_age(&self, session_id: SessionId) -> Option<Duration> {
        let sessions = self.sessions.read().await;
        sessions.get(&session_id).map(|s| s.created_at.elapsed())
    }

    /// Drop sessions idle for longer than `timeout`, returning how many were removed
    pub async fn cleanup_expired_sessions(&self, timeout: Duration) -> usize {
        let mut expired = Vec::new();

        {
            let sessions = self.sessions.read().await;
            for (session_id, session) in sessions.iter() {
                if session.is_expired(timeout) {
                    expired.push(*session_id);
                }
            }
        }

        if expired.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let mut removed = 0;
        for session_id in expired {
            // Re-check: the session may have been used since the read pass
            if sessions.get(&session_id).is_some_and(|s| s.is_expired(timeout)) {
                sessions.remove(&session_id);
                removed += 1;
                info!("Removed expired session {}", session_id);
            }
        }
        removed
    }

    pub async fn active_session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(WordList::builtin())
    }
}
