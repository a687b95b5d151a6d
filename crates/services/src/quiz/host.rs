use tracing::warn;

use quiz_core::model::{Flashcard, SessionResult, SetId, UserId};
use storage::repository::StorageError;

use super::lifecycle::{QuizSession, QuizView};
use super::progress::SessionProgress;
use super::workflow::QuizLoopService;
use crate::error::QuizError;

/// Handle for one in-flight flashcard fetch.
///
/// A ticket is only honoured while it belongs to the host's current load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    user: UserId,
    set: SetId,
}

impl LoadTicket {
    #[must_use]
    pub fn user(&self) -> &UserId {
        &self.user
    }

    #[must_use]
    pub fn set(&self) -> &SetId {
        &self.set
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadApplied {
    Applied(SessionProgress),
    /// The ticket was superseded or the host was torn down; the fetch result was dropped.
    Stale,
}

/// Owns the current quiz session for one `(user, set)` and routes UI intents to it.
///
/// Fetch results are matched against the load that requested them, so a
/// result arriving after a teardown or a newer load is discarded.
pub struct QuizHost {
    service: QuizLoopService,
    user: UserId,
    set: SetId,
    session: Option<QuizSession>,
    generation: u64,
}

impl QuizHost {
    #[must_use]
    pub fn new(service: QuizLoopService, user: UserId, set: SetId) -> Self {
        Self {
            service,
            user,
            set,
            session: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Install a fresh `Loading` session and hand out the ticket for its fetch.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.session = Some(self.service.new_session());
        LoadTicket {
            generation: self.generation,
            user: self.user.clone(),
            set: self.set.clone(),
        }
    }

    /// Apply the outcome of the fetch started by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::FetchFailed` when the fetch failed; the session
    /// stays in `Loading`.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        outcome: Result<Vec<Flashcard>, StorageError>,
    ) -> Result<LoadApplied, QuizError> {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale flashcard fetch"
            );
            return Ok(LoadApplied::Stale);
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(LoadApplied::Stale);
        };

        self.service
            .apply_fetch(session, outcome)
            .map(LoadApplied::Applied)
    }

    /// Start a new session and load it: fetch, build, activate.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::FetchFailed` if the fetch fails.
    pub async fn reload(&mut self) -> Result<SessionProgress, QuizError> {
        let ticket = self.begin_load();
        let outcome = self.service.fetch(ticket.user(), ticket.set()).await;
        match self.complete_load(&ticket, outcome)? {
            LoadApplied::Applied(progress) => Ok(progress),
            LoadApplied::Stale => Err(QuizError::NoSession),
        }
    }

    /// Discard the current session and start over with a fresh fetch and shuffle.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::FetchFailed` if the fetch fails.
    pub async fn retake(&mut self) -> Result<SessionProgress, QuizError> {
        self.teardown();
        self.reload().await
    }

    /// Drop the current session. Pending fetches become stale.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.session = None;
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoSession` without a session, otherwise see
    /// [`QuizSession::select`].
    pub fn select(&mut self, index: usize, option: &str) -> Result<SessionProgress, QuizError> {
        self.session
            .as_mut()
            .ok_or(QuizError::NoSession)?
            .select(index, option)
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoSession` without a session, otherwise see
    /// [`QuizSession::submit`].
    pub fn submit(&mut self) -> Result<&SessionResult, QuizError> {
        self.session.as_mut().ok_or(QuizError::NoSession)?.submit()
    }

    #[must_use]
    pub fn view(&self) -> Option<QuizView> {
        self.session.as_ref().map(QuizSession::view)
    }
}
