use std::sync::Arc;

use tracing::{debug, warn};

use quiz_core::model::{Flashcard, SetId, UserId};
use storage::repository::{FlashcardRepository, StorageError};

use super::builder::QuestionBuilder;
use super::lifecycle::QuizSession;
use super::progress::SessionProgress;
use crate::Clock;
use crate::error::QuizError;

/// Connects quiz sessions to the flashcard repository.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    flashcards: Arc<dyn FlashcardRepository>,
    builder: QuestionBuilder,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, flashcards: Arc<dyn FlashcardRepository>) -> Self {
        Self {
            clock,
            flashcards,
            builder: QuestionBuilder::new(),
        }
    }

    #[must_use]
    pub fn with_builder(mut self, builder: QuestionBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// A fresh session in `Loading`, sharing this service's clock.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.clock)
    }

    /// Fetch the flashcards of a set. This is the only suspending step of a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` from the repository unchanged.
    pub async fn fetch(&self, user: &UserId, set: &SetId) -> Result<Vec<Flashcard>, StorageError> {
        debug!(%user, %set, "fetching flashcards");
        self.flashcards.list_flashcards(user, set).await
    }

    /// Apply a fetch outcome to a loading session.
    ///
    /// On success the questions are built and the session becomes `Active`.
    /// On failure the session stays in `Loading` with the failure recorded.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::FetchFailed` for a failed fetch and
    /// `QuizError::AlreadyLoaded` if the session is past `Loading`.
    pub fn apply_fetch(
        &self,
        session: &mut QuizSession,
        outcome: Result<Vec<Flashcard>, StorageError>,
    ) -> Result<SessionProgress, QuizError> {
        match outcome {
            Ok(cards) => session.load(&cards, &self.builder),
            Err(err) => {
                warn!(error = %err, "flashcard fetch failed");
                session.fail_load(err.to_string())?;
                Err(QuizError::FetchFailed(err))
            }
        }
    }

    /// Fetch a set and load it into `session`.
    ///
    /// # Errors
    ///
    /// See [`QuizLoopService::apply_fetch`].
    pub async fn load_session(
        &self,
        session: &mut QuizSession,
        user: &UserId,
        set: &SetId,
    ) -> Result<SessionProgress, QuizError> {
        let outcome = self.fetch(user, set).await;
        self.apply_fetch(session, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizPhase;
    use async_trait::async_trait;
    use quiz_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    struct UnreachableRepository;

    #[async_trait]
    impl FlashcardRepository for UnreachableRepository {
        async fn upsert_set(
            &self,
            _user: &UserId,
            _set: &SetId,
            _cards: &[Flashcard],
        ) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn list_flashcards(
            &self,
            _user: &UserId,
            _set: &SetId,
        ) -> Result<Vec<Flashcard>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn list_sets(&self, _user: &UserId) -> Result<Vec<SetId>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    #[tokio::test]
    async fn load_session_activates_with_stored_cards() {
        let repo = InMemoryRepository::new();
        let user = UserId::new("u1").unwrap();
        let set = SetId::new("s1").unwrap();
        repo.upsert_set(&user, &set, &[Flashcard::new("Q1", "A1")])
            .await
            .unwrap();

        let service = QuizLoopService::new(Clock::fixed(fixed_now()), Arc::new(repo));
        let mut session = service.new_session();
        let progress = service.load_session(&mut session, &user, &set).await.unwrap();

        assert_eq!(progress.total, 1);
        assert_eq!(session.phase(), QuizPhase::Active);
    }

    #[tokio::test]
    async fn unreachable_repository_leaves_session_loading() {
        let service = QuizLoopService::new(Clock::default(), Arc::new(UnreachableRepository));
        let mut session = service.new_session();

        let err = service
            .load_session(&mut session, &UserId::new("u1").unwrap(), &SetId::new("s1").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            QuizError::FetchFailed(StorageError::Connection(_))
        ));
        assert_eq!(session.phase(), QuizPhase::Loading);
        assert_eq!(session.fetch_error(), Some("connection error: offline"));
    }

    #[tokio::test]
    async fn missing_set_is_a_fetch_failure() {
        let service = QuizLoopService::new(Clock::default(), Arc::new(InMemoryRepository::new()));
        let mut session = service.new_session();

        let err = service
            .load_session(&mut session, &UserId::new("u1").unwrap(), &SetId::new("missing").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, QuizError::FetchFailed(StorageError::NotFound)));
        assert_eq!(session.fetch_error(), Some("not found"));
    }
}
