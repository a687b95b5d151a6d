use async_trait::async_trait;
use quiz_core::model::{Flashcard, SetId, UserId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for a user's flashcard sets.
///
/// Sets are addressed by `(user, set)`; the cards of a set keep the order in
/// which they were stored.
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Create a set or replace all of its cards.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be stored.
    async fn upsert_set(
        &self,
        user: &UserId,
        set: &SetId,
        cards: &[Flashcard],
    ) -> Result<(), StorageError>;

    /// Fetch every card of a set, in stored order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the set does not exist, or other storage errors.
    async fn list_flashcards(
        &self,
        user: &UserId,
        set: &SetId,
    ) -> Result<Vec<Flashcard>, StorageError>;

    /// List the names of a user's sets, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_sets(&self, user: &UserId) -> Result<Vec<SetId>, StorageError>;
}

type SetMap = HashMap<UserId, BTreeMap<SetId, Vec<Flashcard>>>;

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    sets: Arc<Mutex<SetMap>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sets: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl FlashcardRepository for InMemoryRepository {
    async fn upsert_set(
        &self,
        user: &UserId,
        set: &SetId,
        cards: &[Flashcard],
    ) -> Result<(), StorageError> {
        let mut guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .entry(user.clone())
            .or_default()
            .insert(set.clone(), cards.to_vec());
        Ok(())
    }

    async fn list_flashcards(
        &self,
        user: &UserId,
        set: &SetId,
    ) -> Result<Vec<Flashcard>, StorageError> {
        let guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(user)
            .and_then(|sets| sets.get(set))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_sets(&self, user: &UserId) -> Result<Vec<SetId>, StorageError> {
        let guard = self
            .sets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(user)
            .map(|sets| sets.keys().cloned().collect())
            .unwrap_or_default())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub flashcards: Arc<dyn FlashcardRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let flashcards: Arc<dyn FlashcardRepository> = Arc::new(InMemoryRepository::new());
        Self { flashcards }
    }
}
