//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by quiz sessions and the services that drive them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question index {index} is out of range ({len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("option {option:?} is not offered for question {index}")]
    UnknownOption { index: usize, option: String },
    #[error("quiz not ready to submit: {answered} of {total} questions answered")]
    NotReady { answered: usize, total: usize },
    #[error("quiz is still loading")]
    Loading,
    #[error("quiz already completed")]
    Completed,
    #[error("quiz questions already loaded")]
    AlreadyLoaded,
    #[error("no quiz session is open")]
    NoSession,
    #[error("failed to fetch flashcards: {0}")]
    FetchFailed(#[from] StorageError),
}
