use quiz_core::model::Question;

use super::progress::SessionProgress;
use crate::error::QuizError;

/// Questions of one quiz plus the user's answer selections.
///
/// Selections are dense over the question indices; an entry is only ever set
/// or overwritten, never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    questions: Vec<Question>,
    selections: Vec<Option<String>>,
}

impl SessionState {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let selections = vec![None; questions.len()];
        Self {
            questions,
            selections,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn selections(&self) -> &[Option<String>] {
        &self.selections
    }

    #[must_use]
    pub fn selection(&self, index: usize) -> Option<&str> {
        self.selections.get(index).and_then(|s| s.as_deref())
    }

    /// Record `option` as the answer to question `index`, replacing any earlier pick.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::IndexOutOfRange` for an unknown question and
    /// `QuizError::UnknownOption` if the question does not offer `option`.
    pub fn select(&mut self, index: usize, option: &str) -> Result<(), QuizError> {
        let question = self.questions.get(index).ok_or(QuizError::IndexOutOfRange {
            index,
            len: self.questions.len(),
        })?;
        if !question.offers(option) {
            return Err(QuizError::UnknownOption {
                index,
                option: option.to_owned(),
            });
        }

        self.selections[index] = Some(option.to_owned());
        Ok(())
    }

    /// Number of questions with a recorded selection.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.questions.len(),
            answered,
            remaining: self.questions.len().saturating_sub(answered),
            is_complete: self.is_complete(),
        }
    }
}
