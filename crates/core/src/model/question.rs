use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of options offered per question.
pub const MAX_OPTIONS: usize = 4;

//
// ─── QUESTION ERRORS ───────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least one option")]
    NoOptions,

    #[error("too many options: {len} (max {MAX_OPTIONS})")]
    TooManyOptions { len: usize },

    #[error("correct answer {answer:?} is not among the options")]
    MissingCorrectAnswer { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question derived from one flashcard.
///
/// The correct answer is always one of `options`; the option list holds at
/// most [`MAX_OPTIONS`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionFields")]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

/// Unchecked wire shape of a [`Question`]; deserialization validates through `Question::new`.
#[derive(Deserialize)]
struct QuestionFields {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

impl TryFrom<QuestionFields> for Question {
    type Error = QuestionError;

    fn try_from(fields: QuestionFields) -> Result<Self, Self::Error> {
        Self::new(fields.prompt, fields.options, fields.correct_answer)
    }
}

impl Question {
    /// Build a question from an explicit option list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoOptions` for an empty list,
    /// `QuestionError::TooManyOptions` above [`MAX_OPTIONS`], and
    /// `QuestionError::MissingCorrectAnswer` when `correct_answer` is not offered.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let correct_answer = correct_answer.into();
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if options.len() > MAX_OPTIONS {
            return Err(QuestionError::TooManyOptions { len: options.len() });
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionError::MissingCorrectAnswer {
                answer: correct_answer,
            });
        }

        Ok(Self {
            prompt: prompt.into(),
            options,
            correct_answer,
        })
    }

    /// Assemble a question from the correct answer and a list of distractors.
    ///
    /// Distractors beyond `MAX_OPTIONS - 1` are dropped. The correct answer is
    /// inserted at `correct_slot`, clamped to the end of the distractor list.
    #[must_use]
    pub fn assemble(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        mut distractors: Vec<String>,
        correct_slot: usize,
    ) -> Self {
        let correct_answer = correct_answer.into();
        distractors.truncate(MAX_OPTIONS - 1);
        let slot = correct_slot.min(distractors.len());
        distractors.insert(slot, correct_answer.clone());

        Self {
            prompt: prompt.into(),
            options: distractors,
            correct_answer,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Returns true if `option` is one of the offered choices.
    #[must_use]
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
