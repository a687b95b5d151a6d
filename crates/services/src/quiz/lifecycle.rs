use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use quiz_core::Clock;
use quiz_core::model::{Flashcard, Question, SessionResult};

use super::builder::QuestionBuilder;
use super::progress::SessionProgress;
use super::scorer::score;
use super::state::SessionState;
use crate::error::QuizError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Observable phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizPhase {
    Loading,
    Active,
    Completed,
}

#[derive(Debug, Clone)]
enum Stage {
    Loading {
        fetch_error: Option<String>,
    },
    Active {
        state: SessionState,
        started_at: DateTime<Utc>,
    },
    Completed {
        state: SessionState,
        result: SessionResult,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
}

//
// ─── VIEW ──────────────────────────────────────────────────────────────────────
//

/// Read-only snapshot of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub phase: QuizPhase,
    pub questions: Vec<Question>,
    pub answered_count: usize,
    pub is_complete: bool,
    pub fetch_error: Option<String>,
    pub result: Option<SessionResult>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One pass through a quiz: `Loading → Active → Completed`.
///
/// There is no way back from `Completed`; a retake starts a new session.
#[derive(Debug, Clone)]
pub struct QuizSession {
    stage: Stage,
    clock: Clock,
}

impl QuizSession {
    /// Create a session waiting for its flashcards.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            stage: Stage::Loading { fetch_error: None },
            clock,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self.stage {
            Stage::Loading { .. } => QuizPhase::Loading,
            Stage::Active { .. } => QuizPhase::Active,
            Stage::Completed { .. } => QuizPhase::Completed,
        }
    }

    /// Build questions from `flashcards` and enter `Active`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyLoaded` unless the session is still loading.
    pub fn load(
        &mut self,
        flashcards: &[Flashcard],
        builder: &QuestionBuilder,
    ) -> Result<SessionProgress, QuizError> {
        self.ensure_loading()?;
        self.activate(builder.build(flashcards))
    }

    /// Enter `Active` with an already built question list (which may be empty).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyLoaded` unless the session is still loading.
    pub fn activate(&mut self, questions: Vec<Question>) -> Result<SessionProgress, QuizError> {
        self.ensure_loading()?;

        let state = SessionState::new(questions);
        let progress = state.progress();
        self.stage = Stage::Active {
            state,
            started_at: self.clock.now(),
        };

        info!(questions = progress.total, "quiz session active");
        Ok(progress)
    }

    /// Record that the flashcard fetch failed. The session stays in `Loading`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyLoaded` unless the session is still loading.
    pub fn fail_load(&mut self, reason: impl Into<String>) -> Result<(), QuizError> {
        match &mut self.stage {
            Stage::Loading { fetch_error } => {
                *fetch_error = Some(reason.into());
                Ok(())
            }
            _ => Err(QuizError::AlreadyLoaded),
        }
    }

    #[must_use]
    pub fn fetch_error(&self) -> Option<&str> {
        match &self.stage {
            Stage::Loading { fetch_error } => fetch_error.as_deref(),
            _ => None,
        }
    }

    /// Select an answer for question `index`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Loading` or `QuizError::Completed` outside the
    /// `Active` phase, and the `SessionState::select` errors for bad arguments.
    pub fn select(&mut self, index: usize, option: &str) -> Result<SessionProgress, QuizError> {
        match &mut self.stage {
            Stage::Loading { .. } => Err(QuizError::Loading),
            Stage::Completed { .. } => Err(QuizError::Completed),
            Stage::Active { state, .. } => {
                state.select(index, option)?;
                Ok(state.progress())
            }
        }
    }

    /// Score the quiz and enter `Completed`.
    ///
    /// Submitting an already completed session is a no-op that returns the
    /// stored result.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotReady` while questions remain unanswered and
    /// `QuizError::Loading` before questions exist.
    pub fn submit(&mut self) -> Result<&SessionResult, QuizError> {
        match &self.stage {
            Stage::Loading { .. } => return Err(QuizError::Loading),
            Stage::Active { state, .. } if !state.is_complete() => {
                let progress = state.progress();
                return Err(QuizError::NotReady {
                    answered: progress.answered,
                    total: progress.total,
                });
            }
            Stage::Active { .. } | Stage::Completed { .. } => {}
        }

        if matches!(self.stage, Stage::Active { .. }) {
            let completed_at = self.clock.now();
            let stage = std::mem::replace(&mut self.stage, Stage::Loading { fetch_error: None });
            self.stage = match stage {
                Stage::Active { state, started_at } => {
                    let result = score(state.questions(), state.selections());
                    info!(
                        score = result.score(),
                        total = result.total(),
                        "quiz submitted"
                    );
                    Stage::Completed {
                        state,
                        result,
                        started_at,
                        completed_at,
                    }
                }
                other => other,
            };
        }

        self.result().ok_or(QuizError::Completed)
    }

    #[must_use]
    pub fn state(&self) -> Option<&SessionState> {
        match &self.stage {
            Stage::Loading { .. } => None,
            Stage::Active { state, .. } | Stage::Completed { state, .. } => Some(state),
        }
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.state().map(SessionState::progress)
    }

    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        match &self.stage {
            Stage::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match &self.stage {
            Stage::Loading { .. } => None,
            Stage::Active { started_at, .. } | Stage::Completed { started_at, .. } => {
                Some(*started_at)
            }
        }
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match &self.stage {
            Stage::Completed { completed_at, .. } => Some(*completed_at),
            _ => None,
        }
    }

    /// Snapshot the session for rendering.
    #[must_use]
    pub fn view(&self) -> QuizView {
        let progress = self.progress();
        QuizView {
            phase: self.phase(),
            questions: self
                .state()
                .map(|s| s.questions().to_vec())
                .unwrap_or_default(),
            answered_count: progress.map_or(0, |p| p.answered),
            is_complete: progress.is_some_and(|p| p.is_complete),
            fetch_error: self.fetch_error().map(str::to_owned),
            result: self.result().cloned(),
        }
    }

    fn ensure_loading(&self) -> Result<(), QuizError> {
        match self.stage {
            Stage::Loading { .. } => Ok(()),
            _ => Err(QuizError::AlreadyLoaded),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
