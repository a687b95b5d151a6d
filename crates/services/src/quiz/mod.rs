mod builder;
mod host;
mod lifecycle;
mod progress;
mod scorer;
mod state;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use builder::QuestionBuilder;
pub use host::{LoadApplied, LoadTicket, QuizHost};
pub use lifecycle::{QuizPhase, QuizSession, QuizView};
pub use progress::SessionProgress;
pub use scorer::score;
pub use state::SessionState;
pub use workflow::QuizLoopService;
