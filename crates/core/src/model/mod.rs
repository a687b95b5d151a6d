mod flashcard;
mod ids;
mod question;
mod result;

pub use flashcard::Flashcard;
pub use ids::{ParseIdError, SetId, UserId};
pub use question::{MAX_OPTIONS, Question, QuestionError};
pub use result::{MissedQuestion, NO_ANSWER, SelectedAnswer, SessionResult};
