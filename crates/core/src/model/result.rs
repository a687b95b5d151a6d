use serde::{Deserialize, Serialize};
use std::fmt;

/// Display text for a question left unanswered at submission.
pub const NO_ANSWER: &str = "no answer";

/// What the user picked for a missed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectedAnswer {
    Chosen(String),
    NoAnswer,
}

impl SelectedAnswer {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SelectedAnswer::Chosen(answer) => answer,
            SelectedAnswer::NoAnswer => NO_ANSWER,
        }
    }
}

impl fmt::Display for SelectedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question answered incorrectly (or not at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedQuestion {
    pub prompt: String,
    pub correct_answer: String,
    pub selected_answer: SelectedAnswer,
}

/// Final outcome of a submitted quiz.
///
/// `missed` keeps the order in which questions were presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    score: usize,
    total: usize,
    missed: Vec<MissedQuestion>,
}

impl SessionResult {
    #[must_use]
    pub fn new(score: usize, total: usize, missed: Vec<MissedQuestion>) -> Self {
        Self {
            score,
            total,
            missed,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn missed(&self) -> &[MissedQuestion] {
        &self.missed
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.missed.is_empty()
    }

    /// Score as a whole percentage, rounded down. An empty quiz scores 0.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        self.score * 100 / self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_answer_displays_sentinel() {
        assert_eq!(SelectedAnswer::NoAnswer.to_string(), "no answer");
        assert_eq!(SelectedAnswer::Chosen("A2".into()).as_str(), "A2");
    }

    #[test]
    fn percent_handles_empty_quiz() {
        assert_eq!(SessionResult::new(0, 0, Vec::new()).percent(), 0);
        assert_eq!(SessionResult::new(2, 3, Vec::new()).percent(), 66);
    }
}
