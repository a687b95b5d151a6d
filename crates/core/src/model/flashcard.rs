use serde::{Deserialize, Serialize};

/// A single front/back card as supplied by the persistence layer.
///
/// Flashcards are read-only input to a quiz session; nothing in the quiz
/// engine mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flashcard {
    front: String,
    back: String,
}

impl Flashcard {
    #[must_use]
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// The side shown as the question prompt.
    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    /// The side used as the correct answer.
    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_front_back_json() {
        let cards: Vec<Flashcard> =
            serde_json::from_str(r#"[{"front":"Q1","back":"A1"},{"front":"Q2","back":"A2"}]"#)
                .unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front(), "Q1");
        assert_eq!(cards[1].back(), "A2");
    }
}
