use rand::seq::SliceRandom;
use rand::{Rng, rng};
use tracing::debug;

use quiz_core::model::{Flashcard, MAX_OPTIONS, Question};

/// Turns a flashcard set into shuffled multiple-choice questions.
///
/// Each card becomes one question: its front is the prompt, its back the
/// correct answer, and distractors are drawn from the backs of the other
/// cards in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionBuilder {
    distractors: usize,
}

impl Default for QuestionBuilder {
    fn default() -> Self {
        Self {
            distractors: MAX_OPTIONS - 1,
        }
    }
}

impl QuestionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of distractors per question (capped at `MAX_OPTIONS - 1`).
    #[must_use]
    pub fn with_distractors(mut self, distractors: usize) -> Self {
        self.distractors = distractors.min(MAX_OPTIONS - 1);
        self
    }

    /// Build questions using the thread-local RNG.
    #[must_use]
    pub fn build(&self, flashcards: &[Flashcard]) -> Vec<Question> {
        let mut rng = rng();
        self.build_with_rng(flashcards, &mut rng)
    }

    /// Build questions with a caller-supplied RNG.
    ///
    /// Produces one question per flashcard. Both the options of every
    /// question and the order of the questions are uniformly shuffled.
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        flashcards: &[Flashcard],
        rng: &mut R,
    ) -> Vec<Question> {
        let mut questions: Vec<Question> = flashcards
            .iter()
            .enumerate()
            .map(|(index, card)| self.question_for(index, card, flashcards, rng))
            .collect();
        questions.shuffle(rng);

        debug!(
            cards = flashcards.len(),
            questions = questions.len(),
            "built quiz questions"
        );
        questions
    }

    fn question_for<R: Rng + ?Sized>(
        &self,
        index: usize,
        card: &Flashcard,
        flashcards: &[Flashcard],
        rng: &mut R,
    ) -> Question {
        let correct = card.back();

        // Only the correct answer is filtered out; repeated backs on other
        // cards stay in the pool as separate candidates.
        let mut candidates: Vec<&str> = flashcards
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, other)| other.back())
            .filter(|back| *back != correct)
            .collect();

        let mut distractors = Vec::with_capacity(self.distractors);
        while distractors.len() < self.distractors && !candidates.is_empty() {
            let pick = rng.random_range(0..candidates.len());
            distractors.push(candidates.swap_remove(pick).to_owned());
        }

        // Draw order is already a uniform arrangement of the distractors, so a
        // uniform slot for the correct answer gives a uniform permutation.
        let slot = rng.random_range(0..=distractors.len());
        Question::assemble(card.front(), correct, distractors, slot)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn cards(n: usize) -> Vec<Flashcard> {
        (1..=n)
            .map(|i| Flashcard::new(format!("Q{i}"), format!("A{i}")))
            .collect()
    }

    fn find<'a>(questions: &'a [Question], prompt: &str) -> &'a Question {
        questions
            .iter()
            .find(|q| q.prompt() == prompt)
            .expect("question for prompt")
    }

    #[test]
    fn builds_one_question_per_card_with_correct_answer_offered() {
        let mut rng = StdRng::seed_from_u64(7);
        let flashcards = cards(6);
        let questions = QuestionBuilder::new().build_with_rng(&flashcards, &mut rng);

        assert_eq!(questions.len(), flashcards.len());
        for card in &flashcards {
            let q = find(&questions, card.front());
            assert_eq!(q.correct_answer(), card.back());
            assert!(q.offers(card.back()));
            assert!(q.options().len() <= MAX_OPTIONS);
        }
    }

    #[test]
    fn four_distinct_backs_yield_four_unique_options() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = QuestionBuilder::new().build_with_rng(&cards(5), &mut rng);
            for q in &questions {
                assert_eq!(q.options().len(), 4);
                let unique: HashSet<_> = q.options().iter().collect();
                assert_eq!(unique.len(), 4);
            }
        }
    }

    #[test]
    fn small_sets_produce_fewer_options() {
        let mut rng = StdRng::seed_from_u64(1);
        let single = QuestionBuilder::new().build_with_rng(&cards(1), &mut rng);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].options(), ["A1".to_owned()].as_slice());

        let pair = QuestionBuilder::new().build_with_rng(&cards(2), &mut rng);
        assert!(pair.iter().all(|q| q.options().len() == 2));
    }

    #[test]
    fn empty_set_yields_no_questions() {
        assert!(QuestionBuilder::new().build(&[]).is_empty());
    }

    #[test]
    fn duplicate_backs_on_other_cards_remain_candidates() {
        let flashcards = vec![
            Flashcard::new("Q1", "A"),
            Flashcard::new("Q2", "B"),
            Flashcard::new("Q3", "B"),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let questions = QuestionBuilder::new().build_with_rng(&flashcards, &mut rng);

        let q1 = find(&questions, "Q1");
        assert_eq!(q1.options().len(), 3);
        assert_eq!(q1.options().iter().filter(|o| *o == "B").count(), 2);

        // The correct answer itself is never repeated as a distractor.
        let q2 = find(&questions, "Q2");
        assert_eq!(q2.options().len(), 2);
        assert_eq!(q2.options().iter().filter(|o| *o == "B").count(), 1);
    }

    #[test]
    fn distractor_count_is_configurable() {
        let mut rng = StdRng::seed_from_u64(11);
        let questions = QuestionBuilder::new()
            .with_distractors(1)
            .build_with_rng(&cards(6), &mut rng);
        assert!(questions.iter().all(|q| q.options().len() == 2));

        let capped = QuestionBuilder::new().with_distractors(10);
        assert_eq!(capped, QuestionBuilder::new());
    }

    #[test]
    fn question_order_is_shuffled() {
        let flashcards = cards(8);
        let input_order: Vec<&str> = flashcards.iter().map(Flashcard::front).collect();

        let reordered = (0..20).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = QuestionBuilder::new().build_with_rng(&flashcards, &mut rng);
            let order: Vec<&str> = questions.iter().map(Question::prompt).collect();
            order != input_order
        });
        assert!(reordered);
    }

    #[test]
    fn correct_answer_position_is_roughly_uniform() {
        let flashcards = cards(4);
        let mut rng = StdRng::seed_from_u64(42);
        let mut slots = [0_usize; MAX_OPTIONS];

        for _ in 0..1000 {
            for q in QuestionBuilder::new().build_with_rng(&flashcards, &mut rng) {
                let slot = q
                    .options()
                    .iter()
                    .position(|o| o == q.correct_answer())
                    .expect("correct answer offered");
                slots[slot] += 1;
            }
        }

        // 4000 draws, 1000 expected per slot.
        for count in slots {
            assert!((850..=1150).contains(&count), "skewed slot count {count}");
        }
    }
}
