use quiz_core::model::{MissedQuestion, Question, SelectedAnswer, SessionResult};

/// Score a set of selections against their questions.
///
/// Walks the questions in order. A question without a selection (including
/// one past the end of `selections`) counts as missed with
/// [`SelectedAnswer::NoAnswer`].
#[must_use]
pub fn score(questions: &[Question], selections: &[Option<String>]) -> SessionResult {
    let mut correct = 0;
    let mut missed = Vec::new();

    for (index, question) in questions.iter().enumerate() {
        let selected = selections.get(index).and_then(Option::as_deref);
        match selected {
            Some(answer) if question.is_correct(answer) => correct += 1,
            _ => missed.push(MissedQuestion {
                prompt: question.prompt().to_owned(),
                correct_answer: question.correct_answer().to_owned(),
                selected_answer: selected
                    .map_or(SelectedAnswer::NoAnswer, |s| SelectedAnswer::Chosen(s.to_owned())),
            }),
        }
    }

    SessionResult::new(correct, questions.len(), missed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        (1..=3)
            .map(|n| {
                Question::new(
                    format!("Q{n}"),
                    (1..=3).map(|o| format!("A{o}")).collect(),
                    format!("A{n}"),
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let qs = questions();
        let selections: Vec<_> = qs
            .iter()
            .map(|q| Some(q.correct_answer().to_owned()))
            .collect();
        let result = score(&qs, &selections);

        assert_eq!(result.score(), 3);
        assert_eq!(result.total(), 3);
        assert!(result.missed().is_empty());
        assert!(result.is_perfect());
    }

    #[test]
    fn empty_selections_score_zero_with_sentinels() {
        let qs = questions();
        let result = score(&qs, &[]);

        assert_eq!(result.score(), 0);
        assert_eq!(result.missed().len(), 3);
        assert!(
            result
                .missed()
                .iter()
                .all(|m| m.selected_answer == SelectedAnswer::NoAnswer)
        );
    }

    #[test]
    fn missed_entries_keep_question_order() {
        let qs = questions();
        let selections = vec![Some("A2".to_owned()), Some("A2".to_owned()), None];
        let result = score(&qs, &selections);

        assert_eq!(result.score(), 1);
        let prompts: Vec<_> = result.missed().iter().map(|m| m.prompt.as_str()).collect();
        assert_eq!(prompts, ["Q1", "Q3"]);
        assert_eq!(
            result.missed()[0],
            MissedQuestion {
                prompt: "Q1".into(),
                correct_answer: "A1".into(),
                selected_answer: SelectedAnswer::Chosen("A2".into()),
            }
        );
        assert_eq!(result.missed()[1].selected_answer.to_string(), "no answer");
    }

    #[test]
    fn scoring_is_deterministic_and_leaves_inputs_untouched() {
        let qs = questions();
        let selections = vec![Some("A1".to_owned()), None, Some("A1".to_owned())];
        let before = selections.clone();

        assert_eq!(score(&qs, &selections), score(&qs, &selections));
        assert_eq!(selections, before);
    }
}
