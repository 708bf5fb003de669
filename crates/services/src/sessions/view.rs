use quiz_core::model::{Phase, SessionSnapshot};

pub const START_LABEL: &str = "Start Quiz";
pub const RESTART_LABEL: &str = "Take New Quiz";
pub const COMPLETED_HEADING: &str = "Quiz Completed";

/// One selectable answer, numbered from 1 as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoice {
    pub number: usize,
    pub text: String,
}

/// Presentation-agnostic description of what a presenter should show.
///
/// No styling or layout; presenters decide how each variant looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizView {
    StartPrompt {
        label: &'static str,
    },
    Loading,
    Question {
        number: usize,
        total: usize,
        text: String,
        answers: Vec<AnswerChoice>,
    },
    Completed {
        heading: &'static str,
        score: String,
        label: &'static str,
    },
}

impl QuizView {
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        match snapshot.phase {
            Phase::NotStarted => QuizView::StartPrompt { label: START_LABEL },
            Phase::Loading => QuizView::Loading,
            Phase::InProgress => match &snapshot.current_question {
                Some(question) => QuizView::Question {
                    number: snapshot.current_index + 1,
                    total: snapshot.total,
                    text: question.text().to_string(),
                    answers: question
                        .answers()
                        .iter()
                        .enumerate()
                        .map(|(index, answer)| AnswerChoice {
                            number: index + 1,
                            text: answer.text.clone(),
                        })
                        .collect(),
                },
                // Index forced past the last question without completing.
                None => QuizView::Loading,
            },
            Phase::Completed => QuizView::Completed {
                heading: COMPLETED_HEADING,
                score: snapshot
                    .final_score()
                    .map(|score| score.to_string())
                    .unwrap_or_default(),
                label: RESTART_LABEL,
            },
        }
    }

    /// Label of the start/restart control, when one is shown.
    #[must_use]
    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            QuizView::StartPrompt { label } | QuizView::Completed { label, .. } => Some(*label),
            QuizView::Loading | QuizView::Question { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Answer, Question};

    fn in_progress() -> SessionSnapshot {
        SessionSnapshot {
            phase: Phase::InProgress,
            current_index: 2,
            current_question: Some(Question::new(
                "Which planet is known as the Red Planet?",
                vec![Answer::wrong("Venus"), Answer::correct("Mars")],
            )),
            score: 1,
            total: 10,
        }
    }

    #[test]
    fn not_started_offers_start_quiz() {
        let view = QuizView::from_snapshot(&SessionSnapshot::not_started());
        assert_eq!(view.action_label(), Some("Start Quiz"));
    }

    #[test]
    fn question_view_numbers_answers_from_one() {
        let view = QuizView::from_snapshot(&in_progress());
        let QuizView::Question {
            number,
            total,
            text,
            answers,
        } = view
        else {
            panic!("expected question view");
        };
        assert_eq!((number, total), (3, 10));
        assert_eq!(text, "Which planet is known as the Red Planet?");
        assert_eq!(answers[1], AnswerChoice {
            number: 2,
            text: "Mars".into()
        });
    }

    #[test]
    fn completed_view_shows_score_and_new_quiz_label() {
        let mut snapshot = in_progress();
        snapshot.phase = Phase::Completed;
        snapshot.current_question = None;
        snapshot.current_index = 10;
        snapshot.score = 4;

        let view = QuizView::from_snapshot(&snapshot);
        assert_eq!(view, QuizView::Completed {
            heading: "Quiz Completed",
            score: "4/10".into(),
            label: "Take New Quiz",
        });
        assert_eq!(view.action_label(), Some("Take New Quiz"));
    }

    #[test]
    fn loading_has_no_controls() {
        let mut snapshot = SessionSnapshot::not_started();
        snapshot.phase = Phase::Loading;
        let view = QuizView::from_snapshot(&snapshot);
        assert_eq!(view, QuizView::Loading);
        assert_eq!(view.action_label(), None);
    }
}
