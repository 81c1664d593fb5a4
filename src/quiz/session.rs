//! Per-participant quiz state machine.

use crate::quiz::evaluator::{self, Verdict};
use crate::quiz::Question;

/// One participant's run through one question list.
///
/// The session moves through `questions` one at a time and only forward:
/// `submit` is the single mutating operation and it advances the cursor by
/// exactly one, so there is never more than one pending question and a
/// question can never be answered twice. Once the cursor reaches the end the
/// session is completed and stays that way.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    cursor: usize,
    answers: Vec<i64>,
    score: u32,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            cursor: 0,
            answers: Vec::new(),
            score: 0,
        }
    }

    /// The question currently waiting for an answer, or `None` once the
    /// session is completed.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    pub fn is_completed(&self) -> bool {
        self.cursor == self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Selected option indices in question order, one per answered question.
    pub fn answers(&self) -> &[i64] {
        &self.answers
    }

    /// Record a selection for the current question.
    ///
    /// Returns `None` if the session is already completed. An `Undecidable`
    /// verdict leaves the session untouched: the same question stays pending
    /// so the participant can answer again once the service data is fixed.
    /// Otherwise the selection is recorded and the cursor advances.
    pub fn submit(&mut self, selected: i64) -> Option<Verdict> {
        let question = self.questions.get(self.cursor)?;
        let verdict = evaluator::evaluate(question, selected);
        if verdict == Verdict::Undecidable {
            return Some(verdict);
        }

        self.answers.push(selected);
        if verdict == Verdict::Correct {
            self.score += 1;
        }
        self.cursor += 1;
        Some(verdict)
    }
}
