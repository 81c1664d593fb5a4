//! Answer evaluation.
//!
//! The question service encodes correctness in one of two incompatible ways
//! (index or label), and sometimes not at all. This module resolves a
//! selection against whichever encoding a question carries.

use crate::quiz::{AnswerKey, Question};

/// Outcome of checking one selection against one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The question carries no answer key, so correctness cannot be decided.
    /// Callers must not fold this into `Incorrect`: the participant should be
    /// told the data is missing and the question left pending.
    Undecidable,
}

/// Check `selected` against the question's answer key.
///
/// `selected` may be negative or past the end of `options`; unparseable or
/// stale button payloads arrive that way. Such selections are never correct,
/// but they are not errors either.
pub fn evaluate(question: &Question, selected: i64) -> Verdict {
    match &question.key {
        AnswerKey::Index { correct_index } => {
            if selected == *correct_index {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            }
        }
        AnswerKey::Label { correct_label } => {
            let picked = usize::try_from(selected)
                .ok()
                .and_then(|index| question.options.get(index));
            match picked {
                Some(label) if label == correct_label => Verdict::Correct,
                _ => Verdict::Incorrect,
            }
        }
        AnswerKey::Missing {} => Verdict::Undecidable,
    }
}
