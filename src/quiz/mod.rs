pub mod controller;
pub mod error;
pub mod evaluator;
pub mod session;
pub mod source;
pub mod store;

use std::fmt;

/// Identity of the person taking a quiz. For the Telegram transport this is
/// the chat id, but nothing in the quiz core depends on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub i64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One question as delivered by the question service.
///
/// `options` is an ordered list; selections reference it by index, so the
/// order is meaningful and must not be changed after decoding.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Question {
    #[serde(default)]
    pub id: serde_json::Value,
    pub text: String,
    pub options: Vec<String>,
    #[serde(flatten)]
    pub key: AnswerKey,
}

impl Question {
    pub fn new(text: String, options: Vec<String>, key: AnswerKey) -> Self {
        Self {
            id: serde_json::Value::Null,
            text,
            options,
            key,
        }
    }
}

/// How the service marked the right answer. The feed uses one of two
/// encodings per question; older records carry the option label under the
/// field name `correct`, newer ones an index under `correct_index`. Records
/// with neither are valid input and stay `Missing` until evaluation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Index {
        correct_index: i64,
    },
    Label {
        #[serde(rename = "correct_label", alias = "correct")]
        correct_label: String,
    },
    Missing {},
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_index_keyed_question() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": 2,
            "text": "2 + 2 = ?",
            "options": ["3", "4", "5"],
            "correct_index": 1
        }))
        .unwrap();

        assert_eq!(question.options.len(), 3);
        assert!(matches!(question.key, AnswerKey::Index { correct_index: 1 }));
    }

    #[test]
    fn decodes_label_keyed_question_with_legacy_field_name() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": 1,
            "text": "Pick B",
            "options": ["A", "B", "C"],
            "correct": "B"
        }))
        .unwrap();

        match question.key {
            AnswerKey::Label { correct_label } => assert_eq!(correct_label, "B"),
            other => panic!("expected label key, got {other:?}"),
        }
    }

    #[test]
    fn decodes_label_keyed_question_with_new_field_name() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "text": "Pick C",
            "options": ["A", "B", "C"],
            "correct_label": "C"
        }))
        .unwrap();

        assert!(matches!(question.key, AnswerKey::Label { .. }));
    }

    #[test]
    fn question_without_answer_key_still_decodes() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": "q-7",
            "text": "No key on this one",
            "options": ["A", "B"]
        }))
        .unwrap();

        assert!(matches!(question.key, AnswerKey::Missing {}));
    }

    #[test]
    fn index_key_wins_when_both_fields_are_present() {
        // The service contract says at most one key field per record; if a
        // broken record carries both, the index form is picked.
        let question: Question = serde_json::from_value(serde_json::json!({
            "text": "Broken record",
            "options": ["A", "B"],
            "correct_index": 0,
            "correct": "B"
        }))
        .unwrap();

        assert!(matches!(question.key, AnswerKey::Index { correct_index: 0 }));
    }
}
