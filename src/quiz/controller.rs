//! Session orchestration.
//!
//! The controller sits between the chat transport and the quiz core: a
//! "start" event pulls a question list from the service and opens a session,
//! each "selection" event scores one answer and either shows the next
//! question or closes the quiz out.

use async_trait::async_trait;

use crate::quiz::error::{QuizError, TransportError};
use crate::quiz::evaluator::Verdict;
use crate::quiz::source::QuestionService;
use crate::quiz::store::SessionStore;
use crate::quiz::{ParticipantId, Question};

const FEEDBACK_CORRECT: &str = "Correct ✅";
const FEEDBACK_INCORRECT: &str = "Incorrect ❌";
const FEEDBACK_MISSING_KEY: &str = "The question service has no answer key for this question.";
const FEEDBACK_NO_QUESTIONS: &str = "The quiz has no questions right now, try again later.";

/// What the controller asks the transport to deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// A question with its options; each option carries the index the
    /// selection event is expected to reference it by.
    ShowQuestion {
        text: String,
        options: Vec<(String, usize)>,
    },
    /// Immediate per-answer feedback or a short notice.
    Feedback { text: String },
    /// The closing tally for a finished quiz.
    FinalSummary { score: u32, total: usize },
}

/// Outbound side of the chat transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, to: ParticipantId, message: OutboundMessage)
        -> Result<(), TransportError>;
}

/// Drives quiz sessions in response to inbound transport events.
pub struct SessionController<S, T> {
    store: SessionStore,
    service: S,
    transport: T,
}

impl<S: QuestionService, T: Transport> SessionController<S, T> {
    pub fn new(service: S, transport: T) -> Self {
        Self {
            store: SessionStore::new(),
            service,
            transport,
        }
    }

    /// Handle a "start" event: fetch the question list, open a session and
    /// show the first question. A fetch failure propagates before any
    /// session is created, so a failed start leaves nothing behind.
    pub async fn on_start(&self, participant: ParticipantId) -> Result<(), QuizError> {
        let questions = self.service.fetch_questions().await?;
        log::info!(
            "starting quiz for {participant} with {} questions",
            questions.len()
        );

        if questions.is_empty() {
            self.transport
                .send(
                    participant,
                    OutboundMessage::Feedback {
                        text: FEEDBACK_NO_QUESTIONS.to_string(),
                    },
                )
                .await?;
            return Ok(());
        }

        let handle = self.store.create(participant, questions).await;
        let session = handle.lock().await;
        if let Some(question) = session.current_question() {
            self.show_question(participant, question).await?;
        }
        Ok(())
    }

    /// Handle a "selection" event for whatever question is pending.
    ///
    /// Selections for participants without an active session are stale
    /// callbacks (old buttons, duplicate deliveries) and are dropped
    /// silently. The session stays locked for the whole sequence, so two
    /// events for the same participant can never interleave.
    pub async fn on_selection(
        &self,
        participant: ParticipantId,
        raw: &str,
    ) -> Result<(), QuizError> {
        let Some(handle) = self.store.get(participant).await else {
            log::debug!("dropping selection from {participant}: no active session");
            return Ok(());
        };
        let mut session = handle.lock().await;

        let selected = match session.current_question() {
            Some(question) => parse_selection(raw, question),
            None => return Ok(()),
        };
        let Some(verdict) = session.submit(selected) else {
            return Ok(());
        };

        if verdict == Verdict::Undecidable {
            self.transport
                .send(
                    participant,
                    OutboundMessage::Feedback {
                        text: FEEDBACK_MISSING_KEY.to_string(),
                    },
                )
                .await?;
            return Ok(());
        }

        let feedback = if verdict == Verdict::Correct {
            FEEDBACK_CORRECT
        } else {
            FEEDBACK_INCORRECT
        };
        self.transport
            .send(
                participant,
                OutboundMessage::Feedback {
                    text: feedback.to_string(),
                },
            )
            .await?;

        if let Some(next) = session.current_question() {
            return self.show_question(participant, next).await;
        }

        log::info!(
            "quiz finished for {participant}: {}/{}",
            session.score(),
            session.total()
        );
        self.transport
            .send(
                participant,
                OutboundMessage::FinalSummary {
                    score: session.score(),
                    total: session.total(),
                },
            )
            .await?;

        // The results sink is fire-and-forget; a failure must not keep the
        // finished session around.
        if let Err(err) = self
            .service
            .submit_results(participant, session.answers())
            .await
        {
            log::warn!("failed to submit results for {participant}: {err}");
        }

        drop(session);
        self.store.remove(participant).await;
        Ok(())
    }

    async fn show_question(
        &self,
        participant: ParticipantId,
        question: &Question,
    ) -> Result<(), QuizError> {
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), index))
            .collect();
        self.transport
            .send(
                participant,
                OutboundMessage::ShowQuestion {
                    text: question.text.clone(),
                    options,
                },
            )
            .await?;
        Ok(())
    }
}

/// Turn a raw selection payload into an option index.
///
/// Buttons carry the option index as text; older buttons carried the label
/// itself, so an unparseable payload falls back to a label lookup (first
/// matching option wins). Anything else becomes `-1`, which no question can
/// score as correct through the label path.
fn parse_selection(raw: &str, question: &Question) -> i64 {
    if let Ok(index) = raw.parse::<i64>() {
        return index;
    }
    match question.options.iter().position(|option| option == raw) {
        Some(index) => index as i64,
        None => {
            log::debug!("unparseable selection {raw:?}, treating as out of range");
            -1
        }
    }
}
