//! Question service client.
//!
//! The backing service hands out the question list (`GET /questions`) and
//! collects each participant's selections once a quiz is finished
//! (`POST /results`).

use std::time::Duration;

use async_trait::async_trait;

use crate::quiz::error::SourceError;
use crate::quiz::{ParticipantId, Question};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// The external service quizzes are sourced from and reported back to.
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// Fetch the full, ordered question list for a new quiz.
    async fn fetch_questions(&self) -> Result<Vec<Question>, SourceError>;

    /// Report the selections a participant made, in question order.
    async fn submit_results(
        &self,
        participant: ParticipantId,
        answers: &[i64],
    ) -> Result<(), SourceError>;
}

/// HTTP implementation of [`QuestionService`].
pub struct HttpQuestionService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpQuestionService {
    pub fn new(base_url: &str) -> Self {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[derive(serde::Serialize)]
struct ResultsPayload<'a> {
    user_id: ParticipantId,
    answers: &'a [i64],
}

#[async_trait]
impl QuestionService for HttpQuestionService {
    async fn fetch_questions(&self) -> Result<Vec<Question>, SourceError> {
        let response = self
            .client
            .get(format!("{}/questions", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        let questions = response.json().await?;
        Ok(questions)
    }

    async fn submit_results(
        &self,
        participant: ParticipantId,
        answers: &[i64],
    ) -> Result<(), SourceError> {
        let payload = ResultsPayload {
            user_id: participant,
            answers,
        };

        self.client
            .post(format!("{}/results", self.base_url))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::AnswerKey;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_and_decodes_both_question_schemas() {
        let server = MockServer::start().await;

        let body = serde_json::json!([
            {"id": 1, "text": "Q1", "options": ["A", "B"], "correct_index": 1},
            {"id": 2, "text": "Q2", "options": ["X", "Y"], "correct": "Y"},
            {"id": 3, "text": "Q3", "options": ["P", "Q"]}
        ]);

        Mock::given(method("GET"))
            .and(path("/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let service = HttpQuestionService::new(&server.uri());
        let questions = service.fetch_questions().await.unwrap();

        assert_eq!(questions.len(), 3);
        assert!(matches!(questions[0].key, AnswerKey::Index { correct_index: 1 }));
        assert!(matches!(questions[1].key, AnswerKey::Label { .. }));
        assert!(matches!(questions[2].key, AnswerKey::Missing {}));
    }

    #[tokio::test]
    async fn fetch_maps_failure_status_to_source_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = HttpQuestionService::new(&server.uri());
        let err = service.fetch_questions().await.unwrap_err();
        assert!(matches!(err, SourceError::Status(500)));
    }

    #[tokio::test]
    async fn fetch_maps_garbage_payload_to_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let service = HttpQuestionService::new(&server.uri());
        let err = service.fetch_questions().await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[tokio::test]
    async fn submits_results_in_the_service_wire_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/results"))
            .and(body_json(serde_json::json!({
                "user_id": 42,
                "answers": [1, 0, -1]
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = HttpQuestionService::new(&server.uri());
        service
            .submit_results(ParticipantId(42), &[1, 0, -1])
            .await
            .unwrap();
    }

    #[test]
    fn empty_base_url_falls_back_to_the_default() {
        let service = HttpQuestionService::new("");
        assert_eq!(service.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_stripped_from_the_base_url() {
        let service = HttpQuestionService::new("http://example.com/");
        assert_eq!(service.base_url, "http://example.com");
    }
}
