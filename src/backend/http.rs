//! HTTP implementation of the quiz backend trait

use super::{BackendError, QuizBackend};
use crate::config::BackendConfig;
use crate::models::{
    Author, ListParams, NewAuthor, NewsReference, NewsSource, Question, QuestionFilter,
    QuestionPage, QuestionPatch, Role, VerifiedAuthor,
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Standard `{ "data": ... }` envelope on backend responses
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Response shape of the credential check endpoint
#[derive(Debug, Deserialize)]
struct VerifyCredsResponse {
    valid: bool,
    #[serde(default)]
    data: Option<VerifiedAuthor>,
}

/// HTTP client for the quiz backend REST API
pub struct HttpQuizBackend {
    client: Client,
    base_url: String,
}

impl HttpQuizBackend {
    /// Create a new backend client from configuration
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::RequestFailed {
                url: config.base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a boxed backend for use with dependency injection
    pub fn boxed(config: &BackendConfig) -> Result<Arc<dyn QuizBackend>, BackendError> {
        Ok(Arc::new(Self::new(config)?))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the response status and decode the body as JSON
    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }
        if !status.is_success() {
            return Err(BackendError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| BackendError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Check the response status, discarding the body
    fn check_status(url: &str, response: &Response) -> Result<(), BackendError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }
        if !status.is_success() {
            return Err(BackendError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    fn request_failed(url: &str, source: reqwest::Error) -> BackendError {
        BackendError::RequestFailed {
            url: url.to_string(),
            source,
        }
    }
}

#[async_trait]
impl QuizBackend for HttpQuizBackend {
    async fn verify_creds(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<VerifiedAuthor>, BackendError> {
        let url = self.endpoint("/author/verify-creds");
        debug!("verifying credentials for '{}'", username);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        let body: VerifyCredsResponse = Self::decode(&url, response).await?;
        if body.valid {
            Ok(body.data)
        } else {
            Ok(None)
        }
    }

    async fn list_authors(&self, role: Option<Role>) -> Result<Vec<Author>, BackendError> {
        let url = self.endpoint("/author/all");

        let mut request = self.client.get(&url);
        if let Some(role) = role {
            request = request.query(&[("role", role.to_string())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        let body: DataEnvelope<Vec<Author>> = Self::decode(&url, response).await?;
        Ok(body.data)
    }

    async fn create_author(&self, author: &NewAuthor) -> Result<(), BackendError> {
        let url = self.endpoint("/author/");
        debug!("creating author '{}'", author.username);

        let response = self
            .client
            .post(&url)
            .json(author)
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        Self::check_status(&url, &response)
    }

    async fn list_questions(
        &self,
        filter: &QuestionFilter,
        params: &ListParams,
    ) -> Result<QuestionPage, BackendError> {
        let url = self.endpoint("/questions");

        let mut query: Vec<(&str, String)> = vec![
            ("page", params.page.to_string()),
            ("page_size", params.page_size.to_string()),
        ];
        if let Some(status) = filter.status {
            query.push(("status", status.to_string()));
        }
        if let Some(category) = &filter.category {
            query.push(("category", category.clone()));
        }
        if let Some(difficulty) = filter.difficulty {
            query.push(("difficulty", difficulty.to_string()));
        }
        if let Some(author_id) = filter.author_id {
            query.push(("author_id", author_id.to_string()));
        }
        if let Some(news_date) = &filter.news_date {
            query.push(("news_date", news_date.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        let body: DataEnvelope<QuestionPage> = Self::decode(&url, response).await?;
        Ok(body.data)
    }

    async fn get_question(&self, id: i64) -> Result<Question, BackendError> {
        let url = self.endpoint(&format!("/question/{}", id));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        let body: DataEnvelope<Question> = Self::decode(&url, response).await?;
        Ok(body.data)
    }

    async fn create_questions(&self, questions: &[Question]) -> Result<(), BackendError> {
        let url = self.endpoint("/questions/");
        debug!("creating {} question(s)", questions.len());

        let response = self
            .client
            .post(&url)
            .json(questions)
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        Self::check_status(&url, &response)
    }

    async fn update_question(
        &self,
        id: i64,
        patch: &QuestionPatch,
    ) -> Result<Question, BackendError> {
        let url = self.endpoint(&format!("/question/{}", id));
        debug!("patching question {}", id);

        let response = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        let body: DataEnvelope<Question> = Self::decode(&url, response).await?;
        Ok(body.data)
    }

    async fn delete_question(&self, id: i64) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("/question/{}", id));
        debug!("deleting question {}", id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        Self::check_status(&url, &response)
    }

    async fn fetch_news(
        &self,
        source: NewsSource,
        category: &str,
    ) -> Result<Vec<NewsReference>, BackendError> {
        let url = self.endpoint("/news");

        let response = self
            .client
            .get(&url)
            .query(&[("source", source.as_str()), ("category", category)])
            .send()
            .await
            .map_err(|e| Self::request_failed(&url, e))?;

        let body: DataEnvelope<Vec<NewsReference>> = Self::decode(&url, response).await?;
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionStatus;

    fn backend(base_url: &str) -> HttpQuizBackend {
        HttpQuizBackend::new(&BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joining() {
        let b = backend("http://localhost:9000");
        assert_eq!(b.endpoint("/author/all"), "http://localhost:9000/author/all");
        assert_eq!(b.endpoint("/question/7"), "http://localhost:9000/question/7");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let b = backend("http://localhost:9000/");
        assert_eq!(b.endpoint("/news"), "http://localhost:9000/news");
    }

    #[test]
    fn test_verify_creds_response_shapes() {
        let accepted: VerifyCredsResponse =
            serde_json::from_str(r#"{"valid": true, "data": {"id": 3, "username": "casey"}}"#)
                .unwrap();
        assert!(accepted.valid);
        assert_eq!(accepted.data.unwrap().id, 3);

        // Rejections may omit the data field entirely
        let rejected: VerifyCredsResponse = serde_json::from_str(r#"{"valid": false}"#).unwrap();
        assert!(!rejected.valid);
        assert!(rejected.data.is_none());
    }

    #[test]
    fn test_question_page_envelope() {
        let json = r#"{
            "data": {
                "result": [{
                    "id": 1,
                    "question": "Who hosted the 2023 world cup?",
                    "option_1": "India",
                    "option_2": "England",
                    "option_3": "Australia",
                    "option_4": "South Africa",
                    "correct_option": 1,
                    "category": "cricket",
                    "difficulty": "easy",
                    "status": "draft",
                    "author_id": 4
                }],
                "next_page": 2
            }
        }"#;
        let envelope: DataEnvelope<QuestionPage> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.result.len(), 1);
        assert_eq!(envelope.data.result[0].status, QuestionStatus::Draft);
        assert_eq!(envelope.data.next_page, Some(2));
    }
}
