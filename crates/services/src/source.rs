use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::LoadError;

/// One trivia item exactly as the question source delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Where trivia batches come from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch `amount` raw questions in one request.
    async fn fetch(&self, amount: usize) -> Result<Vec<RawQuestion>, LoadError>;
}

/// Open Trivia DB style endpoint: `GET {base_url}?amount=N`.
#[derive(Clone, Debug)]
pub struct OpenTdbSource {
    client: Client,
    base_url: String,
}

impl OpenTdbSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, amount: usize) -> Result<Vec<RawQuestion>, LoadError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("amount", amount)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        if body.response_code != 0 {
            return Err(LoadError::Api {
                code: body.response_code,
            });
        }

        Ok(body.results)
    }
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    #[serde(default)]
    response_code: u32,
    results: Vec<RawQuestion>,
}
