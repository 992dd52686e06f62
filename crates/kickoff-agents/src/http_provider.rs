//! HttpProvider - REST adapter for a remote question/agent service.
//!
//! Posts the vision (and, for follow-ups, the prior answers) to a configured
//! endpoint and parses the structured response. Responses omitting
//! `reasons`/`not_needed` parse fine; the static catalog descriptions cover
//! the gap downstream.

use async_trait::async_trait;
use kickoff_core::answer::Answer;
use kickoff_core::provider::{QuestionProvider, TeamRecommendation};
use kickoff_core::question::QuestionSpec;
use kickoff_core::session::AgentId;
use kickoff_core::{KickoffError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Provider implementation that talks to a remote HTTP service.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct TeamRequest<'a> {
    vision: &'a str,
}

#[derive(Serialize)]
struct QuestionsRequest<'a> {
    vision: &'a str,
    agents: &'a [AgentId],
    answers: &'a [Answer],
}

#[derive(Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    questions: HashMap<AgentId, Vec<QuestionSpec>>,
}

impl HttpProvider {
    /// Creates a provider for the given base URL (e.g.
    /// `https://intake.example.com/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| KickoffError::provider(format!("request to {} failed: {}", url, err)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(KickoffError::provider(format!(
                "{} returned {}: {}",
                url, status, body_text
            )));
        }

        response
            .json()
            .await
            .map_err(|err| KickoffError::provider(format!("failed to parse {} response: {}", url, err)))
    }
}

#[async_trait]
impl QuestionProvider for HttpProvider {
    async fn recommend_team(&self, vision: &str) -> Result<TeamRecommendation> {
        self.post("team", &TeamRequest { vision }).await
    }

    async fn dynamic_questions(
        &self,
        vision: &str,
        roster: &[AgentId],
        answers: &[Answer],
    ) -> Result<HashMap<AgentId, Vec<QuestionSpec>>> {
        let response: QuestionsResponse = self
            .post(
                "questions",
                &QuestionsRequest {
                    vision,
                    agents: roster,
                    answers,
                },
            )
            .await?;
        Ok(response.questions)
    }
}
