//! The question/agent provider seam.
//!
//! Computing question content and agent recommendations is an external
//! concern. The interview controller only depends on this trait; the
//! `kickoff-agents` crate supplies an offline catalog implementation and an
//! HTTP adapter.

use crate::answer::Answer;
use crate::error::Result;
use crate::question::QuestionSpec;
use crate::session::AgentId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A provider's team recommendation for a given vision.
///
/// `reasons`, `not_needed` and `questions` default to empty so lean
/// providers that omit them still parse; missing reasons fall back to the
/// static catalog descriptions at rendering time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRecommendation {
    /// Recommended roster, in interview order.
    pub selected_agents: Vec<AgentId>,
    /// Justification for each included agent.
    #[serde(default)]
    pub reasons: HashMap<AgentId, String>,
    /// Justification for each excluded agent.
    #[serde(default)]
    pub not_needed: HashMap<AgentId, String>,
    /// Static question bank per recommended agent.
    #[serde(default)]
    pub questions: HashMap<AgentId, Vec<QuestionSpec>>,
}

/// An opaque service that recommends agents and generates questions.
///
/// Both calls may suspend (out-of-process). The controller treats them as
/// transactional gates: a failure leaves the session untouched and is
/// surfaced as a recoverable `Provider` error.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Recommends a specialist team for the given vision.
    async fn recommend_team(&self, vision: &str) -> Result<TeamRecommendation>;

    /// Generates project-specific follow-up questions for the confirmed
    /// roster, keyed by agent. Prior answers may inform the result.
    async fn dynamic_questions(
        &self,
        vision: &str,
        roster: &[AgentId],
        answers: &[Answer],
    ) -> Result<HashMap<AgentId, Vec<QuestionSpec>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_tolerates_omitted_fields() {
        // A lean provider response carrying only the roster must parse.
        let parsed: TeamRecommendation =
            serde_json::from_str(r#"{"selected_agents": ["architecture", "security"]}"#).unwrap();

        assert_eq!(parsed.selected_agents.len(), 2);
        assert!(parsed.reasons.is_empty());
        assert!(parsed.not_needed.is_empty());
        assert!(parsed.questions.is_empty());
    }
}
