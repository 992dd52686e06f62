//! Offline provider backed by the builtin catalog.
//!
//! Deterministic: the same vision always yields the same roster, reasons and
//! question banks. Used as the CLI default and throughout the tests; a
//! remote service can be swapped in via `HttpProvider` without touching the
//! interview controller.

use crate::catalog::{default_profiles, follow_ups, question_bank};
use async_trait::async_trait;
use kickoff_core::Result;
use kickoff_core::answer::Answer;
use kickoff_core::provider::{QuestionProvider, TeamRecommendation};
use kickoff_core::question::QuestionSpec;
use kickoff_core::session::AgentId;
use std::collections::HashMap;

/// Recommends specialists by scoring the vision against catalog keywords.
#[derive(Debug, Default)]
pub struct CatalogProvider;

impl CatalogProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuestionProvider for CatalogProvider {
    async fn recommend_team(&self, vision: &str) -> Result<TeamRecommendation> {
        let mut recommendation = TeamRecommendation::default();

        for profile in default_profiles() {
            let id: AgentId = profile.id.to_string();
            if profile.always_included || profile.matches(vision) {
                let reason = if profile.always_included {
                    format!("{} Included for every project.", profile.description)
                } else {
                    format!("{} The vision mentions related topics.", profile.description)
                };
                recommendation.selected_agents.push(id.clone());
                recommendation.reasons.insert(id.clone(), reason);
                recommendation.questions.insert(id, question_bank(profile.id));
            } else {
                recommendation.not_needed.insert(
                    id,
                    format!(
                        "No {} signals in the vision; can be added during team setup.",
                        profile.name.to_lowercase()
                    ),
                );
            }
        }

        Ok(recommendation)
    }

    async fn dynamic_questions(
        &self,
        _vision: &str,
        roster: &[AgentId],
        _answers: &[Answer],
    ) -> Result<HashMap<AgentId, Vec<QuestionSpec>>> {
        let mut banks = HashMap::new();
        for agent in roster {
            let questions = follow_ups(agent);
            if !questions.is_empty() {
                banks.insert(agent.clone(), questions);
            }
        }
        Ok(banks)
    }
}
