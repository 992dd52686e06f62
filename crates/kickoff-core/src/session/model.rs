//! Session domain model.
//!
//! This module contains the core Session aggregate that represents one
//! in-progress guided interview in the application's domain layer.

use super::phase::Phase;
use crate::answer::Answer;
use crate::question::{Question, QuestionSpec};
use crate::error::{KickoffError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a specialist agent (e.g. "architecture", "security").
pub type AgentId = String;

/// Represents one in-progress interview session.
///
/// The session is the unit of persistence and resumption. It is created
/// empty when intake begins, mutated in place only through the interview
/// controller's transition operations, persisted after every phase-relevant
/// mutation, and cleared from the store exactly once, when the briefing
/// compiles successfully.
///
/// `vision` and `phase` intentionally carry no serde default: a persisted
/// blob missing either key fails deserialization, which the resume
/// controller treats as an invalid session to discard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Free-text problem statement; immutable once the phase advances past
    /// intake.
    pub vision: String,
    /// Current phase; single source of truth for which surface is active.
    pub phase: Phase,
    /// User-confirmed specialist roster, in interview order. Mutable during
    /// team setup only.
    #[serde(default)]
    pub selected_agents: Vec<AgentId>,
    /// Provider justification for each included agent. Absent entries fall
    /// back to the static catalog description at rendering time.
    #[serde(default)]
    pub agent_reasons: HashMap<AgentId, String>,
    /// Provider justification for each excluded agent.
    #[serde(default)]
    pub not_needed_agents: HashMap<AgentId, String>,
    /// Generated project-specific questions, flattened and deduplicated.
    #[serde(default)]
    pub dynamic_questions: Vec<Question>,
    /// Cursor into `dynamic_questions`.
    #[serde(default)]
    pub current_dynamic_index: usize,
    /// Static per-agent question banks.
    #[serde(default)]
    pub agent_questions: HashMap<AgentId, Vec<QuestionSpec>>,
    /// The agent whose bank is currently being answered.
    #[serde(default)]
    pub current_agent: Option<AgentId>,
    /// Cursor into the current agent's bank.
    #[serde(default)]
    pub current_question_index: usize,
    /// Append-only answer ledger.
    #[serde(default)]
    pub answers: Vec<Answer>,
    /// Human-readable notes for skipped or unclear questions.
    #[serde(default)]
    pub open_points: Vec<String>,
    /// Feedback-loop cursor: the agent whose rollup is being reviewed.
    #[serde(default)]
    pub completed_agent: Option<AgentId>,
    /// Feedback-loop cursor: the agent queued after the review.
    #[serde(default)]
    pub pending_next_agent: Option<AgentId>,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
}

impl Session {
    /// Creates an empty session at the start of intake.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            vision: String::new(),
            phase: Phase::Vision,
            selected_agents: Vec::new(),
            agent_reasons: HashMap::new(),
            not_needed_agents: HashMap::new(),
            dynamic_questions: Vec::new(),
            current_dynamic_index: 0,
            agent_questions: HashMap::new(),
            current_agent: None,
            current_question_index: 0,
            answers: Vec::new(),
            open_points: Vec::new(),
            completed_agent: None,
            pending_next_agent: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Refreshes the update timestamp. Called by the controller on every
    /// mutating transition.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// The dynamic question under the cursor, if any.
    pub fn current_dynamic_question(&self) -> Option<&Question> {
        self.dynamic_questions.get(self.current_dynamic_index)
    }

    /// The current agent's question bank.
    pub fn current_agent_bank(&self) -> Option<&[QuestionSpec]> {
        let agent = self.current_agent.as_deref()?;
        self.agent_questions.get(agent).map(Vec::as_slice)
    }

    /// The guided question under the cursor, if any.
    pub fn current_guided_question(&self) -> Option<&QuestionSpec> {
        self.current_agent_bank()?.get(self.current_question_index)
    }

    /// Ledger query: every record whose interest set contains `agent`.
    ///
    /// A deduplicated question answered once is returned for every agent in
    /// its interest set, regardless of which agent triggered the answer.
    pub fn agent_answers(&self, agent: &str) -> Vec<&Answer> {
        self.answers.iter().filter(|a| a.concerns(agent)).collect()
    }

    /// Ledger query: the latest record for a question, by id when available,
    /// by exact text otherwise. The latest entry wins because corrections
    /// are appended, never edited in place.
    pub fn answer_for_question(&self, id: Option<&str>, text: &str) -> Option<&Answer> {
        self.answers.iter().rev().find(|a| match (id, a.question_id.as_deref()) {
            (Some(wanted), Some(recorded)) => wanted == recorded,
            _ => a.question_text == text,
        })
    }

    /// Checks cross-field consistency of a restored session.
    ///
    /// Deserialization already guarantees `vision` and `phase` are present
    /// and well-formed; this catches blobs whose cursors contradict the
    /// phase, which would otherwise silently skip or repeat an agent.
    pub fn validate(&self) -> Result<()> {
        match self.phase {
            Phase::Vision | Phase::TeamSetup | Phase::Summary | Phase::Briefing => {}
            Phase::DynamicQuestions => {
                if self.current_dynamic_index >= self.dynamic_questions.len() {
                    return Err(KickoffError::invalid_session(
                        "dynamic question cursor out of range",
                    ));
                }
            }
            Phase::GuidedQa => {
                let Some(bank) = self.current_agent_bank() else {
                    return Err(KickoffError::invalid_session(
                        "guided phase without a current agent",
                    ));
                };
                if self.current_question_index > bank.len() {
                    return Err(KickoffError::invalid_session(
                        "guided question cursor out of range",
                    ));
                }
            }
            Phase::AgentFeedback => {
                if self.completed_agent.is_none() {
                    return Err(KickoffError::invalid_session(
                        "feedback phase without a completed agent",
                    ));
                }
            }
        }
        if !matches!(self.phase, Phase::Vision | Phase::TeamSetup) && self.selected_agents.is_empty()
        {
            return Err(KickoffError::invalid_session(
                "roster empty past team setup",
            ));
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
