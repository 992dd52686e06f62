//! The answer ledger's record types.
//!
//! Answers are append-only: corrections are new entries, and the ledger is
//! the system of record for audit and export. Explicit skips are recorded
//! too, paired with a human-readable open point on the session.

use crate::question::Question;
use crate::session::AgentId;
use serde::{Deserialize, Serialize};

/// What the user supplied for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    /// One or more of the question's predefined options.
    Selected(Vec<String>),
    /// Free text.
    Custom(String),
}

/// One ledger record: (question, answer) plus attribution metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Id of the origin question, when one is available.
    #[serde(default)]
    pub question_id: Option<String>,
    /// Raw question text, kept so records stay readable without the banks.
    pub question_text: String,
    /// Interest-set snapshot: every agent this answer is attributed to.
    /// A single entry for bank questions, possibly several for
    /// deduplicated dynamic questions.
    #[serde(default)]
    pub agents: Vec<AgentId>,
    /// Chosen options, empty for custom or skipped answers.
    #[serde(default)]
    pub selected_values: Vec<String>,
    /// Free-text answer, if any.
    #[serde(default)]
    pub custom_text: Option<String>,
    /// True when the answer was supplied automatically rather than by the
    /// user.
    #[serde(default)]
    pub auto_fallback: bool,
    /// True when the user explicitly skipped the question.
    #[serde(default)]
    pub skipped: bool,
    /// RFC 3339 timestamp of the record.
    pub answered_at: String,
}

impl Answer {
    /// Builds a user-supplied answer record for a deduplicated question.
    pub fn for_question(question: &Question, input: AnswerInput) -> Self {
        Self::build(
            Some(question.id.clone()),
            question.text.clone(),
            question.agents.clone(),
            Some(input),
            false,
            false,
        )
    }

    /// Builds a skip record for a deduplicated question.
    pub fn skip_question(question: &Question) -> Self {
        Self::build(
            Some(question.id.clone()),
            question.text.clone(),
            question.agents.clone(),
            None,
            false,
            true,
        )
    }

    /// Builds a record attributed to a single agent's bank question.
    pub fn for_agent_question(
        question_id: Option<String>,
        question_text: impl Into<String>,
        agent: AgentId,
        input: AnswerInput,
    ) -> Self {
        Self::build(
            question_id,
            question_text.into(),
            vec![agent],
            Some(input),
            false,
            false,
        )
    }

    /// Builds a skip record attributed to a single agent's bank question.
    pub fn skip_agent_question(
        question_id: Option<String>,
        question_text: impl Into<String>,
        agent: AgentId,
    ) -> Self {
        Self::build(question_id, question_text.into(), vec![agent], None, false, true)
    }

    /// Builds an auto-fallback record attributed to a single agent.
    pub fn auto_for_agent_question(
        question_id: Option<String>,
        question_text: impl Into<String>,
        agent: AgentId,
        input: AnswerInput,
    ) -> Self {
        Self::build(
            question_id,
            question_text.into(),
            vec![agent],
            Some(input),
            true,
            false,
        )
    }

    fn build(
        question_id: Option<String>,
        question_text: String,
        agents: Vec<AgentId>,
        input: Option<AnswerInput>,
        auto_fallback: bool,
        skipped: bool,
    ) -> Self {
        let (selected_values, custom_text) = match input {
            Some(AnswerInput::Selected(values)) => (values, None),
            Some(AnswerInput::Custom(text)) => (Vec::new(), Some(text)),
            None => (Vec::new(), None),
        };
        Self {
            question_id,
            question_text,
            agents,
            selected_values,
            custom_text,
            auto_fallback,
            skipped,
            answered_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// True when this record is attributed to the given agent.
    pub fn concerns(&self, agent: &str) -> bool {
        self.agents.iter().any(|a| a == agent)
    }

    /// The answer rendered as display text.
    ///
    /// Skips render as "skipped"; an answered question with neither options
    /// nor text renders as an empty string.
    pub fn display_value(&self) -> String {
        if self.skipped {
            return "skipped".to_string();
        }
        if !self.selected_values.is_empty() {
            return self.selected_values.join(", ");
        }
        self.custom_text.clone().unwrap_or_default()
    }
}

/// Formats the open-point note recorded alongside a skip.
pub fn open_point(question_text: &str, reason: Option<&str>) -> String {
    format!(
        "{} - {}",
        question_text.trim(),
        reason.map(str::trim).filter(|r| !r.is_empty()).unwrap_or("skipped by user")
    )
}
