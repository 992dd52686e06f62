//! Interview phase types for session state management.

use serde::{Deserialize, Serialize};

/// Represents the current phase of the guided interview.
///
/// Phases advance in machine order: `Vision → TeamSetup → DynamicQuestions →
/// (per agent: GuidedQa ⇄ AgentFeedback) → Summary → Briefing`. `Vision` is
/// the initial state and `Briefing` the terminal one.
///
/// The wire representation uses SCREAMING_SNAKE_CASE names; an unknown value
/// in a persisted blob fails deserialization, which the resume controller
/// treats as an invalid session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Collecting the free-text project vision.
    Vision,
    /// Reviewing and confirming the recommended specialist roster.
    TeamSetup,
    /// Answering generated, project-specific questions.
    DynamicQuestions,
    /// Answering the current specialist's static question bank.
    GuidedQa,
    /// Reviewing a completed specialist's answers before moving on.
    AgentFeedback,
    /// Reviewing the collected material before compilation.
    Summary,
    /// The briefing has been compiled; the session is finished.
    Briefing,
}

impl Phase {
    /// Returns the wire name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Vision => "VISION",
            Phase::TeamSetup => "TEAM_SETUP",
            Phase::DynamicQuestions => "DYNAMIC_QUESTIONS",
            Phase::GuidedQa => "GUIDED_QA",
            Phase::AgentFeedback => "AGENT_FEEDBACK",
            Phase::Summary => "SUMMARY",
            Phase::Briefing => "BRIEFING",
        }
    }

    /// True for the terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Briefing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
