//! The briefing compiler.
//!
//! Folds vision, team, answers and open points into the final artifact and
//! renders it as exportable markdown. Compilation is a pure function: the
//! same session content always produces the same document and the same
//! rendered text, and partial answers render as "unanswered" rather than
//! failing.

use crate::session::{AgentId, Session};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// One question/response pair in the compiled document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingEntry {
    pub question: String,
    pub response: String,
    pub auto_fallback: bool,
    pub skipped: bool,
}

/// One specialist's portion of the briefing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSection {
    pub agent: AgentId,
    pub reason: String,
    pub entries: Vec<BriefingEntry>,
}

/// The final compiled artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Briefing {
    pub vision: String,
    pub team: Vec<AgentSection>,
    /// Deduplicated project-specific questions and their responses.
    pub project_questions: Vec<BriefingEntry>,
    /// Excluded agents with justification, sorted by agent id.
    pub not_needed: Vec<(AgentId, String)>,
    pub open_points: Vec<String>,
}

const UNANSWERED: &str = "unanswered";

/// Compiles the briefing from the session's collected material.
///
/// `descriptions` supplies the static per-agent fallback text used when the
/// provider omitted a reason for an included agent. Team sections follow
/// roster order, entries follow bank order, so output is deterministic.
pub fn build_briefing(session: &Session, descriptions: &HashMap<AgentId, String>) -> Briefing {
    let team = session
        .selected_agents
        .iter()
        .map(|agent| {
            let reason = session
                .agent_reasons
                .get(agent)
                .or_else(|| descriptions.get(agent))
                .cloned()
                .unwrap_or_else(|| "Selected for this project.".to_string());
            let entries = session
                .agent_questions
                .get(agent)
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .map(|spec| entry_for(session, spec.id.as_deref(), &spec.text))
                .collect();
            AgentSection {
                agent: agent.clone(),
                reason,
                entries,
            }
        })
        .collect();

    let project_questions = session
        .dynamic_questions
        .iter()
        .map(|question| entry_for(session, Some(question.id.as_str()), &question.text))
        .collect();

    let mut not_needed: Vec<(AgentId, String)> = session
        .not_needed_agents
        .iter()
        .map(|(agent, reason)| (agent.clone(), reason.clone()))
        .collect();
    not_needed.sort();

    Briefing {
        vision: session.vision.clone(),
        team,
        project_questions,
        not_needed,
        open_points: session.open_points.clone(),
    }
}

fn entry_for(session: &Session, id: Option<&str>, text: &str) -> BriefingEntry {
    match session.answer_for_question(id, text) {
        Some(answer) => BriefingEntry {
            question: text.to_string(),
            response: answer.display_value(),
            auto_fallback: answer.auto_fallback,
            skipped: answer.skipped,
        },
        None => BriefingEntry {
            question: text.to_string(),
            response: UNANSWERED.to_string(),
            auto_fallback: false,
            skipped: false,
        },
    }
}

impl Briefing {
    /// Renders the briefing as markdown suitable for download or hand-off.
    /// Deterministic: identical briefings render byte-identically.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Project Briefing\n\n");
        out.push_str("## Vision\n\n");
        out.push_str(self.vision.trim());
        out.push_str("\n\n");

        out.push_str("## Team\n");
        for section in &self.team {
            let _ = write!(out, "\n### {}\n\n{}\n\n", section.agent, section.reason);
            for entry in &section.entries {
                push_entry(&mut out, entry);
            }
        }

        if !self.project_questions.is_empty() {
            out.push_str("\n## Project Questions\n\n");
            for entry in &self.project_questions {
                push_entry(&mut out, entry);
            }
        }

        if !self.not_needed.is_empty() {
            out.push_str("\n## Not Needed\n\n");
            for (agent, reason) in &self.not_needed {
                let _ = writeln!(out, "- **{}**: {}", agent, reason);
            }
        }

        if !self.open_points.is_empty() {
            out.push_str("\n## Open Points\n\n");
            for point in &self.open_points {
                let _ = writeln!(out, "- {}", point);
            }
        }

        out
    }
}

fn push_entry(out: &mut String, entry: &BriefingEntry) {
    let suffix = if entry.auto_fallback {
        " _(auto-filled)_"
    } else {
        ""
    };
    let _ = writeln!(out, "- **{}** {}{}", entry.question, entry.response, suffix);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{Answer, AnswerInput};
    use crate::question::{Question, QuestionSpec};
    use crate::session::Phase;

    fn session_with_material() -> Session {
        let mut session = Session::new();
        session.vision = "A scheduling tool for clinics".to_string();
        session.phase = Phase::Summary;
        session.selected_agents = vec!["architecture".to_string(), "security".to_string()];
        session
            .agent_reasons
            .insert("architecture".to_string(), "Core system design.".to_string());
        session
            .not_needed_agents
            .insert("design".to_string(), "No visual surface yet.".to_string());
        session.agent_questions.insert(
            "architecture".to_string(),
            vec![
                QuestionSpec::with_options("Target platform?", ["Web", "Mobile"]),
                QuestionSpec::new("Expected load?"),
            ],
        );
        session
            .agent_questions
            .insert("security".to_string(), vec![QuestionSpec::new("Compliance needs?")]);
        session.dynamic_questions = vec![Question {
            id: "q-dyn".to_string(),
            text: "Who are the first users?".to_string(),
            options: vec![],
            agents: vec!["architecture".to_string()],
        }];
        session.answers.push(Answer::for_agent_question(
            None,
            "Target platform?",
            "architecture".to_string(),
            AnswerInput::Selected(vec!["Web".to_string()]),
        ));
        session.open_points.push("Expected load? - skipped by user".to_string());
        session
    }

    #[test]
    fn test_unanswered_questions_render_not_fail() {
        let session = session_with_material();
        let briefing = build_briefing(&session, &HashMap::new());

        let architecture = &briefing.team[0];
        assert_eq!(architecture.entries[0].response, "Web");
        assert_eq!(architecture.entries[1].response, "unanswered");
        assert_eq!(briefing.project_questions[0].response, "unanswered");
    }

    #[test]
    fn test_reason_falls_back_to_static_description() {
        let session = session_with_material();
        let mut descriptions = HashMap::new();
        descriptions.insert(
            "security".to_string(),
            "Covers threat modeling and compliance.".to_string(),
        );

        let briefing = build_briefing(&session, &descriptions);

        // Provider-supplied reason wins where present.
        assert_eq!(briefing.team[0].reason, "Core system design.");
        // Absent entry falls back to the static description.
        assert_eq!(briefing.team[1].reason, "Covers threat modeling and compliance.");
    }

    #[test]
    fn test_build_briefing_is_pure() {
        let session = session_with_material();
        let descriptions = HashMap::new();

        let first = build_briefing(&session, &descriptions);
        let second = build_briefing(&session, &descriptions);

        assert_eq!(first, second);
        assert_eq!(first.to_markdown(), second.to_markdown());
    }

    #[test]
    fn test_markdown_contains_all_sections() {
        let session = session_with_material();
        let markdown = build_briefing(&session, &HashMap::new()).to_markdown();

        assert!(markdown.starts_with("# Project Briefing"));
        assert!(markdown.contains("## Vision"));
        assert!(markdown.contains("### architecture"));
        assert!(markdown.contains("## Project Questions"));
        assert!(markdown.contains("- **design**: No visual surface yet."));
        assert!(markdown.contains("## Open Points"));
    }
}
