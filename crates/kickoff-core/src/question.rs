//! Question types and the deduplication/flattening layer.
//!
//! Specialist agents each bring an ordered list of [`QuestionSpec`]s. Several
//! agents routinely ask the same thing ("target platform?"), so before the
//! user sees anything the per-agent lists are flattened into a single ordered
//! sequence of unique [`Question`]s, each carrying the set of agents
//! interested in its answer.

use crate::session::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// UUID v5 namespace for deterministic question ids.
const QUESTION_NAMESPACE: Uuid = Uuid::NAMESPACE_OID;

/// A question as specified by a single agent's bank, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// Stable identifier, if the source assigned one.
    #[serde(default)]
    pub id: Option<String>,
    /// The question text shown to the user.
    pub text: String,
    /// Predefined answer options; empty means free text only.
    #[serde(default)]
    pub options: Vec<String>,
}

impl QuestionSpec {
    /// Creates a free-text question spec without a preassigned id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Creates a question spec with answer options.
    pub fn with_options(
        text: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: None,
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// A deduplicated question carrying its interest set.
///
/// The interest set lists every agent whose bank claimed this question, in
/// roster order of first claim. Answer attribution goes through this set,
/// never through text comparison at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier. Taken from the first claiming spec, or derived
    /// deterministically from the normalized text when no spec carries one.
    pub id: String,
    /// The question text of the first claiming spec.
    pub text: String,
    /// Union of the claiming specs' options, first-seen order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Agents interested in the answer. Never empty.
    pub agents: Vec<AgentId>,
}

/// Normalizes question text for identity comparison: lowercased with
/// whitespace runs collapsed to single spaces.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flattens per-agent question banks into one ordered, deduplicated list.
///
/// Agents are visited in `roster` order, questions in bank order. A
/// question's position is fixed by its first occurrence; a later agent
/// claiming the same normalized text joins the interest set without moving
/// the question. Specs with no id get a deterministic UUID v5 of the
/// normalized text, so flattening the same input twice yields identical
/// output.
pub fn flatten_questions(
    roster: &[AgentId],
    banks: &HashMap<AgentId, Vec<QuestionSpec>>,
) -> Vec<Question> {
    let mut flattened: Vec<Question> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for agent in roster {
        let Some(specs) = banks.get(agent) else {
            continue;
        };
        for spec in specs {
            let key = normalize_text(&spec.text);
            if key.is_empty() {
                continue;
            }
            match by_key.get(&key).copied() {
                Some(position) => {
                    let question = &mut flattened[position];
                    if !question.agents.contains(agent) {
                        question.agents.push(agent.clone());
                    }
                    for option in &spec.options {
                        if !question.options.contains(option) {
                            question.options.push(option.clone());
                        }
                    }
                }
                None => {
                    let id = spec
                        .id
                        .clone()
                        .unwrap_or_else(|| derive_question_id(&key));
                    by_key.insert(key, flattened.len());
                    flattened.push(Question {
                        id,
                        text: spec.text.trim().to_string(),
                        options: spec.options.clone(),
                        agents: vec![agent.clone()],
                    });
                }
            }
        }
    }

    flattened
}

fn derive_question_id(normalized_text: &str) -> String {
    Uuid::new_v5(&QUESTION_NAMESPACE, normalized_text.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(questions: &[(&str, &[&str])]) -> Vec<QuestionSpec> {
        questions
            .iter()
            .map(|(text, options)| QuestionSpec::with_options(*text, options.iter().copied()))
            .collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Target   Platform? "), "target platform?");
        assert_eq!(normalize_text("TARGET PLATFORM?"), "target platform?");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_shared_question_keeps_first_seen_position() {
        let roster = vec!["architecture".to_string(), "security".to_string()];
        let mut banks = HashMap::new();
        banks.insert(
            "architecture".to_string(),
            bank(&[("Target platform?", &["Web", "Mobile"]), ("Expected load?", &[])]),
        );
        banks.insert(
            "security".to_string(),
            bank(&[("Compliance requirements?", &[]), ("Target platform?", &["Desktop"])]),
        );

        let flattened = flatten_questions(&roster, &banks);

        assert_eq!(flattened.len(), 3);
        assert_eq!(flattened[0].text, "Target platform?");
        assert_eq!(
            flattened[0].agents,
            vec!["architecture".to_string(), "security".to_string()]
        );
        // Options union in first-seen order.
        assert_eq!(flattened[0].options, vec!["Web", "Mobile", "Desktop"]);
        assert_eq!(flattened[1].text, "Expected load?");
        assert_eq!(flattened[2].text, "Compliance requirements?");
        assert_eq!(flattened[2].agents, vec!["security".to_string()]);
    }

    #[test]
    fn test_flattening_is_idempotent() {
        let roster = vec!["a".to_string(), "b".to_string()];
        let mut banks = HashMap::new();
        banks.insert("a".to_string(), bank(&[("One?", &[]), ("Two?", &["x"])]));
        banks.insert("b".to_string(), bank(&[("two?", &["y"]), ("Three?", &[])]));

        let first = flatten_questions(&roster, &banks);
        let second = flatten_questions(&roster, &banks);

        assert_eq!(first, second);
    }

    #[test]
    fn test_case_and_whitespace_insensitive_identity() {
        let roster = vec!["a".to_string(), "b".to_string()];
        let mut banks = HashMap::new();
        banks.insert("a".to_string(), bank(&[("Target  platform?", &[])]));
        banks.insert("b".to_string(), bank(&[("target platform?", &[])]));

        let flattened = flatten_questions(&roster, &banks);

        assert_eq!(flattened.len(), 1);
        assert_eq!(flattened[0].agents.len(), 2);
    }

    #[test]
    fn test_preassigned_id_wins_over_derived() {
        let roster = vec!["a".to_string()];
        let mut banks = HashMap::new();
        let mut spec = QuestionSpec::new("Budget range?");
        spec.id = Some("q-budget".to_string());
        banks.insert("a".to_string(), vec![spec]);

        let flattened = flatten_questions(&roster, &banks);
        assert_eq!(flattened[0].id, "q-budget");
    }

    #[test]
    fn test_agents_without_banks_are_skipped() {
        let roster = vec!["a".to_string(), "ghost".to_string()];
        let mut banks = HashMap::new();
        banks.insert("a".to_string(), bank(&[("One?", &[])]));

        let flattened = flatten_questions(&roster, &banks);
        assert_eq!(flattened.len(), 1);
    }
}
