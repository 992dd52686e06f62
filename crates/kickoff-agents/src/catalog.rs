//! The builtin specialist catalog.
//!
//! Each profile carries the static description used as the fallback reason
//! when a provider omits one, the trigger keywords the offline provider
//! scores against, a static question bank, and the follow-up templates that
//! feed the dynamic question phase.

use kickoff_core::question::QuestionSpec;
use kickoff_core::session::AgentId;
use std::collections::HashMap;

/// A specialist role whose question set must be satisfied before the
/// interview can summarize.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    /// Stable identifier (e.g. "architecture").
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Static description, doubling as the fallback inclusion reason.
    pub description: &'static str,
    /// Vision keywords that pull this specialist into the roster.
    pub keywords: &'static [&'static str],
    /// Included in every roster regardless of keywords.
    pub always_included: bool,
}

impl AgentProfile {
    /// True when the vision text mentions one of this profile's keywords.
    pub fn matches(&self, vision: &str) -> bool {
        let lower = vision.to_lowercase();
        self.keywords.iter().any(|keyword| lower.contains(keyword))
    }
}

/// Returns the official specialist profiles, in default interview order.
pub fn default_profiles() -> Vec<AgentProfile> {
    vec![
        AgentProfile {
            id: "architecture",
            name: "Architecture",
            description: "Shapes the overall system design: platforms, integrations, scalability and the technical constraints the project must respect.",
            keywords: &["api", "integration", "platform", "scale", "service"],
            always_included: true,
        },
        AgentProfile {
            id: "ux",
            name: "User Experience",
            description: "Clarifies who the users are, what they are trying to accomplish, and how the product should feel to them.",
            keywords: &["user", "customer", "app", "interface"],
            always_included: true,
        },
        AgentProfile {
            id: "security",
            name: "Security",
            description: "Covers threat modeling, authentication, and the compliance obligations that follow from the data being handled.",
            keywords: &["payment", "health", "login", "personal", "compliance", "medical", "bank"],
            always_included: false,
        },
        AgentProfile {
            id: "data",
            name: "Data",
            description: "Covers what is stored, how it is reported on, and which insights the project is expected to produce.",
            keywords: &["report", "analytics", "data", "dashboard", "metric"],
            always_included: false,
        },
        AgentProfile {
            id: "operations",
            name: "Operations",
            description: "Covers deployment, environments, monitoring and the day-two concerns of running the system.",
            keywords: &["deploy", "cloud", "hosting", "server", "monitor"],
            always_included: false,
        },
    ]
}

/// The static question bank for a profile.
pub fn question_bank(agent: &str) -> Vec<QuestionSpec> {
    match agent {
        "architecture" => vec![
            spec("arch-platform", "Target platform?", &["Web", "Mobile", "Desktop"]),
            spec("arch-load", "Expected number of users in the first year?", &[]),
            spec(
                "arch-integrations",
                "Which existing systems must this integrate with?",
                &[],
            ),
        ],
        "ux" => vec![
            spec("ux-users", "Who is the primary user group?", &[]),
            spec(
                "ux-device",
                "Where will the product mostly be used?",
                &["Office", "On the go", "Home", "Mixed"],
            ),
        ],
        "security" => vec![
            spec(
                "sec-data",
                "What kinds of sensitive data will be handled?",
                &[],
            ),
            spec(
                "sec-compliance",
                "Which compliance frameworks apply?",
                &["GDPR", "HIPAA", "PCI DSS", "None known"],
            ),
        ],
        "data" => vec![
            spec("data-sources", "What are the main data sources?", &[]),
            spec(
                "data-reporting",
                "Who consumes the reports, and how often?",
                &[],
            ),
        ],
        "operations" => vec![
            spec(
                "ops-hosting",
                "Preferred hosting model?",
                &["Public cloud", "On premises", "Hybrid", "Undecided"],
            ),
            spec(
                "ops-availability",
                "What availability does the business expect?",
                &["Business hours", "24/7", "Best effort"],
            ),
        ],
        _ => Vec::new(),
    }
}

/// The follow-up templates included for a selected profile in the dynamic
/// question phase. Overlap between profiles is intentional; the flattening
/// layer merges them.
pub fn follow_ups(agent: &str) -> Vec<QuestionSpec> {
    match agent {
        "architecture" => vec![
            QuestionSpec::new("What is the expected launch timeline?"),
            QuestionSpec::new("What is the single riskiest assumption in this project?"),
        ],
        "ux" => vec![QuestionSpec::new("What should a first-time user achieve in the first ten minutes?")],
        "security" => vec![QuestionSpec::new("What is the single riskiest assumption in this project?")],
        "data" => vec![QuestionSpec::new("Which decision should the first report support?")],
        "operations" => vec![QuestionSpec::new("What is the expected launch timeline?")],
        _ => Vec::new(),
    }
}

/// Static descriptions keyed by agent id, for reason fallbacks.
pub fn descriptions() -> HashMap<AgentId, String> {
    default_profiles()
        .into_iter()
        .map(|profile| (profile.id.to_string(), profile.description.to_string()))
        .collect()
}

fn spec(id: &str, text: &str, options: &[&str]) -> QuestionSpec {
    let mut spec = QuestionSpec::with_options(text, options.iter().copied());
    spec.id = Some(id.to_string());
    spec
}
