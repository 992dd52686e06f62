//! The interview controller: the phase state machine.
//!
//! All transitions are serialized through one controller instance. Provider
//! calls gate `submit_vision` and `confirm_team` transactionally: either
//! every derived field populates and the phase advances, or nothing changes.
//! Persistence is a best-effort side effect after every phase-relevant
//! mutation; a write failure never blocks the in-memory transition.

use crate::answer::{Answer, AnswerInput, open_point};
use crate::briefing::{Briefing, build_briefing};
use crate::error::{KickoffError, Result};
use crate::provider::QuestionProvider;
use crate::question::flatten_questions;
use crate::session::{AgentId, Phase, Session, SessionRepository};
use std::collections::HashMap;
use std::sync::Arc;

/// Drives one guided interview from vision intake to briefing.
///
/// The controller owns the [`Session`] aggregate and is the only code that
/// mutates it. Calls made in the wrong phase fail with
/// [`KickoffError::InvalidPhase`] and leave the session untouched.
pub struct InterviewController {
    session: Session,
    provider: Arc<dyn QuestionProvider>,
    repository: Arc<dyn SessionRepository>,
    /// Static per-agent descriptions used as the reason fallback when the
    /// provider omitted one.
    descriptions: HashMap<AgentId, String>,
    /// Cached artifact for idempotent terminal calls.
    briefing: Option<Briefing>,
}

impl InterviewController {
    /// Creates a controller with a fresh session in the `Vision` phase.
    pub fn new(
        provider: Arc<dyn QuestionProvider>,
        repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            session: Session::new(),
            provider,
            repository,
            descriptions: HashMap::new(),
            briefing: None,
        }
    }

    /// Reconstructs a controller from a restored session. Every field of
    /// the aggregate comes back exactly as persisted.
    pub fn from_session(
        session: Session,
        provider: Arc<dyn QuestionProvider>,
        repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            session,
            provider,
            repository,
            descriptions: HashMap::new(),
            briefing: None,
        }
    }

    /// Supplies static agent descriptions for reason fallbacks.
    pub fn with_descriptions(mut self, descriptions: HashMap<AgentId, String>) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Read access to the session aggregate.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    fn ensure_phase(&self, expected: Phase, operation: &str) -> Result<()> {
        if self.session.phase == expected {
            Ok(())
        } else {
            Err(KickoffError::invalid_phase(self.session.phase, operation))
        }
    }

    /// Persists the session, logging failures instead of surfacing them.
    /// The live session is the source of truth; durability is best-effort.
    async fn persist(&mut self) {
        self.session.touch();
        if let Err(error) = self.repository.save(&self.session).await {
            tracing::warn!(%error, "failed to persist session, continuing in memory");
        }
    }

    // ========================================================================
    // Vision intake
    // ========================================================================

    /// Submits the project vision and fetches the team recommendation.
    ///
    /// Valid only in `Vision`. Blank text fails validation. The provider
    /// call gates the transition: on failure nothing changes and the call
    /// may simply be retried.
    pub async fn submit_vision(&mut self, text: &str) -> Result<()> {
        self.ensure_phase(Phase::Vision, "submit_vision")?;
        let vision = text.trim();
        if vision.is_empty() {
            return Err(KickoffError::validation("project vision must not be empty"));
        }

        let recommendation = self.provider.recommend_team(vision).await?;

        self.session.vision = vision.to_string();
        self.session.selected_agents = dedup_roster(recommendation.selected_agents);
        self.session.agent_reasons = recommendation.reasons;
        self.session.not_needed_agents = recommendation.not_needed;
        self.session.agent_questions = recommendation.questions;
        self.session.phase = Phase::TeamSetup;
        self.persist().await;
        Ok(())
    }

    // ========================================================================
    // Team setup
    // ========================================================================

    /// Replaces the roster with a user-adjusted one, preserving order.
    ///
    /// Valid only in `TeamSetup`. An empty roster is accepted here and
    /// rejected at confirmation time.
    pub async fn update_team(&mut self, roster: Vec<AgentId>) -> Result<()> {
        self.ensure_phase(Phase::TeamSetup, "update_team")?;
        self.session.selected_agents = dedup_roster(roster);
        self.persist().await;
        Ok(())
    }

    /// Confirms the roster and fetches the project-specific questions.
    ///
    /// Valid only in `TeamSetup` with a non-empty roster. The provider call
    /// gates the transition transactionally. Moves to `DynamicQuestions`
    /// when any exist, else straight into the first agent's `GuidedQa`.
    pub async fn confirm_team(&mut self) -> Result<()> {
        self.ensure_phase(Phase::TeamSetup, "confirm_team")?;
        if self.session.selected_agents.is_empty() {
            return Err(KickoffError::validation(
                "select at least one specialist before confirming the team",
            ));
        }

        let banks = self
            .provider
            .dynamic_questions(
                &self.session.vision,
                &self.session.selected_agents,
                &self.session.answers,
            )
            .await?;
        let dynamic = flatten_questions(&self.session.selected_agents, &banks);

        self.session.dynamic_questions = dynamic;
        self.session.current_dynamic_index = 0;
        if self.session.dynamic_questions.is_empty() {
            self.advance_past_dynamic();
        } else {
            self.session.phase = Phase::DynamicQuestions;
        }
        self.persist().await;
        Ok(())
    }

    // ========================================================================
    // Dynamic questions
    // ========================================================================

    /// The dynamic question currently awaiting an answer.
    pub fn current_dynamic_question(&self) -> Result<&crate::question::Question> {
        self.ensure_phase(Phase::DynamicQuestions, "current_dynamic_question")?;
        self.session
            .current_dynamic_question()
            .ok_or_else(|| KickoffError::internal("dynamic cursor points past the question list"))
    }

    /// Answers the current dynamic question and advances the cursor.
    pub async fn answer_dynamic(&mut self, input: AnswerInput) -> Result<()> {
        self.ensure_phase(Phase::DynamicQuestions, "answer_dynamic")?;
        let question = self
            .session
            .current_dynamic_question()
            .ok_or_else(|| KickoffError::internal("dynamic cursor points past the question list"))?
            .clone();

        self.session.answers.push(Answer::for_question(&question, input));
        self.step_dynamic_cursor();
        self.persist().await;
        Ok(())
    }

    /// Skips the current dynamic question, recording an open point.
    pub async fn skip_dynamic(&mut self, reason: Option<&str>) -> Result<()> {
        self.ensure_phase(Phase::DynamicQuestions, "skip_dynamic")?;
        let question = self
            .session
            .current_dynamic_question()
            .ok_or_else(|| KickoffError::internal("dynamic cursor points past the question list"))?
            .clone();

        self.session.answers.push(Answer::skip_question(&question));
        self.session.open_points.push(open_point(&question.text, reason));
        self.step_dynamic_cursor();
        self.persist().await;
        Ok(())
    }

    fn step_dynamic_cursor(&mut self) {
        self.session.current_dynamic_index += 1;
        if self.session.current_dynamic_index >= self.session.dynamic_questions.len() {
            self.advance_past_dynamic();
        }
    }

    fn advance_past_dynamic(&mut self) {
        match self.session.selected_agents.first().cloned() {
            Some(first) => self.enter_agent(first),
            None => self.session.phase = Phase::Summary,
        }
    }

    // ========================================================================
    // Guided Q&A
    // ========================================================================

    /// The bank question currently awaiting an answer.
    pub fn current_guided_question(&self) -> Result<&crate::question::QuestionSpec> {
        self.ensure_phase(Phase::GuidedQa, "current_guided_question")?;
        self.session
            .current_guided_question()
            .ok_or_else(|| KickoffError::internal("guided cursor points past the bank"))
    }

    /// The agent whose bank is currently being walked.
    pub fn current_agent(&self) -> Option<&str> {
        self.session.current_agent.as_deref()
    }

    /// Answers the current bank question and advances the cursor. When the
    /// bank is exhausted the agent completes and the machine enters
    /// `AgentFeedback`.
    pub async fn answer_guided(&mut self, input: AnswerInput) -> Result<()> {
        self.ensure_phase(Phase::GuidedQa, "answer_guided")?;
        let (agent, spec) = self.current_guided_context()?;

        self.session.answers.push(Answer::for_agent_question(
            spec.id.clone(),
            spec.text.clone(),
            agent,
            input,
        ));
        self.step_guided_cursor();
        self.persist().await;
        Ok(())
    }

    /// Skips the current bank question, recording an open point.
    pub async fn skip_guided(&mut self, reason: Option<&str>) -> Result<()> {
        self.ensure_phase(Phase::GuidedQa, "skip_guided")?;
        let (agent, spec) = self.current_guided_context()?;

        self.session
            .answers
            .push(Answer::skip_agent_question(spec.id.clone(), spec.text.clone(), agent));
        self.session.open_points.push(open_point(&spec.text, reason));
        self.step_guided_cursor();
        self.persist().await;
        Ok(())
    }

    /// Auto-answers every remaining question of the current agent with its
    /// first option (empty text when it has none), marks the records as
    /// fallback answers, and completes the agent.
    pub async fn auto_fill_remaining(&mut self) -> Result<()> {
        self.ensure_phase(Phase::GuidedQa, "auto_fill_remaining")?;
        let agent = self
            .session
            .current_agent
            .clone()
            .ok_or_else(|| KickoffError::internal("guided phase without a current agent"))?;
        let remaining: Vec<_> = self
            .session
            .current_agent_bank()
            .unwrap_or_default()
            .iter()
            .skip(self.session.current_question_index)
            .cloned()
            .collect();

        for spec in remaining {
            let input = match spec.options.first() {
                Some(first) => AnswerInput::Selected(vec![first.clone()]),
                None => AnswerInput::Custom(String::new()),
            };
            self.session.answers.push(Answer::auto_for_agent_question(
                spec.id.clone(),
                spec.text.clone(),
                agent.clone(),
                input,
            ));
        }
        self.session.current_question_index =
            self.session.current_agent_bank().unwrap_or_default().len();
        self.complete_current_agent();
        self.persist().await;
        Ok(())
    }

    fn current_guided_context(&self) -> Result<(AgentId, crate::question::QuestionSpec)> {
        let agent = self
            .session
            .current_agent
            .clone()
            .ok_or_else(|| KickoffError::internal("guided phase without a current agent"))?;
        let spec = self
            .session
            .current_guided_question()
            .ok_or_else(|| KickoffError::internal("guided cursor points past the bank"))?
            .clone();
        Ok((agent, spec))
    }

    fn step_guided_cursor(&mut self) {
        self.session.current_question_index += 1;
        let exhausted = self
            .session
            .current_agent_bank()
            .map(|bank| self.session.current_question_index >= bank.len())
            .unwrap_or(true);
        if exhausted {
            self.complete_current_agent();
        }
    }

    /// Enters an agent's guided block. An agent with an empty bank
    /// completes immediately so the machine never stalls on a question
    /// that does not exist.
    fn enter_agent(&mut self, agent: AgentId) {
        self.session.current_agent = Some(agent);
        self.session.current_question_index = 0;
        self.session.phase = Phase::GuidedQa;
        let empty = self
            .session
            .current_agent_bank()
            .map(|bank| bank.is_empty())
            .unwrap_or(true);
        if empty {
            self.complete_current_agent();
        }
    }

    fn complete_current_agent(&mut self) {
        let current = self.session.current_agent.clone();
        self.session.completed_agent = current.clone();
        self.session.pending_next_agent = current.and_then(|agent| {
            let roster = &self.session.selected_agents;
            roster
                .iter()
                .position(|a| *a == agent)
                .and_then(|pos| roster.get(pos + 1))
                .cloned()
        });
        self.session.phase = Phase::AgentFeedback;
    }

    // ========================================================================
    // Agent feedback
    // ========================================================================

    /// The read-only rollup reviewed between agents: every ledger record
    /// attributed to the completed agent, auto-filled entries included.
    pub fn feedback_rollup(&self) -> Result<(&str, Vec<&Answer>)> {
        self.ensure_phase(Phase::AgentFeedback, "feedback_rollup")?;
        let agent = self
            .session
            .completed_agent
            .as_deref()
            .ok_or_else(|| KickoffError::internal("feedback phase without a completed agent"))?;
        Ok((agent, self.session.agent_answers(agent)))
    }

    /// Leaves the feedback screen: continues with the next agent's guided
    /// block when one is pending, otherwise lands in `Summary`.
    pub async fn continue_feedback(&mut self) -> Result<()> {
        self.ensure_phase(Phase::AgentFeedback, "continue_feedback")?;
        self.session.completed_agent = None;
        match self.session.pending_next_agent.take() {
            Some(next) => {
                self.enter_agent(next);
            }
            None => {
                self.session.current_agent = None;
                self.session.current_question_index = 0;
                self.session.phase = Phase::Summary;
            }
        }
        self.persist().await;
        Ok(())
    }

    // ========================================================================
    // Briefing
    // ========================================================================

    /// Compiles the briefing and finishes the session.
    ///
    /// Valid in `Summary`; terminal and idempotent. On success the phase
    /// becomes `Briefing` and the persisted session is cleared so a
    /// completed interview never lingers as a resume candidate. Calling
    /// again after success returns the cached artifact.
    pub async fn generate_briefing(&mut self) -> Result<Briefing> {
        if self.session.phase == Phase::Briefing {
            if let Some(cached) = &self.briefing {
                return Ok(cached.clone());
            }
        }
        self.ensure_phase(Phase::Summary, "generate_briefing")?;

        let briefing = build_briefing(&self.session, &self.descriptions);
        self.session.phase = Phase::Briefing;
        if let Err(error) = self.repository.clear().await {
            tracing::warn!(%error, "failed to clear completed session from the store");
        }
        self.briefing = Some(briefing.clone());
        Ok(briefing)
    }
}

/// Removes duplicate roster entries, keeping first occurrence order.
fn dedup_roster(roster: Vec<AgentId>) -> Vec<AgentId> {
    let mut seen = Vec::with_capacity(roster.len());
    for agent in roster {
        if !seen.contains(&agent) {
            seen.push(agent);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::TeamRecommendation;
    use crate::question::QuestionSpec;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Mock provider with a fixed two-agent recommendation and
    // configurable dynamic questions.
    struct MockProvider {
        fail_team: bool,
        fail_dynamic: bool,
        dynamic: HashMap<AgentId, Vec<QuestionSpec>>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                fail_team: false,
                fail_dynamic: false,
                dynamic: HashMap::new(),
            }
        }

        fn with_dynamic(mut self, dynamic: HashMap<AgentId, Vec<QuestionSpec>>) -> Self {
            self.dynamic = dynamic;
            self
        }
    }

    #[async_trait]
    impl QuestionProvider for MockProvider {
        async fn recommend_team(&self, _vision: &str) -> Result<TeamRecommendation> {
            if self.fail_team {
                return Err(KickoffError::provider("team service unavailable"));
            }
            let mut questions = HashMap::new();
            questions.insert(
                "architecture".to_string(),
                vec![
                    QuestionSpec::with_options("Target platform?", ["Web", "Mobile"]),
                    QuestionSpec::new("Expected load?"),
                ],
            );
            questions.insert(
                "security".to_string(),
                vec![QuestionSpec::new("Compliance needs?")],
            );
            let mut reasons = HashMap::new();
            reasons.insert("architecture".to_string(), "Core design.".to_string());
            Ok(TeamRecommendation {
                selected_agents: vec!["architecture".to_string(), "security".to_string()],
                reasons,
                not_needed: HashMap::new(),
                questions,
            })
        }

        async fn dynamic_questions(
            &self,
            _vision: &str,
            _roster: &[AgentId],
            _answers: &[Answer],
        ) -> Result<HashMap<AgentId, Vec<QuestionSpec>>> {
            if self.fail_dynamic {
                return Err(KickoffError::provider("question service unavailable"));
            }
            Ok(self.dynamic.clone())
        }
    }

    // Mock repository that records saves and can fail on demand.
    struct MockRepository {
        saved: Mutex<Option<Session>>,
        fail_saves: bool,
        cleared: Mutex<bool>,
    }

    impl MockRepository {
        fn new() -> Self {
            Self {
                saved: Mutex::new(None),
                fail_saves: false,
                cleared: Mutex::new(false),
            }
        }

        fn failing() -> Self {
            Self {
                fail_saves: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SessionRepository for MockRepository {
        async fn save(&self, session: &Session) -> Result<()> {
            if self.fail_saves {
                return Err(KickoffError::storage("disk full"));
            }
            *self.saved.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        async fn load(&self) -> Result<Option<Session>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn clear(&self) -> Result<()> {
            *self.saved.lock().unwrap() = None;
            *self.cleared.lock().unwrap() = true;
            Ok(())
        }
    }

    fn controller() -> InterviewController {
        InterviewController::new(
            Arc::new(MockProvider::new()),
            Arc::new(MockRepository::new()),
        )
    }

    async fn controller_at_guided() -> InterviewController {
        let mut c = controller();
        c.submit_vision("A scheduling tool").await.unwrap();
        c.confirm_team().await.unwrap();
        assert_eq!(c.phase(), Phase::GuidedQa);
        c
    }

    #[test]
    fn test_dedup_roster_keeps_first_occurrence() {
        let roster = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedup_roster(roster), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_vision_fails_validation_and_keeps_phase() {
        let mut c = controller();
        let err = c.submit_vision("   ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(c.phase(), Phase::Vision);
    }

    #[tokio::test]
    async fn test_submit_vision_populates_and_advances() {
        let mut c = controller();
        c.submit_vision("  A scheduling tool  ").await.unwrap();

        assert_eq!(c.phase(), Phase::TeamSetup);
        assert_eq!(c.session().vision, "A scheduling tool");
        assert_eq!(
            c.session().selected_agents,
            vec!["architecture".to_string(), "security".to_string()]
        );
        assert!(c.session().agent_questions.contains_key("security"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_transactional() {
        let provider = MockProvider {
            fail_team: true,
            ..MockProvider::new()
        };
        let mut c =
            InterviewController::new(Arc::new(provider), Arc::new(MockRepository::new()));

        let err = c.submit_vision("A scheduling tool").await.unwrap_err();
        assert!(err.is_provider());
        assert_eq!(c.phase(), Phase::Vision);
        assert!(c.session().selected_agents.is_empty());
        assert!(c.session().vision.is_empty());
    }

    #[tokio::test]
    async fn test_confirm_team_requires_roster() {
        let mut c = controller();
        c.submit_vision("A scheduling tool").await.unwrap();
        c.update_team(Vec::new()).await.unwrap();

        let err = c.confirm_team().await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(c.phase(), Phase::TeamSetup);
    }

    #[tokio::test]
    async fn test_wrong_phase_is_hard_error() {
        let mut c = controller();
        let err = c.confirm_team().await.unwrap_err();
        assert!(err.is_invalid_phase());
        assert_eq!(c.phase(), Phase::Vision);

        let err = c.continue_feedback().await.unwrap_err();
        assert!(err.is_invalid_phase());
    }

    #[tokio::test]
    async fn test_no_dynamic_questions_goes_straight_to_guided() {
        let mut c = controller();
        c.submit_vision("A scheduling tool").await.unwrap();
        c.confirm_team().await.unwrap();

        assert_eq!(c.phase(), Phase::GuidedQa);
        assert_eq!(c.current_agent(), Some("architecture"));
    }

    #[tokio::test]
    async fn test_dynamic_questions_answered_then_guided() {
        let mut dynamic = HashMap::new();
        dynamic.insert(
            "architecture".to_string(),
            vec![QuestionSpec::new("Who are the first users?")],
        );
        dynamic.insert(
            "security".to_string(),
            vec![QuestionSpec::new("who are the first users?")],
        );
        let provider = MockProvider::new().with_dynamic(dynamic);
        let mut c =
            InterviewController::new(Arc::new(provider), Arc::new(MockRepository::new()));

        c.submit_vision("A scheduling tool").await.unwrap();
        c.confirm_team().await.unwrap();
        assert_eq!(c.phase(), Phase::DynamicQuestions);
        // Overlapping dynamic questions deduplicate to one.
        assert_eq!(c.session().dynamic_questions.len(), 1);

        c.answer_dynamic(AnswerInput::Custom("Clinic staff".to_string()))
            .await
            .unwrap();
        assert_eq!(c.phase(), Phase::GuidedQa);

        // The single answer is attributed to both interested agents.
        assert_eq!(c.session().agent_answers("architecture").len(), 1);
        assert_eq!(c.session().agent_answers("security").len(), 1);
    }

    #[tokio::test]
    async fn test_agent_completion_sequence_ends_in_summary() {
        let mut c = controller_at_guided().await;

        // Architecture has two questions.
        c.answer_guided(AnswerInput::Selected(vec!["Web".to_string()]))
            .await
            .unwrap();
        c.answer_guided(AnswerInput::Custom("Low hundreds".to_string()))
            .await
            .unwrap();
        assert_eq!(c.phase(), Phase::AgentFeedback);
        assert_eq!(c.session().completed_agent.as_deref(), Some("architecture"));
        assert_eq!(c.session().pending_next_agent.as_deref(), Some("security"));

        c.continue_feedback().await.unwrap();
        assert_eq!(c.phase(), Phase::GuidedQa);
        assert_eq!(c.current_agent(), Some("security"));

        // Security has one question.
        c.answer_guided(AnswerInput::Custom("HIPAA".to_string()))
            .await
            .unwrap();
        assert_eq!(c.phase(), Phase::AgentFeedback);
        assert_eq!(c.session().completed_agent.as_deref(), Some("security"));
        assert!(c.session().pending_next_agent.is_none());

        // No pending agent: always Summary, never GuidedQa.
        c.continue_feedback().await.unwrap();
        assert_eq!(c.phase(), Phase::Summary);
    }

    #[tokio::test]
    async fn test_skip_records_open_point() {
        let mut c = controller_at_guided().await;

        c.skip_guided(Some("depends on funding")).await.unwrap();
        assert_eq!(
            c.session().open_points,
            vec!["Target platform? - depends on funding".to_string()]
        );
        let record = &c.session().answers[0];
        assert!(record.skipped);
        assert!(record.concerns("architecture"));
    }

    #[tokio::test]
    async fn test_auto_fill_marks_fallback_and_completes_agent() {
        let mut c = controller_at_guided().await;

        c.auto_fill_remaining().await.unwrap();
        assert_eq!(c.phase(), Phase::AgentFeedback);

        let answers = c.session().agent_answers("architecture");
        assert_eq!(answers.len(), 2);
        assert!(answers.iter().all(|a| a.auto_fallback));
        // First option chosen where options exist.
        assert_eq!(answers[0].selected_values, vec!["Web".to_string()]);

        // The rollup shows the auto-filled entries.
        let (agent, rollup) = c.feedback_rollup().unwrap();
        assert_eq!(agent, "architecture");
        assert_eq!(rollup.len(), 2);
    }

    #[tokio::test]
    async fn test_save_failure_does_not_block_transition() {
        let mut c = InterviewController::new(
            Arc::new(MockProvider::new()),
            Arc::new(MockRepository::failing()),
        );

        c.submit_vision("A scheduling tool").await.unwrap();
        assert_eq!(c.phase(), Phase::TeamSetup);
    }

    #[tokio::test]
    async fn test_generate_briefing_is_terminal_and_idempotent() {
        let repository = Arc::new(MockRepository::new());
        let mut c =
            InterviewController::new(Arc::new(MockProvider::new()), repository.clone());

        c.submit_vision("A scheduling tool").await.unwrap();
        c.confirm_team().await.unwrap();
        c.auto_fill_remaining().await.unwrap();
        c.continue_feedback().await.unwrap();
        c.auto_fill_remaining().await.unwrap();
        c.continue_feedback().await.unwrap();
        assert_eq!(c.phase(), Phase::Summary);

        let first = c.generate_briefing().await.unwrap();
        assert_eq!(c.phase(), Phase::Briefing);
        // The completed session no longer lingers as a resume candidate.
        assert!(repository.load().await.unwrap().is_none());
        assert!(*repository.cleared.lock().unwrap());

        let second = c.generate_briefing().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_ledger_is_append_only() {
        let mut c = controller_at_guided().await;

        c.answer_guided(AnswerInput::Selected(vec!["Web".to_string()]))
            .await
            .unwrap();
        let before = c.session().answers.len();
        c.answer_guided(AnswerInput::Custom("unsure".to_string()))
            .await
            .unwrap();
        assert_eq!(c.session().answers.len(), before + 1);
    }
}
