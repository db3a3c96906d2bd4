//! Run Debate use case
//!
//! [`DebateOrchestrator`] owns the session and drives the turn loop:
//! guard checks (turn cap, concession, manual stop), search decision,
//! prompt assembly, persona generation, and finally the judge verdict
//! and summary. Turns are strictly sequential; no two persona calls are
//! ever in flight at once, and the stop signal is only observed at
//! cycle boundaries.

use crate::ports::persona_client::{ClientError, PersonaClient, StreamHandle};
use crate::ports::presenter::DebatePresenter;
use crate::ports::search_provider::SearchProvider;
use crate::use_cases::search_decision::{SearchDecision, SearchDecisionAgent};
use crate::use_cases::summarize::{SummarizeError, SummarizeUseCase};
use arena_domain::{
    build_history, detect_language, render_transcript, strip_attribution, DebatePhase,
    DebateSession, DebateSettings, DomainError, PersonaPrompt, Role, StreamEvent, Turn,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that can occur while running a debate
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("{role} generation failed: {source}")]
    Generation { role: Role, source: ClientError },

    #[error("Verdict generation failed: {0}")]
    Verdict(ClientError),

    #[error(transparent)]
    Summary(#[from] SummarizeError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The three persona backends, selected by persona identity.
pub struct PersonaClients {
    pub strategist: Arc<dyn PersonaClient>,
    pub critic: Arc<dyn PersonaClient>,
    pub judge: Arc<dyn PersonaClient>,
}

impl PersonaClients {
    fn for_role(&self, role: Role) -> &Arc<dyn PersonaClient> {
        match role {
            Role::Critic => &self.critic,
            Role::Judge => &self.judge,
            _ => &self.strategist,
        }
    }
}

/// Search augmentation settings for a session.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub enabled: bool,
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: 3,
        }
    }
}

/// Owns one debate session and runs it to a verdict.
pub struct DebateOrchestrator {
    session: DebateSession,
    clients: PersonaClients,
    search: Arc<dyn SearchProvider>,
    decision: SearchDecisionAgent,
    search_settings: SearchSettings,
    stop: CancellationToken,
}

impl DebateOrchestrator {
    pub fn new(
        settings: DebateSettings,
        clients: PersonaClients,
        search: Arc<dyn SearchProvider>,
        decision: SearchDecisionAgent,
        search_settings: SearchSettings,
    ) -> Self {
        Self {
            session: DebateSession::new(settings),
            clients,
            search,
            decision,
            search_settings,
            stop: CancellationToken::new(),
        }
    }

    pub fn session(&self) -> &DebateSession {
        &self.session
    }

    /// Token that forces the next cycle boundary into verdict-pending.
    ///
    /// An in-flight generation is allowed to complete; the signal is
    /// only observed before a new turn starts.
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Submit a user turn, starting (or redirecting) the debate.
    ///
    /// `attachment` is pre-extracted file text; callers must have
    /// already rejected extraction errors, never passing them here.
    pub fn submit(
        &mut self,
        question: &str,
        attachment: Option<&str>,
    ) -> Result<(), RunDebateError> {
        let content = match attachment {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{}\n\n[Attached Material]:\n{}", question, extra)
            }
            _ => question.to_string(),
        };
        self.session.push_user(content)?;
        info!(turns = self.session.turn_count(), "User turn submitted");
        Ok(())
    }

    /// Run the turn loop until the debate ends or a generation fails.
    ///
    /// On a generation failure the session stays in `Running` with the
    /// turn count unchanged, so calling `run` again resumes the debate.
    pub async fn run(&mut self, presenter: &dyn DebatePresenter) -> Result<(), RunDebateError> {
        if self.session.phase() != DebatePhase::Running {
            return Err(DomainError::WrongPhase(self.session.phase()).into());
        }

        loop {
            // Guard checks, in order. Manual stop skips the rest.
            if self.stop.is_cancelled() {
                info!("Manual stop observed at cycle boundary");
                return self.end_exchange(presenter);
            }
            if self.session.at_turn_cap() {
                info!(max_turns = self.session.settings().max_turns, "Turn cap reached");
                return self.end_exchange(presenter);
            }
            if self.session.critic_conceded() {
                info!("Critic conceded");
                return self.end_exchange(presenter);
            }

            self.generate_turn(presenter).await?;
        }
    }

    fn end_exchange(&mut self, presenter: &dyn DebatePresenter) -> Result<(), RunDebateError> {
        self.session.request_verdict()?;
        presenter.on_phase_change(self.session.phase());
        Ok(())
    }

    async fn generate_turn(&mut self, presenter: &dyn DebatePresenter) -> Result<(), RunDebateError> {
        let speaker = self.session.next_speaker();
        let evidence = self.gather_evidence(speaker, presenter).await;

        let system_prompt =
            PersonaPrompt::debater_system(speaker, self.session.turn_count(), evidence.as_deref());
        let history = build_history(speaker, self.session.transcript());

        let client = self.clients.for_role(speaker);
        presenter.on_turn_start(speaker, client.model());

        let handle = client
            .generate_streaming(&system_prompt, &history)
            .await
            .map_err(|source| RunDebateError::Generation { role: speaker, source })?;

        let text = collect_stream(handle, speaker, presenter)
            .await
            .map_err(|source| RunDebateError::Generation { role: speaker, source })?;

        presenter.on_turn_complete(speaker);
        // Models sometimes prefix their own label; store the turn clean
        self.session
            .push_debater(speaker, strip_attribution(speaker, &text))?;
        Ok(())
    }

    /// Decide whether to search and fetch evidence for this turn.
    ///
    /// Every failure path degrades to "no evidence": the turn proceeds
    /// on the persona's own reasoning.
    async fn gather_evidence(
        &self,
        speaker: Role,
        presenter: &dyn DebatePresenter,
    ) -> Option<String> {
        if !self.search_settings.enabled {
            return None;
        }

        let recent = self.session.last_turn().map(|t| t.content.as_str())?;

        match self.decision.decide(speaker, recent).await {
            SearchDecision::Pass => None,
            SearchDecision::Search(query) => {
                presenter.on_search_query(speaker, &query);
                match self
                    .search
                    .search(&query, self.search_settings.max_results)
                    .await
                {
                    Ok(evidence) => {
                        presenter.on_search_result(speaker, evidence.is_some());
                        evidence
                    }
                    Err(e) => {
                        warn!("Search failed, proceeding without evidence: {}", e);
                        presenter.on_search_result(speaker, false);
                        None
                    }
                }
            }
        }
    }

    /// Deliver the verdict: one judge turn anchored to the original
    /// user question, in that question's language.
    ///
    /// On failure the session returns to verdict-pending and no judge
    /// turn is recorded; calling again retries.
    pub async fn execute_verdict(
        &mut self,
        presenter: &dyn DebatePresenter,
    ) -> Result<&Turn, RunDebateError> {
        let language = detect_language(self.session.original_question().unwrap_or_default());
        let prompt = PersonaPrompt::judge(&self.session.judge_context(), language);

        self.session.begin_verdict()?;
        presenter.on_phase_change(self.session.phase());
        presenter.on_turn_start(Role::Judge, self.clients.judge.model());

        // Single-shot: the full prompt is the content, no history.
        let result = match self.clients.judge.generate_streaming(&prompt, &[]).await {
            Ok(handle) => collect_stream(handle, Role::Judge, presenter).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(text) => {
                presenter.on_turn_complete(Role::Judge);
                self.session.record_verdict(text)?;
                presenter.on_phase_change(self.session.phase());
                match self.session.last_turn() {
                    Some(turn) => Ok(turn),
                    None => Err(DomainError::WrongPhase(self.session.phase()).into()),
                }
            }
            Err(e) => {
                self.session.verdict_failed()?;
                presenter.on_phase_change(self.session.phase());
                Err(RunDebateError::Verdict(e))
            }
        }
    }

    /// Generate the post-debate summary report.
    pub async fn summarize(&self) -> Result<String, RunDebateError> {
        if self.session.phase() != DebatePhase::Finished {
            return Err(DomainError::WrongPhase(self.session.phase()).into());
        }
        let use_case = SummarizeUseCase::new(Arc::clone(&self.clients.judge));
        Ok(use_case.execute(self.session.transcript()).await?)
    }

    /// Plain-text export of the full transcript.
    pub fn export(&self) -> String {
        render_transcript(self.session.transcript())
    }

    /// Discard the session entirely and return to a fresh one.
    pub fn reset(&mut self) {
        let settings = self.session.settings().clone();
        self.session = DebateSession::new(settings);
        self.stop = CancellationToken::new();
        info!("Session reset");
    }
}

/// Drain a stream handle, forwarding chunks to the presenter.
///
/// The returned text is the concatenation of deltas in arrival order;
/// a bare `Completed` carries the full text itself.
async fn collect_stream(
    handle: StreamHandle,
    role: Role,
    presenter: &dyn DebatePresenter,
) -> Result<String, ClientError> {
    let mut receiver = handle.receiver;
    let mut text = String::new();

    while let Some(event) = receiver.recv().await {
        match event {
            StreamEvent::Delta(chunk) => {
                presenter.on_turn_chunk(role, &chunk);
                text.push_str(&chunk);
            }
            StreamEvent::Completed(full) => {
                if text.is_empty() {
                    text = full;
                }
                return Ok(text);
            }
            StreamEvent::Error(e) => return Err(ClientError::RequestFailed(e)),
        }
    }

    Ok(text)
}
