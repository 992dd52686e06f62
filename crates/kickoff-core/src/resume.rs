//! The resume controller.
//!
//! On startup the store may hold a session that was interrupted mid
//! interview. A well-formed blob is offered back to the user as a one-time
//! resume-or-discard decision; anything malformed is discarded with a
//! warning and never surfaced as a user-facing error.

use crate::error::Result;
use crate::interview::InterviewController;
use crate::provider::QuestionProvider;
use crate::session::{Session, SessionRepository};
use std::sync::Arc;

/// Detects and restores an interrupted session.
pub struct ResumeController {
    repository: Arc<dyn SessionRepository>,
}

impl ResumeController {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Looks for a resumable session.
    ///
    /// Returns `Some` only for a blob that deserialized cleanly and whose
    /// cursors are consistent with its phase. Corrupt data, missing
    /// required keys, unknown phase values and contradictory cursors are
    /// all recovered the same way: warn, discard, return `None`.
    pub async fn check(&self) -> Option<Session> {
        let session = match self.repository.load().await {
            Ok(Some(session)) => session,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable saved session");
                self.discard_quietly().await;
                return None;
            }
        };

        if let Err(error) = session.validate() {
            tracing::warn!(%error, "discarding inconsistent saved session");
            self.discard_quietly().await;
            return None;
        }

        Some(session)
    }

    /// Restores a controller from a checked session. Restoration is
    /// all-or-nothing: every aggregate field comes from the blob.
    pub fn resume(
        &self,
        session: Session,
        provider: Arc<dyn QuestionProvider>,
    ) -> InterviewController {
        InterviewController::from_session(session, provider, self.repository.clone())
    }

    /// Clears the stored session ("start new").
    pub async fn discard(&self) -> Result<()> {
        self.repository.clear().await
    }

    async fn discard_quietly(&self) {
        if let Err(error) = self.repository.clear().await {
            tracing::warn!(%error, "failed to clear invalid saved session");
        }
    }
}
