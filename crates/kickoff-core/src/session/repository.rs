//! Session repository trait.
//!
//! Defines the interface for persisting the single in-progress session.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for the one in-progress session blob.
///
/// This trait decouples the interview controller from the storage medium
/// (local file, server-side session store, etc.). Implementations persist at
/// most one session: starting a new interview overwrites the previous blob,
/// and compiling the briefing clears it.
///
/// Durability is best-effort: the controller logs and ignores save failures,
/// so implementations should not assume a failed `save` halts the interview.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists the session, replacing any previous blob.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Loads the saved session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: a well-formed blob was found
    /// - `Ok(None)`: no session is stored
    /// - `Err(_)`: the blob exists but cannot be read or parsed; the
    ///   resume controller discards it
    async fn load(&self) -> Result<Option<Session>>;

    /// Removes the saved session. Idempotent: clearing an empty store
    /// succeeds.
    async fn clear(&self) -> Result<()>;
}
