//! Session domain module.
//!
//! This module contains the session aggregate, the interview phase enum, and
//! the repository interface for session persistence.
//!
//! # Module Structure
//!
//! - `model`: Core session aggregate (`Session`, `AgentId`)
//! - `phase`: Interview phase enum (`Phase`)
//! - `repository`: Repository trait for session persistence

mod model;
mod phase;
mod repository;

// Re-export public API
pub use model::{AgentId, Session};
pub use phase::Phase;
pub use repository::SessionRepository;
