//! Kickoff infrastructure layer.
//!
//! File-system implementations of the core persistence interfaces, plus
//! platform path resolution.

pub mod paths;
pub mod toml_session_repository;

pub use paths::{KickoffPaths, PathError};
pub use toml_session_repository::TomlSessionRepository;
