//! Unified path management for kickoff data files.
//!
//! All kickoff state lives under the platform config directory
//! (`~/.config/kickoff/` on Linux), resolved via the `dirs` crate so the
//! layout is consistent across platforms.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for kickoff.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/kickoff/           # Config directory
/// └── session.toml             # The single in-progress session blob
/// ```
pub struct KickoffPaths;

impl KickoffPaths {
    /// Returns the kickoff configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/kickoff/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("kickoff"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the persisted session blob.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
