//! TOML-file-backed session repository.
//!
//! Persists the single in-progress session as one TOML blob with ACID-ish
//! guarantees:
//! - **Atomicity**: saves go through a tmp file + atomic rename
//! - **Isolation**: an exclusive file lock guards each operation
//! - **Durability**: explicit fsync before rename
//!
//! A corrupt blob surfaces as a typed serialization error; the resume
//! controller turns that into a discard, never a crash.

use crate::paths::KickoffPaths;
use async_trait::async_trait;
use kickoff_core::session::{Session, SessionRepository};
use kickoff_core::{KickoffError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Stores the session blob at a fixed file path.
pub struct TomlSessionRepository {
    path: PathBuf,
}

impl TomlSessionRepository {
    /// Creates a repository at the default location
    /// (`~/.config/kickoff/session.toml`).
    pub fn default_location() -> Result<Self> {
        let path = KickoffPaths::session_file()
            .map_err(|e| KickoffError::storage(format!("failed to resolve session path: {}", e)))?;
        Ok(Self::with_path(path))
    }

    /// Creates a repository at an explicit path. Used by tests and the
    /// `--store` CLI override.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this repository reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| KickoffError::storage("session path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| KickoffError::storage("session path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }

    fn acquire_lock(&self) -> Result<FileLock> {
        FileLock::acquire(&self.path)
    }
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn save(&self, session: &Session) -> Result<()> {
        let _lock = self.acquire_lock()?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = toml::to_string_pretty(session)?;

        // Write to a temporary file in the same directory, then rename.
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), "session persisted");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Session>> {
        let _lock = self.acquire_lock()?;

        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let session: Session = toml::from_str(&content)?;
        Ok(Some(session))
    }

    async fn clear(&self) -> Result<()> {
        let _lock = self.acquire_lock()?;

        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock next to the given path.
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| KickoffError::storage(format!("failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        let _ = fs::remove_file(&self.lock_path);
    }
}
