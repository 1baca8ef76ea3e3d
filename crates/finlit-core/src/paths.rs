//! File system paths for the finlit client.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Manages file system paths for the client.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client runtime files (~/.finlit)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.finlit`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".finlit"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.finlit).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.finlit/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the persisted session file path (~/.finlit/session.json).
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the log directory (~/.finlit/logs).
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure the base and log directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn with_base_dir_uses_given_root() {
        let paths = Paths::with_base_dir(PathBuf::from("/tmp/finlit-test"));
        assert_eq!(paths.base_dir(), &PathBuf::from("/tmp/finlit-test"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/finlit-test/config.json")
        );
        assert_eq!(
            paths.session_file(),
            PathBuf::from("/tmp/finlit-test/session.json")
        );
    }

    #[test]
    fn ensure_dirs_creates_base_and_logs() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("finlit"));
        paths.ensure_dirs().unwrap();
        assert!(paths.base_dir().is_dir());
        assert!(paths.log_dir().is_dir());
    }
}
