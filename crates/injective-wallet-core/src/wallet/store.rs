/*
[INPUT]:  Granter address and session storage directory
[OUTPUT]: Persisted auto-sign sessions
[POS]:    Wallet layer - persistence boundary for auto-sign sessions
[UPDATE]: When session file format or naming conventions change
*/

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::authz::AutoSignSession;
use crate::http::Result;

const SESSION_FILE_SUFFIX: &str = "_autosign.json";
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Where auto-sign sessions live between runs, keyed by granter address
pub trait SessionStore: Send + Sync {
    fn load(&self, granter: &str) -> Result<Option<AutoSignSession>>;

    fn save(&self, session: &AutoSignSession) -> Result<()>;

    fn remove(&self, granter: &str) -> Result<()>;

    fn list_granters(&self) -> Result<Vec<String>>;
}

/// One JSON file per granter, readable by the owner only
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    session_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(session_dir: impl AsRef<Path>) -> Self {
        Self {
            session_dir: session_dir.as_ref().to_path_buf(),
        }
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// Get the expected file path for a granter's session
    pub fn session_file_path(&self, granter: &str) -> PathBuf {
        self.session_dir
            .join(format!("{granter}{SESSION_FILE_SUFFIX}"))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, granter: &str) -> Result<Option<AutoSignSession>> {
        let path = self.session_file_path(granter);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<AutoSignSession>(&content) {
            Ok(session) if session.granter == granter => Ok(Some(session)),
            Ok(session) => {
                warn!(
                    path = %path.display(),
                    stored = %session.granter,
                    "session file belongs to a different granter, ignoring"
                );
                Ok(None)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable session file, ignoring");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &AutoSignSession) -> Result<()> {
        if !self.session_dir.exists() {
            fs::create_dir_all(&self.session_dir)?;
        }

        let path = self.session_file_path(&session.granter);
        let content = serde_json::to_vec_pretty(session)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(SESSION_FILE_MODE);
        let mut file = options.open(&path)?;

        // `mode` only applies to newly created files
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))?;

        file.write_all(&content)?;
        Ok(())
    }

    fn remove(&self, granter: &str) -> Result<()> {
        let path = self.session_file_path(granter);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn list_granters(&self) -> Result<Vec<String>> {
        let mut granters = Vec::new();
        if !self.session_dir.exists() {
            return Ok(granters);
        }

        for entry in fs::read_dir(&self.session_dir)?.flatten() {
            if let Some(name) = entry.file_name().to_str() {
                if let Some(granter) = name.strip_suffix(SESSION_FILE_SUFFIX) {
                    granters.push(granter.to_string());
                }
            }
        }
        granters.sort();
        Ok(granters)
    }
}

/// Process-local store; sessions end with the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, AutoSignSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, granter: &str) -> Result<Option<AutoSignSession>> {
        let guard = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get(granter).cloned())
    }

    fn save(&self, session: &AutoSignSession) -> Result<()> {
        let mut guard = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(session.granter.clone(), session.clone());
        Ok(())
    }

    fn remove(&self, granter: &str) -> Result<()> {
        let mut guard = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        guard.remove(granter);
        Ok(())
    }

    fn list_granters(&self) -> Result<Vec<String>> {
        let guard = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let mut granters: Vec<String> = guard.keys().cloned().collect();
        granters.sort();
        Ok(granters)
    }
}
