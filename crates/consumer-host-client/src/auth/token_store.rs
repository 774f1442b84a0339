/*
[INPUT]:  Wallet address, session token and storage directory
[OUTPUT]: Durable per-account token cache
[POS]:    Auth layer - persistent storage for consumer host tokens
[UPDATE]: When key naming or storage backend changes
*/

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::http::Result;

const TOKEN_KEY_PREFIX: &str = "consumer-host-services-token-";

/// Storage key for an account's token
pub fn token_key(account: &str) -> String {
    format!("{TOKEN_KEY_PREFIX}{account}")
}

/// Durable token cache keyed by account
pub trait TokenStore: Send + Sync + Debug {
    /// Load the cached token for an account
    fn load(&self, account: &str) -> Option<String>;

    /// Store a token for an account, replacing any previous one
    fn save(&self, account: &str, token: &str) -> Result<()>;

    /// Forget the cached token for an account
    fn remove(&self, account: &str) -> Result<()>;
}

/// File-backed token store: one file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    /// Create a new store rooted at the given directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Get the expected file path for an account's token
    pub fn token_file_path(&self, account: &str) -> PathBuf {
        self.dir.join(token_key(account))
    }

    /// List all accounts that have a cached token
    pub fn list_stored_accounts(&self) -> Vec<String> {
        let mut accounts = Vec::new();
        if let Ok(entries) = fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                if let Some(account) = entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.strip_prefix(TOKEN_KEY_PREFIX))
                {
                    accounts.push(account.to_string());
                }
            }
        }
        accounts.sort();
        accounts
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, account: &str) -> Option<String> {
        let content = fs::read_to_string(self.token_file_path(account)).ok()?;
        let token = content.trim_end_matches(['\r', '\n']);
        if token.is_empty() {
            return None;
        }
        Some(token.to_string())
    }

    fn save(&self, account: &str, token: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.token_file_path(account);
        fs::write(&path, token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    fn remove(&self, account: &str) -> Result<()> {
        match fs::remove_file(self.token_file_path(account)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, account: &str) -> Option<String> {
        let guard = self.tokens.lock().unwrap_or_else(|p| p.into_inner());
        guard.get(&token_key(account)).cloned()
    }

    fn save(&self, account: &str, token: &str) -> Result<()> {
        let mut guard = self.tokens.lock().unwrap_or_else(|p| p.into_inner());
        guard.insert(token_key(account), token.to_string());
        Ok(())
    }

    fn remove(&self, account: &str) -> Result<()> {
        let mut guard = self.tokens.lock().unwrap_or_else(|p| p.into_inner());
        guard.remove(&token_key(account));
        Ok(())
    }
}
