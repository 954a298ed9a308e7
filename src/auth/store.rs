//! Persistent slot for the session token.
//!
//! The token lives in exactly one place of truth: this store. The API
//! client's in-memory copy is always derived from it by the session manager.
//!
//! Two backends: the OS keychain (default for the binary) and a plain file
//! (headless environments and tests). Reads fail open - any storage error
//! resolves to "absent" so a broken keychain degrades to logged-out instead
//! of crashing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use keyring::Entry;
use tracing::warn;

const SERVICE_NAME: &str = "streamz-client";
const TOKEN_KEY: &str = "token";
const TOKEN_FILE: &str = "token";

enum Backend {
    Keyring,
    File(PathBuf),
}

pub struct CredentialStore {
    backend: Backend,
}

impl CredentialStore {
    /// Store the token in the OS keychain under the well-known `token` key
    pub fn keyring() -> Self {
        Self {
            backend: Backend::Keyring,
        }
    }

    /// Store the token as a plain file under the given directory
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File(dir.into()),
        }
    }

    /// Read the persisted token. Absent values and storage errors both
    /// resolve to `None`; errors are logged, never surfaced.
    pub fn get(&self) -> Option<String> {
        match &self.backend {
            Backend::Keyring => match Self::entry() {
                Ok(entry) => match entry.get_password() {
                    Ok(token) if !token.is_empty() => Some(token),
                    Ok(_) => None,
                    Err(keyring::Error::NoEntry) => None,
                    Err(e) => {
                        warn!(error = %e, "Failed to read token from keychain");
                        None
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Failed to open keyring entry");
                    None
                }
            },
            Backend::File(dir) => {
                let path = dir.join(TOKEN_FILE);
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        let token = contents.trim();
                        if token.is_empty() {
                            None
                        } else {
                            Some(token.to_string())
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to read token file");
                        None
                    }
                }
            }
        }
    }

    /// Persist the token, overwriting any previous value
    pub fn set(&self, token: &str) -> Result<()> {
        match &self.backend {
            Backend::Keyring => Self::entry()?
                .set_password(token)
                .context("Failed to store token in keychain"),
            Backend::File(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
                let path = dir.join(TOKEN_FILE);
                std::fs::write(&path, token)
                    .with_context(|| format!("Failed to write {}", path.display()))
            }
        }
    }

    /// Remove the persisted token. Idempotent: clearing an empty slot is
    /// not an error.
    pub fn clear(&self) -> Result<()> {
        match &self.backend {
            Backend::Keyring => match Self::entry()?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(e).context("Failed to delete token from keychain"),
            },
            Backend::File(dir) => {
                let path = dir.join(TOKEN_FILE);
                match std::fs::remove_file(&path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(e) => {
                        Err(e).with_context(|| format!("Failed to remove {}", path.display()))
                    }
                }
            }
        }
    }

    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_KEY).context("Failed to create keyring entry")
    }
}
