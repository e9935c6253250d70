// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable storage for the refresh credential.
//!
//! One secret-grade slot. Storage failures are never surfaced: a failed read
//! behaves as an absent credential and a failed write is logged and dropped,
//! so callers can treat the store as infallible.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Durable slot for the long-lived refresh credential.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential. Any storage failure reads as absent.
    fn get(&self) -> Option<String>;
    /// Overwrite the slot. Best effort.
    fn set(&self, credential: &str);
    /// Remove the slot. Best effort.
    fn delete(&self);
}

/// On-disk body of the credential slot.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    refresh_token: String,
}

/// File-backed credential store with atomic writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, json: &str) -> std::io::Result<()> {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Unique temp filename (PID + counter) so concurrent saves never race
        // on the same `.tmp` file.
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(
            "{}.{}.{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            std::process::id(),
            seq,
        );
        let tmp_path = self.path.with_file_name(tmp_name);
        std::fs::write(&tmp_path, json)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Option<String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %self.path.display(), error = %err, "credential read failed");
                }
                return None;
            }
        };
        match serde_json::from_str::<StoredCredential>(&contents) {
            Ok(stored) => Some(stored.refresh_token),
            Err(err) => {
                tracing::debug!(path = %self.path.display(), error = %err, "credential file malformed");
                None
            }
        }
    }

    fn set(&self, credential: &str) {
        let stored = StoredCredential { refresh_token: credential.to_owned() };
        let json = match serde_json::to_string_pretty(&stored) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "credential serialize failed");
                return;
            }
        };
        if let Err(err) = self.write_atomic(&json) {
            tracing::warn!(path = %self.path.display(), error = %err, "credential write failed");
        }
    }

    fn delete(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %err, "credential delete failed");
            }
        }
    }
}

/// In-memory credential store. Useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: parking_lot::Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credential: impl Into<String>) -> Self {
        Self { slot: parking_lot::Mutex::new(Some(credential.into())) }
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    fn set(&self, credential: &str) {
        *self.slot.lock() = Some(credential.to_owned());
    }

    fn delete(&self) {
        *self.slot.lock() = None;
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
