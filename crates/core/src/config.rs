// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Default HTTP request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default minimum time the session spends in `Initializing`, so a splash
/// screen is visible even when bootstrap resolves instantly.
pub const DEFAULT_SPLASH_FLOOR_MS: u64 = 3_000;

/// Configuration for the Zentra client core.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Zentra backend, without a trailing slash.
    pub base_url: String,
    /// HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Minimum elapsed time before bootstrap may leave `Initializing`.
    pub splash_floor_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            splash_floor_ms: DEFAULT_SPLASH_FLOOR_MS,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn splash_floor(&self) -> Duration {
        Duration::from_millis(self.splash_floor_ms)
    }

    /// Config for tests: short timeout, no splash floor.
    #[cfg(test)]
    pub fn test(base_url: impl Into<String>) -> Self {
        Self { timeout_ms: 5_000, splash_floor_ms: 0, ..Self::new(base_url) }
    }
}

/// Resolve the state directory for zentra data.
///
/// Checks `ZENTRA_STATE_DIR`, then `$XDG_STATE_HOME/zentra`,
/// then `$HOME/.local/state/zentra`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ZENTRA_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("zentra");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/state/zentra");
    }
    PathBuf::from(".zentra")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
