// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session lifecycle: silent sign-in at startup, login, logout, and the
//! renewal strategy behind the HTTP client's 401 handling.
//!
//! The state starts at `Initializing` and resolves exactly once to either
//! `Authenticated` or `Unauthenticated`; it never returns to `Initializing`.
//! The manager is the sole writer of [`BearerState`] and of the credential
//! store.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, watch};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{BearerState, Renewer};
use crate::store::CredentialStore;
use crate::token::{AuthUser, TokenApi};

/// Current session state, observable through [`SessionManager::subscribe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Bootstrap has not resolved yet.
    Initializing,
    Authenticated(AuthUser),
    Unauthenticated,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Transition events, for subscribers that react to sign-in/sign-out,
/// e.g. dropping cached query data that belongs to the prior identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
    TokenRenewed,
}

/// Owns the session state machine and both credential slots.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    tokens: TokenApi,
    bearer: BearerState,
    state_tx: watch::Sender<SessionState>,
    event_tx: broadcast::Sender<SessionEvent>,
    splash_floor: std::time::Duration,
}

impl SessionManager {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn CredentialStore>,
        tokens: TokenApi,
        bearer: BearerState,
    ) -> Arc<Self> {
        let (state_tx, _) = watch::channel(SessionState::Initializing);
        let (event_tx, _) = broadcast::channel(16);
        Arc::new(Self {
            store,
            tokens,
            bearer,
            state_tx,
            event_tx,
            splash_floor: config.splash_floor(),
        })
    }

    pub fn current(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Wait until the session leaves `Initializing`, returning the resolved
    /// state.
    pub async fn wait_resolved(&self) -> SessionState {
        let mut rx = self.state_tx.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if !matches!(current, SessionState::Initializing) {
                return current;
            }
            if rx.changed().await.is_err() {
                return self.current();
            }
        }
    }

    /// Silent sign-in at process start.
    ///
    /// Reads the stored refresh credential, renews the access token and
    /// validates it. Any failure clears both credential slots. The state is
    /// held at `Initializing` for at least the configured splash floor, even
    /// when the underlying calls settle immediately. No-op once resolved.
    pub async fn bootstrap(&self) {
        if !matches!(self.current(), SessionState::Initializing) {
            return;
        }
        let started = Instant::now();

        let outcome = match self.store.get() {
            None => {
                tracing::debug!("no stored credential, starting signed out");
                SessionState::Unauthenticated
            }
            Some(_) => match self.renew_access_token().await {
                None => {
                    self.forget_session();
                    SessionState::Unauthenticated
                }
                Some(token) => match self.tokens.validate(&token).await {
                    Ok(Some(user)) => {
                        tracing::info!(user = %user.id, "session restored");
                        SessionState::Authenticated(user)
                    }
                    Ok(None) => {
                        tracing::warn!(error = %ApiError::SessionInvalid, "session rejected");
                        self.forget_session();
                        SessionState::Unauthenticated
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "session validation failed");
                        self.forget_session();
                        SessionState::Unauthenticated
                    }
                },
            },
        };

        let elapsed = started.elapsed();
        if elapsed < self.splash_floor {
            tokio::time::sleep(self.splash_floor - elapsed).await;
        }

        // An explicit login/logout may have resolved the state while
        // bootstrap was in flight; never clobber it.
        self.state_tx.send_modify(|state| {
            if matches!(state, SessionState::Initializing) {
                *state = outcome;
            }
        });
    }

    /// Interactive sign-in. Persists the refresh credential and installs the
    /// access token before publishing `Authenticated`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        let resp = self.tokens.login(email, password).await?;
        self.store.set(&resp.refresh_token);
        self.bearer.install(&resp.access_token);
        let user = resp.user;
        tracing::info!(user = %user.id, "signed in");
        let _ = self.state_tx.send(SessionState::Authenticated(user.clone()));
        let _ = self.event_tx.send(SessionEvent::SignedIn);
        Ok(user)
    }

    /// Sign out. Best-effort and synchronous: clears both credential slots,
    /// publishes `Unauthenticated`, and emits `SignedOut`. Safe from any
    /// state, including while a renewal is in flight; the epoch bump makes
    /// any such renewal stale.
    pub fn logout(&self) {
        self.forget_session();
        tracing::info!("signed out");
        let _ = self.state_tx.send(SessionState::Unauthenticated);
        let _ = self.event_tx.send(SessionEvent::SignedOut);
    }

    /// Clear both credential slots without touching the published state.
    fn forget_session(&self) {
        self.store.delete();
        self.bearer.clear();
    }

    /// Renewal strategy shared by bootstrap and the HTTP client's 401 path.
    ///
    /// Reads the stored refresh credential fresh on every call and installs
    /// the renewed token only if no login/logout happened in the meantime.
    /// Failures are logged, never surfaced.
    pub async fn renew_access_token(&self) -> Option<String> {
        let epoch = self.bearer.epoch();
        let Some(refresh_token) = self.store.get() else {
            tracing::debug!("no stored credential, cannot renew");
            return None;
        };
        match self.tokens.refresh(&refresh_token).await {
            Ok(token) => {
                if !self.bearer.install_if_current(&token, epoch) {
                    tracing::debug!("renewed token discarded, session changed mid-renewal");
                    return None;
                }
                let _ = self.event_tx.send(SessionEvent::TokenRenewed);
                Some(token)
            }
            Err(err) => {
                tracing::warn!(kind = err.as_str(), error = %err, "access token renewal failed");
                None
            }
        }
    }
}

impl Renewer for SessionManager {
    fn renew(&self) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>> {
        Box::pin(self.renew_access_token())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
