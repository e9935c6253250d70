// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated HTTP transport with transparent access-token renewal.
//!
//! Every data request carries the current bearer credential from
//! [`BearerState`]. On a 401 the client runs the injected [`Renewer`] once
//! per renewal episode, no matter how many requests observe the 401
//! concurrently, then retries each affected request exactly once. Auth
//! maintenance itself ([`crate::token::TokenApi`]) runs on the plain
//! transport and can never re-enter this path.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;

use crate::config::ClientConfig;
use crate::error::{classify_status, server_message, ApiError};

pub(crate) fn build_http(config: &ClientConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .unwrap_or_default()
}

/// Shared bearer credential, passed to [`ApiClient`] at construction.
///
/// The session manager is the sole writer. The epoch increments on every
/// install/clear so a renewal that raced a logout (or a fresh login) can be
/// detected and its result discarded.
#[derive(Clone, Default)]
pub struct BearerState {
    inner: Arc<Mutex<BearerInner>>,
}

#[derive(Default)]
struct BearerInner {
    token: Option<String>,
    epoch: u64,
}

impl BearerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.inner.lock().token.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.inner.lock().epoch
    }

    /// Install a token from an interactive sign-in. Bumps the epoch so any
    /// in-flight renewal result is discarded.
    pub fn install(&self, token: &str) {
        let mut inner = self.inner.lock();
        inner.token = Some(token.to_owned());
        inner.epoch += 1;
    }

    /// Drop the credential. Bumps the epoch.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.token = None;
        inner.epoch += 1;
    }

    /// Install a renewed token only if no install/clear happened since the
    /// epoch was sampled. Returns whether the token was applied.
    pub fn install_if_current(&self, token: &str, epoch: u64) -> bool {
        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            return false;
        }
        inner.token = Some(token.to_owned());
        true
    }
}

/// Strategy that obtains a fresh access token after a 401.
///
/// Injected into [`ApiClient`] at construction; the session manager is the
/// production implementation. `None` means the session could not be renewed.
pub trait Renewer: Send + Sync + 'static {
    fn renew(&self) -> Pin<Box<dyn Future<Output = Option<String>> + Send + '_>>;
}

/// Single-flight gate for renewal episodes.
///
/// The first 401 of an episode becomes the leader and runs the renewal;
/// every concurrent 401 enqueues a waiter that receives the shared outcome.
#[derive(Default)]
struct RenewalGate {
    inner: Mutex<GateInner>,
}

#[derive(Default)]
struct GateInner {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<Option<String>>>,
}

enum Episode {
    Leader,
    Follower(oneshot::Receiver<Option<String>>),
}

impl RenewalGate {
    fn begin(&self) -> Episode {
        let mut inner = self.inner.lock();
        if inner.in_flight {
            let (tx, rx) = oneshot::channel();
            inner.waiters.push(tx);
            Episode::Follower(rx)
        } else {
            inner.in_flight = true;
            Episode::Leader
        }
    }

    /// Resolve the episode. Waiters are notified in insertion order and the
    /// in-flight flag clears within the same critical section, so no request
    /// can observe a cleared flag before the outcome lands.
    fn finish(&self, outcome: &Option<String>) {
        let mut inner = self.inner.lock();
        for waiter in inner.waiters.drain(..) {
            let _ = waiter.send(outcome.clone());
        }
        inner.in_flight = false;
    }
}

/// Resolves the episode with failure if the leader is dropped mid-renewal,
/// so followers never wait on an abandoned episode.
struct EpisodeGuard<'a> {
    gate: &'a RenewalGate,
    armed: bool,
}

impl EpisodeGuard<'_> {
    fn complete(mut self, outcome: &Option<String>) {
        self.armed = false;
        self.gate.finish(outcome);
    }
}

impl Drop for EpisodeGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.gate.finish(&None);
        }
    }
}

/// Authenticated client for the Zentra data endpoints.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    http: reqwest::Client,
    bearer: BearerState,
    renewer: Option<Arc<dyn Renewer>>,
    gate: RenewalGate,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        bearer: BearerState,
        renewer: Option<Arc<dyn Renewer>>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base_url: config.base_url.clone(),
                http: build_http(config),
                bearer,
                renewer,
                gate: RenewalGate::default(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut req = self.inner.http.request(method.clone(), self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        tracing::debug!(method = %method, path, status = resp.status().as_u16(), "api call");
        Ok(resp)
    }

    /// Issue a request, renewing the access token once on 401.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let token = self.inner.bearer.get();
        let resp = self.send(&method, path, query, token.as_deref()).await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return Ok(resp);
        }

        // Keep the original 401 so it can be surfaced if renewal fails.
        let bytes = resp.bytes().await.unwrap_or_default();
        let original = ApiError::Unauthorized(server_message(401, &bytes));
        let Some(renewer) = self.inner.renewer.as_ref() else {
            return Err(original);
        };

        let renewed = match self.inner.gate.begin() {
            Episode::Leader => {
                tracing::debug!(path, "renewing access token");
                let guard = EpisodeGuard { gate: &self.inner.gate, armed: true };
                let outcome = renewer.renew().await;
                guard.complete(&outcome);
                outcome
            }
            Episode::Follower(rx) => rx.await.unwrap_or(None),
        };
        let Some(renewed) = renewed else {
            return Err(original);
        };

        // Exactly one retry. A second 401 is terminal.
        let retry = self.send(&method, path, query, Some(&renewed)).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            let bytes = retry.bytes().await.unwrap_or_default();
            return Err(ApiError::Unauthorized(server_message(401, &bytes)));
        }
        Ok(retry)
    }

    /// GET a JSON endpoint, mapping non-success statuses to [`ApiError`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let resp = self.execute(Method::GET, path, query).await?;
        let status = resp.status();
        if !status.is_success() {
            let bytes = resp.bytes().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &bytes));
        }
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
