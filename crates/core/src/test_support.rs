// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test infrastructure: a scripted stub backend plus a fully wired
//! client stack pointed at it.
//!
//! Routes answer from a fixed script of `(status, body)` pairs, repeating the
//! last entry once exhausted, and record every request they see so tests can
//! assert on hit counts, bearer headers, and bodies.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use axum::extract::RawQuery;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::config::ClientConfig;
use crate::http::{ApiClient, BearerState, Renewer};
use crate::session::SessionManager;
use crate::store::{CredentialStore, MemoryStore};
use crate::token::{TokenApi, SKIP_RENEWAL_HEADER};

static CRYPTO_INIT: Once = Once::new();

/// Install the rustls ring crypto provider (reqwest needs one even for
/// plain-HTTP clients). Only the first call has effect.
pub fn ensure_crypto() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// One observed request to a stubbed route.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub bearer: Option<String>,
    pub skip_renewal: bool,
    pub query: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct RouteLog {
    hits: Arc<AtomicU32>,
    calls: Arc<parking_lot::Mutex<Vec<RecordedCall>>>,
}

enum Method {
    Get,
    Post,
}

struct RouteSpec {
    path: String,
    method: Method,
    delay: Option<Duration>,
    responses: Vec<(u16, String)>,
}

/// Builder for a stub backend with scripted routes.
#[derive(Default)]
pub struct StubBuilder {
    routes: Vec<RouteSpec>,
}

impl StubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(mut self, path: &str, responses: Vec<(u16, String)>) -> Self {
        self.routes.push(RouteSpec {
            path: path.to_owned(),
            method: Method::Get,
            delay: None,
            responses,
        });
        self
    }

    pub fn post(mut self, path: &str, responses: Vec<(u16, String)>) -> Self {
        self.routes.push(RouteSpec {
            path: path.to_owned(),
            method: Method::Post,
            delay: None,
            responses,
        });
        self
    }

    /// Like [`StubBuilder::post`], but every response is held back for
    /// `delay` first, so tests can overlap other calls with one in flight.
    pub fn post_delayed(
        mut self,
        path: &str,
        delay: Duration,
        responses: Vec<(u16, String)>,
    ) -> Self {
        self.routes.push(RouteSpec {
            path: path.to_owned(),
            method: Method::Post,
            delay: Some(delay),
            responses,
        });
        self
    }

    pub async fn spawn(self) -> StubBackend {
        let mut app = Router::new();
        let mut logs = HashMap::new();
        for route in self.routes {
            let log = RouteLog::default();
            logs.insert(route.path.clone(), log.clone());
            let responses = Arc::new(route.responses);
            let delay = route.delay;
            let handler = move |headers: HeaderMap, RawQuery(query): RawQuery, body: String| {
                let log = log.clone();
                let responses = Arc::clone(&responses);
                async move {
                    let idx = log.hits.fetch_add(1, Ordering::Relaxed) as usize;
                    let bearer = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.strip_prefix("Bearer "))
                        .map(str::to_owned);
                    let skip_renewal = headers.contains_key(SKIP_RENEWAL_HEADER);
                    log.calls.lock().push(RecordedCall { bearer, skip_renewal, query, body });
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    let (status, payload) = if idx < responses.len() {
                        responses[idx].clone()
                    } else {
                        // Repeat the last scripted response.
                        responses.last().cloned().unwrap_or((500, "{}".to_owned()))
                    };
                    (
                        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                        [(header::CONTENT_TYPE, "application/json")],
                        payload,
                    )
                }
            };
            app = match route.method {
                Method::Get => app.route(&route.path, get(handler)),
                Method::Post => app.route(&route.path, post(handler)),
            };
        }

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        StubBackend { addr, logs }
    }
}

/// Handle to a running stub backend.
pub struct StubBackend {
    addr: SocketAddr,
    logs: HashMap<String, RouteLog>,
}

impl StubBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self, path: &str) -> u32 {
        self.logs.get(path).map(|log| log.hits.load(Ordering::Relaxed)).unwrap_or(0)
    }

    pub fn calls(&self, path: &str) -> Vec<RecordedCall> {
        self.logs.get(path).map(|log| log.calls.lock().clone()).unwrap_or_default()
    }
}

/// A fully wired client stack backed by an in-memory credential store.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub bearer: BearerState,
    pub session: Arc<SessionManager>,
    pub api: ApiClient,
}

/// Wire the stack against `base_url` with test defaults (no splash floor).
pub fn wired(base_url: &str) -> Harness {
    wired_with(ClientConfig::test(base_url))
}

pub fn wired_with(config: ClientConfig) -> Harness {
    wired_on(config, Arc::new(MemoryStore::new()))
}

/// Wire the stack around an existing store, e.g. to simulate a restart that
/// keeps the persisted credential.
pub fn wired_on(config: ClientConfig, store: Arc<MemoryStore>) -> Harness {
    ensure_crypto();
    let bearer = BearerState::new();
    let tokens = TokenApi::new(&config);
    let session = SessionManager::new(
        &config,
        Arc::clone(&store) as Arc<dyn CredentialStore>,
        tokens,
        bearer.clone(),
    );
    let api = ApiClient::new(&config, bearer.clone(), Some(Arc::clone(&session) as Arc<dyn Renewer>));
    Harness { store, bearer, session, api }
}

/// Identity payload in the backend's camelCase wire shape.
pub fn user_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "employeeId": "emp-7",
        "name": "Demo Employee",
        "role": "manager",
        "email": "demo@zentra.com",
        "tenantId": "tenant-1",
        "schemaName": "tenant_demo",
        "subscriptionId": "sub-3",
    })
}

pub fn login_body(id: &str, access: &str, refresh: &str) -> String {
    let mut body = user_json(id);
    body["accessToken"] = access.into();
    body["refreshToken"] = refresh.into();
    body.to_string()
}

pub fn refresh_body(access: &str) -> String {
    serde_json::json!({ "accessToken": access }).to_string()
}

pub fn validate_body(id: &str) -> String {
    let mut body = user_json(id);
    body["valid"] = true.into();
    body.to_string()
}

pub fn validate_rejected_body() -> String {
    serde_json::json!({ "valid": false }).to_string()
}
