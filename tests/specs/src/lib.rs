// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness for end-to-end binary smoke tests.
//!
//! Spawns the real `zentra` binary against a scripted backend stub and
//! checks output, exit codes, and the on-disk credential slot.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::http::{header, StatusCode, Uri};
use axum::Router;

use zentra_core::token::SKIP_RENEWAL_HEADER;

/// Resolve the path to the compiled `zentra` binary.
pub fn zentra_binary() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    // tests/specs → tests → workspace root
    let workspace = manifest.parent().and_then(|p| p.parent()).unwrap_or(manifest);
    workspace.join("target").join("debug").join("zentra")
}

#[derive(Default)]
struct RouteState {
    hits: AtomicU32,
    bearers: parking_lot::Mutex<Vec<Option<String>>>,
    skip_flags: parking_lot::Mutex<Vec<bool>>,
    script: Vec<(u16, String)>,
}

/// Scripted backend routes. Each route answers its script in order and
/// repeats the last entry once exhausted.
#[derive(Default)]
pub struct ApiBuilder {
    routes: HashMap<String, Arc<RouteState>>,
}

impl ApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, responses: Vec<(u16, String)>) -> Self {
        let state = RouteState { script: responses, ..RouteState::default() };
        self.routes.insert(path.to_owned(), Arc::new(state));
        self
    }

    pub async fn spawn(self) -> anyhow::Result<ApiStub> {
        let routes = Arc::new(self.routes);
        let handler_routes = Arc::clone(&routes);
        let app = Router::new().fallback(move |uri: Uri, headers: axum::http::HeaderMap| {
            let routes = Arc::clone(&handler_routes);
            async move {
                let Some(route) = routes.get(uri.path()) else {
                    return (
                        StatusCode::NOT_FOUND,
                        [(header::CONTENT_TYPE, "application/json")],
                        r#"{"message":"no such route"}"#.to_owned(),
                    );
                };
                let idx = route.hits.fetch_add(1, Ordering::Relaxed) as usize;
                let bearer = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("Bearer "))
                    .map(str::to_owned);
                route.bearers.lock().push(bearer);
                route.skip_flags.lock().push(headers.contains_key(SKIP_RENEWAL_HEADER));

                let (status, body) = route
                    .script
                    .get(idx)
                    .or_else(|| route.script.last())
                    .cloned()
                    .unwrap_or((500, "{}".to_owned()));
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(ApiStub { addr, routes })
    }
}

/// A running backend stub.
pub struct ApiStub {
    addr: SocketAddr,
    routes: Arc<HashMap<String, Arc<RouteState>>>,
}

impl ApiStub {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests a route has answered. Unknown routes count zero.
    pub fn hits(&self, path: &str) -> u32 {
        self.routes.get(path).map_or(0, |r| r.hits.load(Ordering::Relaxed))
    }

    /// Bearer tokens observed per request, in arrival order.
    pub fn bearers(&self, path: &str) -> Vec<Option<String>> {
        self.routes.get(path).map_or_else(Vec::new, |r| r.bearers.lock().clone())
    }

    /// Whether each request carried the renewal-exemption header.
    pub fn skip_flags(&self, path: &str) -> Vec<bool> {
        self.routes.get(path).map_or_else(Vec::new, |r| r.skip_flags.lock().clone())
    }
}

/// Captured output of one binary invocation.
pub struct Exec {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// One CLI environment: a scripted backend plus an isolated state dir shared
/// by every invocation, so a session persists across runs the way it does
/// for a real user.
pub struct Cli {
    api: ApiStub,
    state_dir: tempfile::TempDir,
}

impl Cli {
    pub async fn with_api(builder: ApiBuilder) -> anyhow::Result<Self> {
        let api = builder.spawn().await?;
        let state_dir = tempfile::tempdir()?;
        Ok(Self { api, state_dir })
    }

    pub fn api(&self) -> &ApiStub {
        &self.api
    }

    /// Path of the credential slot inside the isolated state dir.
    pub fn credential_file(&self) -> PathBuf {
        self.state_dir.path().join("credentials.json")
    }

    /// Run the binary to completion with the environment pointed at the stub.
    pub async fn run(&self, args: &[&str]) -> anyhow::Result<Exec> {
        let binary = zentra_binary();
        anyhow::ensure!(binary.exists(), "zentra binary not found at {}", binary.display());

        let output = tokio::process::Command::new(&binary)
            .args(args)
            .env("ZENTRA_API_URL", self.api.url())
            .env("ZENTRA_STATE_DIR", self.state_dir.path())
            .env("ZENTRA_LOG_FORMAT", "text")
            .env("ZENTRA_LOG_LEVEL", "warn")
            .output()
            .await?;

        Ok(Exec {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Identity body shared by the auth and `/users/me` endpoints.
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

pub fn error_body(message: &str) -> String {
    serde_json::json!({ "message": message }).to_string()
}
