// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token authority: login, refresh, and validate against the Zentra backend.
//!
//! These calls run on the plain transport and never pass through the
//! 401-renewal path of [`crate::http::ApiClient`], so a failing auth call can
//! never trigger a renewal of itself.

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{server_message, ApiError};
use crate::http::build_http;

/// Header marking auth-maintenance calls as exempt from 401 renewal.
pub const SKIP_RENEWAL_HEADER: &str = "x-skip-auth-refresh";

/// Authenticated identity, as returned by login and validate.
///
/// Credentials are not part of the identity: the access token lives in
/// [`crate::http::BearerState`] and the refresh token in the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub tenant_id: String,
    pub schema_name: String,
    pub subscription_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

/// Successful login: identity plus both credentials.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub user: AuthUser,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    #[serde(flatten)]
    user: AuthUser,
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody {
    access_token: String,
}

/// Reject obviously malformed login input before any network I/O.
fn check_login_input(email: &str, password: &str) -> Result<(), ApiError> {
    let email = email.trim();
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    };
    if !valid_email {
        return Err(ApiError::InvalidInput("Enter a valid email address.".to_owned()));
    }
    if password.len() < 6 {
        return Err(ApiError::InvalidInput(
            "Password must be at least 6 characters.".to_owned(),
        ));
    }
    Ok(())
}

/// Client for the three `/auth/*` operations.
#[derive(Debug, Clone)]
pub struct TokenApi {
    base_url: String,
    http: reqwest::Client,
}

impl TokenApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self { base_url: config.base_url.clone(), http: build_http(config) }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Exchange email and password for an identity and both credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        check_login_input(email, password)?;
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email.trim(), "password": password }))
            .send()
            .await?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "POST /auth/login");
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            if status.as_u16() >= 500 {
                return Err(ApiError::ServerUnavailable);
            }
            return Err(ApiError::InvalidCredentials(server_message(status.as_u16(), &body)));
        }
        let body: LoginBody = resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(LoginResponse {
            user: body.user,
            access_token: body.access_token,
            refresh_token: body.refresh_token,
        })
    }

    /// Exchange the refresh credential for a new access token.
    ///
    /// The refresh credential itself is not rotated by this call.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url("/auth/refresh"))
            .header(SKIP_RENEWAL_HEADER, "true")
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "POST /auth/refresh");
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            if status.as_u16() >= 500 {
                return Err(ApiError::ServerUnavailable);
            }
            return Err(ApiError::RefreshInvalid(server_message(status.as_u16(), &body)));
        }
        let body: RefreshBody = resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(body.access_token)
    }

    /// Check whether an access token still maps to a live identity.
    ///
    /// `Ok(None)` means the server answered `valid: false`, a normal
    /// outcome that forces logout, not an error.
    pub async fn validate(&self, access_token: &str) -> Result<Option<AuthUser>, ApiError> {
        let resp = self
            .http
            .post(self.url("/auth/validate"))
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "POST /auth/validate");
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(crate::error::classify_status(status.as_u16(), &body));
        }
        let value: serde_json::Value =
            resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        // Identity fields may be absent when valid is false, so only
        // deserialize them on the valid path.
        if value.get("valid").and_then(|v| v.as_bool()) != Some(true) {
            return Ok(None);
        }
        let user: AuthUser =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(Some(user))
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
