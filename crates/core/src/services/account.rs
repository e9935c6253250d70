// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Identity echo from `/users/me`. Unlike the rest of the data surface this
/// endpoint answers in camelCase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMe {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub tenant_id: String,
    pub schema_name: String,
    pub subscription_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub tenant_id: String,
    pub plan_name: String,
    pub joined_at: String,
    pub expires_at: String,
    pub status: String,
    pub created_at: String,
}

/// Account and subscription queries.
#[derive(Clone)]
pub struct Account {
    api: ApiClient,
}

impl Account {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn me(&self) -> Result<UserMe, ApiError> {
        self.api.get_json("/users/me", &[]).await
    }

    pub async fn subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.api.get_json("/subscriptions", &[]).await
    }
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
