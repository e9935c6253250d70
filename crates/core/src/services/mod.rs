// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed read-only clients for the Zentra data endpoints.
//!
//! Each domain gets a thin wrapper over [`crate::http::ApiClient`]; all wire
//! DTOs mirror the backend's snake_case JSON.

pub mod account;
pub mod inventory;
pub mod invoices;
pub mod products;
pub mod purchase_orders;
pub mod reports;

use serde::de::Deserializer;
use serde::Deserialize;

/// Default low-stock threshold used by the stats endpoints.
pub const DEFAULT_STOCK_THRESHOLD: u32 = 10;

/// Envelope for paged list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub limit: u32,
    pub rows: Vec<T>,
}

/// Append an optional string parameter, skipping `None` and empty values.
pub(crate) fn push_opt(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            params.push((key, value.clone()));
        }
    }
}

/// Accept a numeric field that the backend sometimes serializes as a string.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
