// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::str::FromStr;

use serde::Deserialize;

use super::{number_or_string, push_opt, Page, DEFAULT_STOCK_THRESHOLD};
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItem {
    pub inventory_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub reorder_level: Option<i64>,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryStats {
    pub threshold: u32,
    pub total: u32,
    pub in_stock: u32,
    pub out_of_stock: u32,
    pub low_stock: u32,
    pub expiring_soon: u32,
    /// Total value of stock on hand. The backend serializes this as either a
    /// number or a decimal string.
    #[serde(deserialize_with = "number_or_string")]
    pub inventory_value: f64,
}

/// Stock-level filter for inventory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    In,
    Low,
    Out,
}

impl StockFilter {
    /// Wire value for the `stock` query parameter. `All` is omitted.
    fn as_param(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::In => Some("in"),
            Self::Low => Some("low"),
            Self::Out => Some("out"),
        }
    }
}

impl FromStr for StockFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "in" => Ok(Self::In),
            "low" => Ok(Self::Low),
            "out" => Ok(Self::Out),
            other => Err(format!("unknown stock filter: {other} (expected all|in|low|out)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InventoryQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub stock: StockFilter,
    pub threshold: u32,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
            stock: StockFilter::All,
            threshold: DEFAULT_STOCK_THRESHOLD,
        }
    }
}

impl InventoryQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params =
            vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut params, "search", &self.search);
        if let Some(stock) = self.stock.as_param() {
            params.push(("stock", stock.to_owned()));
        }
        params.push(("threshold", self.threshold.to_string()));
        params
    }
}

/// Stock-on-hand queries.
#[derive(Clone)]
pub struct Inventory {
    api: ApiClient,
}

impl Inventory {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &InventoryQuery) -> Result<Page<InventoryItem>, ApiError> {
        self.api.get_json("/inventory", &query.params()).await
    }

    pub async fn stats(&self, threshold: u32) -> Result<InventoryStats, ApiError> {
        self.api.get_json("/inventory/stats", &[("threshold", threshold.to_string())]).await
    }
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
