// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Deserialize;

use super::{push_opt, Page};
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock_level: Option<i64>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductStats {
    pub total: u32,
    pub in_stock: u32,
    pub out_of_stock: u32,
    pub low_stock: u32,
    pub threshold: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub category_id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ProductsQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub category_id: Option<String>,
}

impl Default for ProductsQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20, search: None, category_id: None }
    }
}

impl ProductsQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params =
            vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut params, "search", &self.search);
        push_opt(&mut params, "category_id", &self.category_id);
        params
    }
}

/// Product catalog queries.
#[derive(Clone)]
pub struct Products {
    api: ApiClient,
}

impl Products {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &ProductsQuery) -> Result<Page<Product>, ApiError> {
        self.api.get_json("/products", &query.params()).await
    }

    pub async fn stats(&self, threshold: u32) -> Result<ProductStats, ApiError> {
        self.api.get_json("/products/stats", &[("threshold", threshold.to_string())]).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get_json("/categories", &[]).await
    }
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
