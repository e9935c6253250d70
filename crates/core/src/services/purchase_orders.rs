// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Deserialize;

use super::{push_opt, Page};
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct Supplier {
    pub supplier_id: String,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrder {
    pub po_id: String,
    pub supplier_id: String,
    pub order_date: String,
    pub status: String,
    pub total_amount: f64,
    pub created_at: String,
    pub updated_at: String,
    pub supplier_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrderItem {
    pub po_item_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub received_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub product_name: String,
    #[serde(default)]
    pub product_english_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub unit_size: Option<String>,
    #[serde(default)]
    pub unit_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrderDetails {
    pub po_id: String,
    pub supplier_id: String,
    pub order_date: String,
    pub status: String,
    pub total_amount: f64,
    pub created_at: String,
    pub updated_at: String,
    pub supplier: Supplier,
    pub items: Vec<PurchaseOrderItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrderStats {
    pub total: u32,
    pub pending: u32,
    pub received: u32,
    pub cancelled: u32,
}

#[derive(Debug, Clone)]
pub struct PurchaseOrdersQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub supplier_id: Option<String>,
}

impl Default for PurchaseOrdersQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20, search: None, supplier_id: None }
    }
}

impl PurchaseOrdersQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params =
            vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        push_opt(&mut params, "search", &self.search);
        push_opt(&mut params, "supplier_id", &self.supplier_id);
        params
    }
}

/// Purchase order queries.
#[derive(Clone)]
pub struct PurchaseOrders {
    api: ApiClient,
}

impl PurchaseOrders {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &PurchaseOrdersQuery) -> Result<Page<PurchaseOrder>, ApiError> {
        self.api.get_json("/purchase-orders/pos", &query.params()).await
    }

    pub async fn details(&self, po_id: &str) -> Result<PurchaseOrderDetails, ApiError> {
        self.api.get_json(&format!("/purchase-orders/pos/{po_id}"), &[]).await
    }

    pub async fn stats(&self) -> Result<PurchaseOrderStats, ApiError> {
        self.api.get_json("/purchase-orders/stats", &[]).await
    }

    pub async fn suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.api.get_json("/purchase-orders/suppliers", &[]).await
    }
}

#[cfg(test)]
#[path = "purchase_orders_tests.rs"]
mod tests;
