// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct RecentInvoice {
    pub invoice_id: String,
    pub date: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub employee_id: String,
    pub sub_total: f64,
    pub total_amount: f64,
    pub payment_mode: String,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub amount_received: f64,
    pub outstanding_balance: f64,
    pub payment_status: String,
    #[serde(default)]
    pub refund_invoice_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyInvoiceStats {
    pub sales_date: String,
    pub invoice_count: u32,
    pub sub_total: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
}

/// Sales activity queries.
#[derive(Clone)]
pub struct Invoices {
    api: ApiClient,
}

impl Invoices {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn recent(&self) -> Result<Vec<RecentInvoice>, ApiError> {
        self.api.get_json("/invoices/recent", &[]).await
    }

    pub async fn daily_stats(&self) -> Result<DailyInvoiceStats, ApiError> {
        self.api.get_json("/invoices/daily-stats", &[]).await
    }
}

#[cfg(test)]
#[path = "invoices_tests.rs"]
mod tests;
