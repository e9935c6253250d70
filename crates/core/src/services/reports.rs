// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::Deserialize;

use super::push_opt;
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct SalesSummary {
    pub invoice_count: u32,
    pub sub_total: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub amount_received: f64,
    pub outstanding_balance: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesDaily {
    pub day: String,
    pub total_amount: f64,
    pub invoice_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductPerformance {
    pub product_id: String,
    pub product_name: String,
    pub quantity_sold: i64,
    pub sales_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInsight {
    pub customer_id: String,
    pub name: String,
    pub invoice_count: u32,
    pub total_spent: f64,
    pub average_invoice: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeSales {
    pub employee_id: String,
    pub name: String,
    pub invoice_count: u32,
    pub total_sales: f64,
}

/// Inclusive report window, ISO dates. Unset bounds are omitted from the
/// query string and default server-side.
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "start", &self.start);
        push_opt(&mut params, "end", &self.end);
        params
    }
}

/// Reporting queries.
#[derive(Clone)]
pub struct Reports {
    api: ApiClient,
}

impl Reports {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sales totals for the window. `None` when the window has no invoices.
    pub async fn sales_summary(&self, range: &DateRange) -> Result<Option<SalesSummary>, ApiError> {
        self.api.get_json("/reports/sales-summary", &range.params()).await
    }

    pub async fn sales_daily(&self, range: &DateRange) -> Result<Vec<SalesDaily>, ApiError> {
        self.api.get_json("/reports/sales-daily", &range.params()).await
    }

    pub async fn product_performance(
        &self,
        range: &DateRange,
    ) -> Result<Vec<ProductPerformance>, ApiError> {
        self.api.get_json("/reports/product-performance", &range.params()).await
    }

    pub async fn customer_insights(
        &self,
        range: &DateRange,
    ) -> Result<Vec<CustomerInsight>, ApiError> {
        self.api.get_json("/reports/customer-insights", &range.params()).await
    }

    pub async fn employee_sales(&self, range: &DateRange) -> Result<Vec<EmployeeSales>, ApiError> {
        self.api.get_json("/reports/employee-sales", &range.params()).await
    }
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
