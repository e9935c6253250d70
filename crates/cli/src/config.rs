// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use zentra_core::services::inventory::StockFilter;
use zentra_core::services::DEFAULT_STOCK_THRESHOLD;

/// Command-line client for the Zentra POS backend.
#[derive(Debug, Parser)]
#[command(name = "zentra", version, about)]
pub struct Config {
    /// Zentra backend URL.
    #[arg(long, env = "ZENTRA_API_URL", default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Directory for session state (stored credential).
    #[arg(long, env = "ZENTRA_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Log format (json or text).
    #[arg(long, env = "ZENTRA_LOG_FORMAT", default_value = "text", global = true)]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "ZENTRA_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session credential.
    Login(LoginArgs),
    /// Sign out and discard the stored credential.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Browse the product catalog.
    Products {
        #[command(subcommand)]
        action: Option<ProductsAction>,
        #[command(flatten)]
        list: ProductListArgs,
    },
    /// List product categories.
    Categories,
    /// Inspect stock on hand.
    Inventory {
        #[command(subcommand)]
        action: Option<InventoryAction>,
        #[command(flatten)]
        list: InventoryListArgs,
    },
    /// Sales activity.
    Sales {
        #[command(subcommand)]
        action: SalesAction,
    },
    /// Purchase orders.
    Po {
        #[command(subcommand)]
        action: PoAction,
    },
    /// List suppliers.
    Suppliers,
    /// Sales and performance reports.
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
    /// Show the tenant's subscriptions.
    Subscription,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,

    /// Account password. Prompted for when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProductsAction {
    /// Catalog stock counts.
    Stats {
        /// Low-stock threshold.
        #[arg(long, default_value_t = DEFAULT_STOCK_THRESHOLD)]
        threshold: u32,
    },
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    /// Page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page.
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Filter by name, SKU, or barcode.
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by category id.
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum InventoryAction {
    /// Stock counts and total value.
    Stats {
        /// Low-stock threshold.
        #[arg(long, default_value_t = DEFAULT_STOCK_THRESHOLD)]
        threshold: u32,
    },
}

#[derive(Debug, Args)]
pub struct InventoryListArgs {
    /// Page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page.
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Filter by product name.
    #[arg(long)]
    pub search: Option<String>,

    /// Stock filter: all, in, low, or out.
    #[arg(long, default_value = "all")]
    pub stock: StockFilter,

    /// Low-stock threshold.
    #[arg(long, default_value_t = DEFAULT_STOCK_THRESHOLD)]
    pub threshold: u32,
}

#[derive(Debug, Subcommand)]
pub enum SalesAction {
    /// Latest invoices.
    Recent {
        /// Refresh every five seconds until interrupted.
        #[arg(long)]
        watch: bool,
    },
    /// Today's totals.
    Today,
}

#[derive(Debug, Subcommand)]
pub enum PoAction {
    /// List purchase orders.
    List(PoListArgs),
    /// Show one purchase order with its line items.
    Show {
        /// Purchase order id.
        id: String,
    },
    /// Purchase order status counts.
    Stats,
}

#[derive(Debug, Args)]
pub struct PoListArgs {
    /// Page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page.
    #[arg(long, default_value_t = 20)]
    pub limit: u32,

    /// Filter by order id or supplier name.
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by supplier id.
    #[arg(long)]
    pub supplier: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ReportAction {
    /// Sales totals for the window.
    Summary(DateArgs),
    /// Per-day sales for the window.
    Daily(DateArgs),
    /// Best-selling products.
    Products(DateArgs),
    /// Top customers by spend.
    Customers(DateArgs),
    /// Sales per employee.
    Employees(DateArgs),
}

#[derive(Debug, Args)]
pub struct DateArgs {
    /// Window start (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<String>,

    /// Window end (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<String>,
}

impl Config {
    /// Config for tests, bypassing argument parsing.
    #[cfg(test)]
    pub fn test(api_url: impl Into<String>, command: Command) -> Self {
        Self {
            api_url: api_url.into(),
            state_dir: None,
            log_format: "text".to_owned(),
            log_level: "warn".to_owned(),
            command,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
