// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI subcommands. Every entry point returns a process exit code.

pub mod account;
pub mod auth;
pub mod inventory;
pub mod products;
pub mod purchase_orders;
pub mod reports;
pub mod sales;

use zentra_core::error::ApiError;

/// Uniform failure reporting for API errors.
pub(crate) fn fail(err: &ApiError) -> i32 {
    eprintln!("error: {err}");
    1
}
