// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Zentra core: authenticated transport, session lifecycle, and typed data
//! services for the Zentra POS backend.

pub mod config;
pub mod error;
pub mod http;
pub mod services;
pub mod session;
pub mod store;
pub mod token;

#[cfg(test)]
pub mod test_support;
