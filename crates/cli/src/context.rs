// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the core client stack for one CLI invocation.

use std::sync::Arc;

use zentra_core::config::{state_dir, ClientConfig};
use zentra_core::http::{ApiClient, BearerState, Renewer};
use zentra_core::services::account::Account;
use zentra_core::services::inventory::Inventory;
use zentra_core::services::invoices::Invoices;
use zentra_core::services::products::Products;
use zentra_core::services::purchase_orders::PurchaseOrders;
use zentra_core::services::reports::Reports;
use zentra_core::session::{SessionManager, SessionState};
use zentra_core::store::{CredentialStore, FileStore};
use zentra_core::token::{AuthUser, TokenApi};

use crate::config::Config;

/// Session manager plus one service handle per data domain.
pub struct AppContext {
    pub session: Arc<SessionManager>,
    pub products: Products,
    pub inventory: Inventory,
    pub invoices: Invoices,
    pub orders: PurchaseOrders,
    pub reports: Reports,
    pub account: Account,
}

impl AppContext {
    pub fn build(config: &Config) -> Self {
        let mut client_config = ClientConfig::new(&config.api_url);
        // No splash screen on a terminal: resolve bootstrap immediately.
        client_config.splash_floor_ms = 0;

        let dir = config.state_dir.clone().unwrap_or_else(state_dir);
        tracing::debug!(backend = %client_config.base_url, state_dir = %dir.display(), "context built");
        let store = Arc::new(FileStore::new(dir.join("credentials.json")));
        let bearer = BearerState::new();
        let tokens = TokenApi::new(&client_config);
        let session = SessionManager::new(
            &client_config,
            store as Arc<dyn CredentialStore>,
            tokens,
            bearer.clone(),
        );
        let api = ApiClient::new(
            &client_config,
            bearer,
            Some(Arc::clone(&session) as Arc<dyn Renewer>),
        );

        Self {
            session,
            products: Products::new(api.clone()),
            inventory: Inventory::new(api.clone()),
            invoices: Invoices::new(api.clone()),
            orders: PurchaseOrders::new(api.clone()),
            reports: Reports::new(api.clone()),
            account: Account::new(api),
        }
    }

    /// Restore the session from the stored credential. Data commands call
    /// this before touching the API; a signed-out session gets a hint and
    /// the caller exits 2.
    pub async fn ensure_signed_in(&self) -> Result<AuthUser, i32> {
        self.session.bootstrap().await;
        match self.session.current() {
            SessionState::Authenticated(user) => Ok(user),
            _ => {
                eprintln!("not signed in. Run `zentra login --email <email>` first.");
                Err(2)
            }
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
