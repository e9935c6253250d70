// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod command;
pub mod config;
pub mod context;
pub mod render;

use crate::config::{Command, Config};
use crate::context::AppContext;

/// Dispatch one parsed invocation and return the process exit code.
pub async fn run(config: Config) -> i32 {
    let ctx = AppContext::build(&config);
    match config.command {
        Command::Login(args) => command::auth::login(&ctx, args).await,
        Command::Logout => command::auth::logout(&ctx),
        Command::Whoami => command::auth::whoami(&ctx).await,
        Command::Products { action, list } => command::products::run(&ctx, action, list).await,
        Command::Categories => command::products::categories(&ctx).await,
        Command::Inventory { action, list } => command::inventory::run(&ctx, action, list).await,
        Command::Sales { action } => command::sales::run(&ctx, action).await,
        Command::Po { action } => command::purchase_orders::run(&ctx, action).await,
        Command::Suppliers => command::purchase_orders::suppliers(&ctx).await,
        Command::Report { action } => command::reports::run(&ctx, action).await,
        Command::Subscription => command::account::subscription(&ctx).await,
    }
}
