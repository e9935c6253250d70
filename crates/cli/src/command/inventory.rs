// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zentra inventory`.

use zentra_core::services::inventory::InventoryQuery;

use crate::command::fail;
use crate::config::{InventoryAction, InventoryListArgs};
use crate::context::AppContext;
use crate::render::{money, opt, Table};

pub async fn run(ctx: &AppContext, action: Option<InventoryAction>, list: InventoryListArgs) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match action {
        Some(InventoryAction::Stats { threshold }) => stats(ctx, threshold).await,
        None => listing(ctx, list).await,
    }
}

async fn listing(ctx: &AppContext, args: InventoryListArgs) -> i32 {
    let query = InventoryQuery {
        page: args.page,
        limit: args.limit,
        search: args.search,
        stock: args.stock,
        threshold: args.threshold,
    };
    let page = match ctx.inventory.list(&query).await {
        Ok(page) => page,
        Err(err) => return fail(&err),
    };

    if page.rows.is_empty() {
        println!("no inventory on page {}", page.page);
        return 0;
    }

    let mut table = Table::new(&["PRODUCT", "QUANTITY", "PRICE", "REORDER", "BATCH", "EXPIRES"]);
    for item in &page.rows {
        table.row(vec![
            item.product_name.clone(),
            item.quantity.to_string(),
            money(item.product_price),
            item.reorder_level.map(|n| n.to_string()).unwrap_or_else(|| "\u{2014}".to_owned()),
            opt(item.batch_number.as_deref()),
            opt(item.expiry_date.as_deref()),
        ]);
    }
    table.print();
    println!();
    println!("page {} ({} rows)", page.page, page.rows.len());
    0
}

async fn stats(ctx: &AppContext, threshold: u32) -> i32 {
    match ctx.inventory.stats(threshold).await {
        Ok(stats) => {
            println!("{:<16} {}", "total", stats.total);
            println!("{:<16} {}", "in stock", stats.in_stock);
            println!("{:<16} {}", "low stock", stats.low_stock);
            println!("{:<16} {}", "out of stock", stats.out_of_stock);
            println!("{:<16} {}", "expiring soon", stats.expiring_soon);
            println!("{:<16} {}", "threshold", stats.threshold);
            println!("{:<16} {}", "inventory value", money(stats.inventory_value));
            0
        }
        Err(err) => fail(&err),
    }
}
