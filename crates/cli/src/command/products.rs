// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zentra products` and `zentra categories`.

use zentra_core::services::products::ProductsQuery;

use crate::command::fail;
use crate::config::{ProductListArgs, ProductsAction};
use crate::context::AppContext;
use crate::render::{money, opt, Table};

pub async fn run(ctx: &AppContext, action: Option<ProductsAction>, list: ProductListArgs) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match action {
        Some(ProductsAction::Stats { threshold }) => stats(ctx, threshold).await,
        None => listing(ctx, list).await,
    }
}

async fn listing(ctx: &AppContext, args: ProductListArgs) -> i32 {
    let query = ProductsQuery {
        page: args.page,
        limit: args.limit,
        search: args.search,
        category_id: args.category,
    };
    let page = match ctx.products.list(&query).await {
        Ok(page) => page,
        Err(err) => return fail(&err),
    };

    if page.rows.is_empty() {
        println!("no products on page {}", page.page);
        return 0;
    }

    let mut table = Table::new(&["ID", "NAME", "PRICE", "STOCK", "CATEGORY"]);
    for product in &page.rows {
        table.row(vec![
            product.product_id.clone(),
            product.name.clone(),
            product.price.map(money).unwrap_or_else(|| "\u{2014}".to_owned()),
            product.stock_level.map(|n| n.to_string()).unwrap_or_else(|| "\u{2014}".to_owned()),
            opt(product.category_name.as_deref()),
        ]);
    }
    table.print();
    println!();
    println!("page {} ({} rows)", page.page, page.rows.len());
    0
}

async fn stats(ctx: &AppContext, threshold: u32) -> i32 {
    match ctx.products.stats(threshold).await {
        Ok(stats) => {
            println!("{:<14} {}", "total", stats.total);
            println!("{:<14} {}", "in stock", stats.in_stock);
            println!("{:<14} {}", "low stock", stats.low_stock);
            println!("{:<14} {}", "out of stock", stats.out_of_stock);
            println!("{:<14} {}", "threshold", stats.threshold);
            0
        }
        Err(err) => fail(&err),
    }
}

pub async fn categories(ctx: &AppContext) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match ctx.products.categories().await {
        Ok(categories) => {
            if categories.is_empty() {
                println!("no categories");
                return 0;
            }
            let mut table = Table::new(&["ID", "NAME"]);
            for category in &categories {
                table.row(vec![category.category_id.clone(), category.name.clone()]);
            }
            table.print();
            0
        }
        Err(err) => fail(&err),
    }
}
