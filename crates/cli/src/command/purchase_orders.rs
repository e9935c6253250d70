// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zentra po` and `zentra suppliers`.

use zentra_core::services::purchase_orders::PurchaseOrdersQuery;

use crate::command::fail;
use crate::config::{PoAction, PoListArgs};
use crate::context::AppContext;
use crate::render::{money, opt, Table};

pub async fn run(ctx: &AppContext, action: PoAction) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match action {
        PoAction::List(args) => listing(ctx, args).await,
        PoAction::Show { id } => show(ctx, &id).await,
        PoAction::Stats => stats(ctx).await,
    }
}

async fn listing(ctx: &AppContext, args: PoListArgs) -> i32 {
    let query = PurchaseOrdersQuery {
        page: args.page,
        limit: args.limit,
        search: args.search,
        supplier_id: args.supplier,
    };
    let page = match ctx.orders.list(&query).await {
        Ok(page) => page,
        Err(err) => return fail(&err),
    };

    if page.rows.is_empty() {
        println!("no purchase orders on page {}", page.page);
        return 0;
    }

    let mut table = Table::new(&["PO", "SUPPLIER", "DATE", "STATUS", "TOTAL"]);
    for order in &page.rows {
        table.row(vec![
            order.po_id.clone(),
            order.supplier_name.clone(),
            order.order_date.clone(),
            order.status.clone(),
            money(order.total_amount),
        ]);
    }
    table.print();
    println!();
    println!("page {} ({} rows)", page.page, page.rows.len());
    0
}

async fn show(ctx: &AppContext, id: &str) -> i32 {
    let details = match ctx.orders.details(id).await {
        Ok(details) => details,
        Err(err) => return fail(&err),
    };

    println!("{:<10} {}", "po", details.po_id);
    println!("{:<10} {}", "supplier", details.supplier.name);
    println!("{:<10} {}", "contact", opt(details.supplier.contact_name.as_deref()));
    println!("{:<10} {}", "date", details.order_date);
    println!("{:<10} {}", "status", details.status);
    println!("{:<10} {}", "total", money(details.total_amount));

    if details.items.is_empty() {
        return 0;
    }
    println!();
    let mut table = Table::new(&["PRODUCT", "QTY", "UNIT PRICE", "RECEIVED"]);
    for item in &details.items {
        table.row(vec![
            item.product_name.clone(),
            item.quantity.to_string(),
            money(item.unit_price),
            opt(item.received_date.as_deref()),
        ]);
    }
    table.print();
    0
}

async fn stats(ctx: &AppContext) -> i32 {
    match ctx.orders.stats().await {
        Ok(stats) => {
            println!("{:<10} {}", "total", stats.total);
            println!("{:<10} {}", "pending", stats.pending);
            println!("{:<10} {}", "received", stats.received);
            println!("{:<10} {}", "cancelled", stats.cancelled);
            0
        }
        Err(err) => fail(&err),
    }
}

pub async fn suppliers(ctx: &AppContext) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match ctx.orders.suppliers().await {
        Ok(suppliers) => {
            if suppliers.is_empty() {
                println!("no suppliers");
                return 0;
            }
            let mut table = Table::new(&["ID", "NAME", "CONTACT", "PHONE", "EMAIL"]);
            for supplier in &suppliers {
                table.row(vec![
                    supplier.supplier_id.clone(),
                    supplier.name.clone(),
                    opt(supplier.contact_name.as_deref()),
                    opt(supplier.phone.as_deref()),
                    opt(supplier.email.as_deref()),
                ]);
            }
            table.print();
            0
        }
        Err(err) => fail(&err),
    }
}
