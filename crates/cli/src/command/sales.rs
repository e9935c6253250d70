// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zentra sales`.

use zentra_core::error::ApiError;

use crate::command::fail;
use crate::config::SalesAction;
use crate::context::AppContext;
use crate::render::{money, opt, Table};

pub async fn run(ctx: &AppContext, action: SalesAction) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match action {
        SalesAction::Recent { watch } => recent(ctx, watch).await,
        SalesAction::Today => today(ctx).await,
    }
}

async fn recent(ctx: &AppContext, watch: bool) -> i32 {
    if let Err(err) = print_recent(ctx).await {
        return fail(&err);
    }
    if !watch {
        return 0;
    }

    println!();
    println!("Refreshing every 5s... (press Ctrl+C to stop)");
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;

        println!();
        if let Err(err) = print_recent(ctx).await {
            eprintln!("warning: refresh failed: {err}");
        }
    }
}

async fn print_recent(ctx: &AppContext) -> Result<(), ApiError> {
    let invoices = ctx.invoices.recent().await?;
    if invoices.is_empty() {
        println!("no recent invoices");
        return Ok(());
    }

    let mut table = Table::new(&["INVOICE", "DATE", "CUSTOMER", "TOTAL", "STATUS", "MODE"]);
    for invoice in &invoices {
        table.row(vec![
            invoice.invoice_id.clone(),
            invoice.date.clone(),
            opt(invoice.customer_name.as_deref()),
            money(invoice.total_amount),
            invoice.payment_status.clone(),
            invoice.payment_mode.clone(),
        ]);
    }
    table.print();
    Ok(())
}

async fn today(ctx: &AppContext) -> i32 {
    match ctx.invoices.daily_stats().await {
        Ok(stats) => {
            println!("{:<12} {}", "date", stats.sales_date);
            println!("{:<12} {}", "invoices", stats.invoice_count);
            println!("{:<12} {}", "subtotal", money(stats.sub_total));
            println!("{:<12} {}", "tax", money(stats.tax_amount));
            println!("{:<12} {}", "discounts", money(stats.discount_amount));
            println!("{:<12} {}", "total", money(stats.total_amount));
            0
        }
        Err(err) => fail(&err),
    }
}
