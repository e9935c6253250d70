// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zentra report`.

use zentra_core::services::reports::DateRange;

use crate::command::fail;
use crate::config::{DateArgs, ReportAction};
use crate::context::AppContext;
use crate::render::{money, Table};

pub async fn run(ctx: &AppContext, action: ReportAction) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match action {
        ReportAction::Summary(dates) => summary(ctx, range(dates)).await,
        ReportAction::Daily(dates) => daily(ctx, range(dates)).await,
        ReportAction::Products(dates) => products(ctx, range(dates)).await,
        ReportAction::Customers(dates) => customers(ctx, range(dates)).await,
        ReportAction::Employees(dates) => employees(ctx, range(dates)).await,
    }
}

fn range(dates: DateArgs) -> DateRange {
    DateRange { start: dates.start, end: dates.end }
}

async fn summary(ctx: &AppContext, range: DateRange) -> i32 {
    match ctx.reports.sales_summary(&range).await {
        Ok(Some(summary)) => {
            println!("{:<14} {}", "invoices", summary.invoice_count);
            println!("{:<14} {}", "subtotal", money(summary.sub_total));
            println!("{:<14} {}", "tax", money(summary.tax_amount));
            println!("{:<14} {}", "discounts", money(summary.discount_amount));
            println!("{:<14} {}", "total", money(summary.total_amount));
            println!("{:<14} {}", "received", money(summary.amount_received));
            println!("{:<14} {}", "outstanding", money(summary.outstanding_balance));
            0
        }
        Ok(None) => {
            println!("no sales in this window.");
            0
        }
        Err(err) => fail(&err),
    }
}

async fn daily(ctx: &AppContext, range: DateRange) -> i32 {
    match ctx.reports.sales_daily(&range).await {
        Ok(days) => {
            if days.is_empty() {
                println!("no sales in this window.");
                return 0;
            }
            let mut table = Table::new(&["DAY", "INVOICES", "TOTAL"]);
            for day in &days {
                table.row(vec![
                    day.day.clone(),
                    day.invoice_count.to_string(),
                    money(day.total_amount),
                ]);
            }
            table.print();
            0
        }
        Err(err) => fail(&err),
    }
}

async fn products(ctx: &AppContext, range: DateRange) -> i32 {
    match ctx.reports.product_performance(&range).await {
        Ok(rows) => {
            if rows.is_empty() {
                println!("no sales in this window.");
                return 0;
            }
            let mut table = Table::new(&["PRODUCT", "SOLD", "SALES"]);
            for row in &rows {
                table.row(vec![
                    row.product_name.clone(),
                    row.quantity_sold.to_string(),
                    money(row.sales_amount),
                ]);
            }
            table.print();
            0
        }
        Err(err) => fail(&err),
    }
}

async fn customers(ctx: &AppContext, range: DateRange) -> i32 {
    match ctx.reports.customer_insights(&range).await {
        Ok(rows) => {
            if rows.is_empty() {
                println!("no sales in this window.");
                return 0;
            }
            let mut table = Table::new(&["CUSTOMER", "INVOICES", "SPENT", "AVG"]);
            for row in &rows {
                table.row(vec![
                    row.name.clone(),
                    row.invoice_count.to_string(),
                    money(row.total_spent),
                    money(row.average_invoice),
                ]);
            }
            table.print();
            0
        }
        Err(err) => fail(&err),
    }
}

async fn employees(ctx: &AppContext, range: DateRange) -> i32 {
    match ctx.reports.employee_sales(&range).await {
        Ok(rows) => {
            if rows.is_empty() {
                println!("no sales in this window.");
                return 0;
            }
            let mut table = Table::new(&["EMPLOYEE", "INVOICES", "SALES"]);
            for row in &rows {
                table.row(vec![
                    row.name.clone(),
                    row.invoice_count.to_string(),
                    money(row.total_sales),
                ]);
            }
            table.print();
            0
        }
        Err(err) => fail(&err),
    }
}
