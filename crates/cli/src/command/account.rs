// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zentra subscription`.

use crate::command::fail;
use crate::context::AppContext;
use crate::render::Table;

pub async fn subscription(ctx: &AppContext) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match ctx.account.subscriptions().await {
        Ok(subscriptions) => {
            if subscriptions.is_empty() {
                println!("no subscriptions");
                return 0;
            }
            let mut table = Table::new(&["PLAN", "STATUS", "JOINED", "EXPIRES"]);
            for sub in &subscriptions {
                table.row(vec![
                    sub.plan_name.clone(),
                    sub.status.clone(),
                    sub.joined_at.clone(),
                    sub.expires_at.clone(),
                ]);
            }
            table.print();
            0
        }
        Err(err) => fail(&err),
    }
}
