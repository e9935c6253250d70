// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `zentra login`, `zentra logout`, and `zentra whoami`.

use std::io::{BufRead, Write};

use nix::sys::termios;

use crate::command::fail;
use crate::config::LoginArgs;
use crate::context::AppContext;

pub async fn login(ctx: &AppContext, args: LoginArgs) -> i32 {
    let password = match args.password {
        Some(password) => password,
        None => match prompt_password("Password: ") {
            Ok(password) => password,
            Err(err) => {
                eprintln!("error: could not read password: {err}");
                return 1;
            }
        },
    };

    match ctx.session.login(&args.email, &password).await {
        Ok(user) => {
            println!("signed in as {} <{}> ({})", user.name, user.email, user.role);
            0
        }
        Err(err) => fail(&err),
    }
}

pub fn logout(ctx: &AppContext) -> i32 {
    ctx.session.logout();
    println!("signed out");
    0
}

pub async fn whoami(ctx: &AppContext) -> i32 {
    if let Err(code) = ctx.ensure_signed_in().await {
        return code;
    }
    match ctx.account.me().await {
        Ok(me) => {
            println!("{:<12} {}", "id", me.id);
            println!("{:<12} {}", "name", me.name);
            println!("{:<12} {}", "email", me.email);
            println!("{:<12} {}", "role", me.role);
            println!("{:<12} {}", "employee", me.employee_id);
            println!("{:<12} {}", "tenant", me.tenant_id);
            println!("{:<12} {}", "schema", me.schema_name);
            println!("{:<12} {}", "subscription", me.subscription_id);
            0
        }
        Err(err) => fail(&err),
    }
}

/// Read a password from stdin with terminal echo suppressed.
fn prompt_password(prompt: &str) -> std::io::Result<String> {
    let mut stderr = std::io::stderr();
    stderr.write_all(prompt.as_bytes())?;
    stderr.flush()?;

    let quiet = EchoOffGuard::enter();
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    drop(quiet);
    eprintln!();

    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// RAII guard that restores terminal echo on drop. Piped stdin (no tty) is
/// left untouched.
struct EchoOffGuard {
    original: Option<termios::Termios>,
}

impl EchoOffGuard {
    fn enter() -> Self {
        let stdin = std::io::stdin();
        let Ok(original) = termios::tcgetattr(&stdin) else {
            return Self { original: None };
        };
        let mut quiet = original.clone();
        quiet.local_flags.remove(termios::LocalFlags::ECHO);
        if termios::tcsetattr(&stdin, termios::SetArg::TCSAFLUSH, &quiet).is_err() {
            return Self { original: None };
        }
        Self { original: Some(original) }
    }
}

impl Drop for EchoOffGuard {
    fn drop(&mut self) {
        if let Some(ref original) = self.original {
            let _ = termios::tcsetattr(std::io::stdin(), termios::SetArg::TCSAFLUSH, original);
        }
    }
}
