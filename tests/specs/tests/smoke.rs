// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end smoke tests that spawn the real `zentra` binary against a
//! scripted backend stub and follow a session across invocations.

use zentra_core::error::SERVER_UNAVAILABLE_MSG;
use zentra_specs::{error_body, login_body, refresh_body, user_json, validate_body, ApiBuilder, Cli};

fn products_page() -> String {
    serde_json::json!({
        "page": 1,
        "limit": 20,
        "rows": [{
            "product_id": "p1",
            "name": "Green Tea",
            "price": 4.5,
            "stock_level": 12,
            "category_id": "c1",
            "category_name": "Tea",
        }],
    })
    .to_string()
}

#[tokio::test]
async fn login_signs_in_and_stores_the_credential() -> anyhow::Result<()> {
    let cli = Cli::with_api(
        ApiBuilder::new().route("/auth/login", vec![(200, login_body("u-1", "AT1", "RT1"))]),
    )
    .await?;

    let exec =
        cli.run(&["login", "--email", "demo@zentra.com", "--password", "secret1"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);
    assert!(exec.stdout.contains("signed in as Demo Employee"), "stdout: {}", exec.stdout);

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(cli.credential_file())?)?;
    assert_eq!(stored["refresh_token"], "RT1");
    Ok(())
}

#[tokio::test]
async fn rejected_login_reports_the_server_message() -> anyhow::Result<()> {
    let cli = Cli::with_api(
        ApiBuilder::new()
            .route("/auth/login", vec![(401, error_body("Invalid email or password."))]),
    )
    .await?;

    let exec = cli.run(&["login", "--email", "demo@zentra.com", "--password", "wrong1"]).await?;
    assert_eq!(exec.code, 1);
    assert!(exec.stderr.contains("Invalid email or password."), "stderr: {}", exec.stderr);
    assert!(!cli.credential_file().exists());
    Ok(())
}

#[tokio::test]
async fn session_survives_across_invocations() -> anyhow::Result<()> {
    let cli = Cli::with_api(
        ApiBuilder::new()
            .route("/auth/login", vec![(200, login_body("u-1", "AT1", "RT1"))])
            .route("/auth/refresh", vec![(200, refresh_body("AT2"))])
            .route("/auth/validate", vec![(200, validate_body("u-1"))])
            .route("/users/me", vec![(200, user_json("u-1").to_string())]),
    )
    .await?;

    let exec =
        cli.run(&["login", "--email", "demo@zentra.com", "--password", "secret1"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);

    // A fresh process restores the session from the stored credential.
    let exec = cli.run(&["whoami"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);
    assert!(exec.stdout.contains("Demo Employee"), "stdout: {}", exec.stdout);

    assert_eq!(cli.api().hits("/auth/refresh"), 1);
    assert_eq!(cli.api().skip_flags("/auth/refresh"), vec![true]);
    assert_eq!(cli.api().bearers("/auth/validate"), vec![Some("AT2".to_owned())]);
    assert_eq!(cli.api().bearers("/users/me"), vec![Some("AT2".to_owned())]);
    Ok(())
}

#[tokio::test]
async fn logout_discards_the_stored_credential() -> anyhow::Result<()> {
    let cli = Cli::with_api(
        ApiBuilder::new().route("/auth/login", vec![(200, login_body("u-1", "AT1", "RT1"))]),
    )
    .await?;

    let exec =
        cli.run(&["login", "--email", "demo@zentra.com", "--password", "secret1"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);
    assert!(cli.credential_file().exists());

    let exec = cli.run(&["logout"]).await?;
    assert_eq!(exec.code, 0);
    assert!(exec.stdout.contains("signed out"));
    assert!(!cli.credential_file().exists());

    let exec = cli.run(&["whoami"]).await?;
    assert_eq!(exec.code, 2);
    assert!(exec.stderr.contains("not signed in"), "stderr: {}", exec.stderr);
    Ok(())
}

#[tokio::test]
async fn stale_stored_credential_signs_the_session_out() -> anyhow::Result<()> {
    let cli = Cli::with_api(
        ApiBuilder::new()
            .route("/auth/login", vec![(200, login_body("u-1", "AT1", "RT1"))])
            .route("/auth/refresh", vec![(401, error_body("Refresh token expired"))]),
    )
    .await?;

    let exec =
        cli.run(&["login", "--email", "demo@zentra.com", "--password", "secret1"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);

    // The rejected refresh clears the slot; the user just sees signed-out.
    let exec = cli.run(&["whoami"]).await?;
    assert_eq!(exec.code, 2);
    assert!(exec.stderr.contains("not signed in"), "stderr: {}", exec.stderr);
    assert!(!cli.credential_file().exists());
    Ok(())
}

#[tokio::test]
async fn expired_access_token_renews_mid_command() -> anyhow::Result<()> {
    let cli = Cli::with_api(
        ApiBuilder::new()
            .route("/auth/login", vec![(200, login_body("u-1", "AT1", "RT1"))])
            .route(
                "/auth/refresh",
                vec![(200, refresh_body("AT2")), (200, refresh_body("AT3"))],
            )
            .route("/auth/validate", vec![(200, validate_body("u-1"))])
            .route(
                "/products",
                vec![(401, error_body("Token expired")), (200, products_page())],
            ),
    )
    .await?;

    let exec =
        cli.run(&["login", "--email", "demo@zentra.com", "--password", "secret1"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);

    // The 401 is absorbed by a renewal and a single retry.
    let exec = cli.run(&["products"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);
    assert!(exec.stdout.contains("Green Tea"), "stdout: {}", exec.stdout);
    assert!(exec.stdout.contains("page 1 (1 rows)"), "stdout: {}", exec.stdout);

    assert_eq!(cli.api().hits("/auth/refresh"), 2);
    assert_eq!(cli.api().hits("/products"), 2);
    assert_eq!(
        cli.api().bearers("/products"),
        vec![Some("AT2".to_owned()), Some("AT3".to_owned())]
    );
    Ok(())
}

#[tokio::test]
async fn backend_5xx_collapses_to_the_generic_message() -> anyhow::Result<()> {
    let cli = Cli::with_api(
        ApiBuilder::new()
            .route("/auth/login", vec![(200, login_body("u-1", "AT1", "RT1"))])
            .route("/auth/refresh", vec![(200, refresh_body("AT2"))])
            .route("/auth/validate", vec![(200, validate_body("u-1"))])
            .route("/products", vec![(503, error_body("pg pool exhausted"))]),
    )
    .await?;

    let exec =
        cli.run(&["login", "--email", "demo@zentra.com", "--password", "secret1"]).await?;
    assert_eq!(exec.code, 0, "stderr: {}", exec.stderr);

    let exec = cli.run(&["products"]).await?;
    assert_eq!(exec.code, 1);
    assert!(exec.stderr.contains(SERVER_UNAVAILABLE_MSG), "stderr: {}", exec.stderr);
    assert!(!exec.stderr.contains("pg pool"), "stderr: {}", exec.stderr);
    Ok(())
}
