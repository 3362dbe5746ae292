//! Shared helpers for the HTTP tests.
//!
//! Database-backed tests are `#[ignore = "requires database"]`; run them with
//! `TEST_DATABASE_URL=mysql://... cargo test -- --ignored`.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use crate::config::Config;

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        server_addr: "127.0.0.1:0".to_string(),
        db_max_connections: 2,
        log_dir: "logs".to_string(),
        log_level: tracing::Level::DEBUG,
        api_prefix: String::new(),
    }
}

/// Pool that never connects until a query runs. For paths that fail before touching the database.
pub fn lazy_pool() -> MySqlPool {
    MySqlPoolOptions::new()
        .connect_lazy("mysql://leavedesk@127.0.0.1:3306/leavedesk_unused")
        .unwrap()
}

pub async fn db_pool() -> MySqlPool {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL must be set for database tests");
    let pool = MySqlPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .unwrap();
    crate::db::create_schema(&pool).await.unwrap();
    pool
}

/// Digits unique within this process and across runs, short enough for `users.phone`.
pub fn unique_digits() -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed) % 1000;
    let micros = Utc::now().timestamp_micros().rem_euclid(1_000_000_000_000);
    format!("{micros:012}{n:03}")
}

macro_rules! init_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool))
                .configure(|cfg| {
                    crate::routes::configure(cfg, &crate::test_support::test_config())
                }),
        )
        .await
    };
}

/// Sends a `TestRequest` and returns the status with the JSON body.
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}

pub(crate) use call_json;
pub(crate) use init_app;
