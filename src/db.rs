use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

use crate::config::Config;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    role          VARCHAR(20) NOT NULL,
    username      VARCHAR(100) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NULL,
    password      VARCHAR(255) NULL,
    phone         VARCHAR(20) NULL,
    assigned_time DATETIME NULL,
    UNIQUE KEY uq_users_username (username),
    UNIQUE KEY uq_users_phone (phone),
    KEY idx_users_role (role)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const CREATE_LEAVE_REQUESTS: &str = r#"
CREATE TABLE IF NOT EXISTS leave_requests (
    id         BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    user_id    BIGINT UNSIGNED NOT NULL,
    username   VARCHAR(100) NOT NULL,
    message    TEXT NOT NULL,
    status     VARCHAR(20) NOT NULL DEFAULT 'pending',
    created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    KEY idx_leave_requests_status (status),
    KEY idx_leave_requests_user_created (user_id, created_at),
    CONSTRAINT fk_leave_requests_user FOREIGN KEY (user_id) REFERENCES users (id)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub async fn init_db(config: &Config) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Creates both tables when they are absent. Existing tables are left alone.
pub async fn create_schema(pool: &MySqlPool) -> Result<()> {
    for ddl in [CREATE_USERS, CREATE_LEAVE_REQUESTS] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .context("Failed to create schema")?;
    }

    info!("Database schema ready");
    Ok(())
}
