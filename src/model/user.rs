use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

/// Row of `users`. `password` holds an Argon2 hash for admins and is never serialized.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "user")]
    pub role: String,

    #[schema(example = "alice", nullable = true)]
    pub username: Option<String>,

    #[serde(skip)]
    pub password: Option<String>,

    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,

    #[schema(
        example = "2026-01-01T14:30:00",
        value_type = Option<String>,
        format = "date-time"
    )]
    pub assigned_time: Option<NaiveDateTime>,
}
