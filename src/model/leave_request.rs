use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    /// leave request id
    pub id: u64,
    #[schema(example = 7)]
    /// user who asked for leave
    pub user_id: u64,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Family event on Friday")]
    pub message: String,
    #[schema(example = "pending")]
    // pending / approved / rejected
    pub status: String,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
