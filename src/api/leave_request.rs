use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde_json::json;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    model::leave_request::{LeaveRequest, LeaveStatus},
    models::NotifyAdminRequest,
};

const LEAVE_COLUMNS: &str = "id, user_id, username, message, status, created_at";

async fn user_exists(tx: &mut Transaction<'_, MySql>, user_id: u64) -> Result<bool, ApiError> {
    let found = sqlx::query_scalar::<_, u64>("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(found.is_some())
}

/* =========================
Submit a leave request
========================= */
/// Submit a leave request to the admins
#[utoipa::path(
    post,
    path = "/notify-admin",
    request_body = NotifyAdminRequest,
    responses(
        (status = 200, description = "Leave request created", body = LeaveRequest),
        (status = 404, description = "User not found", body = Object, example = json!({
            "message": "User not found"
        }))
    ),
    tag = "Leave"
)]
#[instrument(name = "notify_admin", skip(pool, payload), fields(user_id = payload.user_id))]
pub async fn notify_admin(
    pool: web::Data<MySqlPool>,
    payload: web::Json<NotifyAdminRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut tx = pool.begin().await?;

    if !user_exists(&mut tx, payload.user_id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests (user_id, username, message, status, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.user_id)
    .bind(&payload.username)
    .bind(&payload.message)
    .bind(LeaveStatus::Pending.as_ref())
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    let created = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?"
    ))
    .bind(result.last_insert_id())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(leave_id = created.id, "Leave request submitted");

    Ok(HttpResponse::Ok().json(created))
}

/// List every pending leave request
#[utoipa::path(
    get,
    path = "/leave-requests/pending",
    responses(
        (status = 200, description = "Pending leave requests", body = [LeaveRequest])
    ),
    tag = "Leave"
)]
pub async fn pending_leave_requests(
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse, ApiError> {
    // no ORDER BY: callers get storage order
    let pending = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE status = ?"
    ))
    .bind(LeaveStatus::Pending.as_ref())
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(pending))
}

/// Sets the status of an existing leave request and returns its username.
///
/// Any status may overwrite any other; there is no pending-only guard.
async fn set_status(
    pool: &MySqlPool,
    leave_id: u64,
    status: LeaveStatus,
) -> Result<String, ApiError> {
    let mut tx = pool.begin().await?;

    // Looked up first: MySQL reports 0 affected rows for an UPDATE that
    // writes the value already stored, so rows_affected cannot signal absence.
    let username = sqlx::query_scalar::<_, String>(
        "SELECT username FROM leave_requests WHERE id = ? FOR UPDATE",
    )
    .bind(leave_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found("Leave request not found"))?;

    sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
        .bind(status.as_ref())
        .bind(leave_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(username)
}

/* =========================
Approve leave
========================= */
#[utoipa::path(
    post,
    path = "/leave-requests/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Leave approved for alice"
        })),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
#[instrument(name = "approve_leave", skip(pool))]
pub async fn approve_leave(
    pool: web::Data<MySqlPool>,
    leave_id: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let username = set_status(pool.get_ref(), leave_id.into_inner(), LeaveStatus::Approved).await?;

    info!("Leave approved");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Leave approved for {username}")
    })))
}

/* =========================
Reject leave
========================= */
#[utoipa::path(
    post,
    path = "/leave-requests/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Leave rejected for alice"
        })),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
#[instrument(name = "reject_leave", skip(pool))]
pub async fn reject_leave(
    pool: web::Data<MySqlPool>,
    leave_id: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let username = set_status(pool.get_ref(), leave_id.into_inner(), LeaveStatus::Rejected).await?;

    info!("Leave rejected");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Leave rejected for {username}")
    })))
}

/// Latest leave request of a user
#[utoipa::path(
    get,
    path = "/leave-requests/status/{user_id}",
    params(
        ("user_id" = u64, Path, description = "User whose latest leave request is returned")
    ),
    responses(
        (status = 200, description = "Most recent leave request", body = LeaveRequest),
        (status = 404, description = "User not found, or user has no leave requests", body = Object, example = json!({
            "message": "No leave requests found"
        }))
    ),
    tag = "Leave"
)]
#[instrument(name = "latest_leave_request", skip(pool))]
pub async fn latest_leave_request(
    pool: web::Data<MySqlPool>,
    user_id: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user_id.into_inner();

    let user = sqlx::query_scalar::<_, u64>("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool.get_ref())
        .await?;
    if user.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    // id breaks ties between requests created in the same microsecond
    let latest = sqlx::query_as::<_, LeaveRequest>(&format!(
        r#"
        SELECT {LEAVE_COLUMNS}
        FROM leave_requests
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| ApiError::not_found("No leave requests found"))?;

    Ok(HttpResponse::Ok().json(latest))
}
