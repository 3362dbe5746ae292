use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    model::{role::Role, user::User},
    models::AssignTimeRequest,
    utils::time::parse_assigned_time,
};

#[derive(Serialize, ToSchema)]
pub struct AssignedTimeResponse {
    #[schema(example = "2026-01-01T14:30:00", value_type = Option<String>, format = "date-time")]
    pub assigned_time: Option<NaiveDateTime>,
}

/// List every user with role "user"; admins are never included
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All regular users", body = [User])
    ),
    tag = "User"
)]
pub async fn list_users(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, role, username, password, phone, assigned_time
        FROM users
        WHERE role = ?
        "#,
    )
    .bind(Role::User.as_ref())
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(users))
}

/// Assigned time of a single user
#[utoipa::path(
    get,
    path = "/users/{user_id}/assigned_time",
    params(
        ("user_id" = u64, Path, description = "ID of the user")
    ),
    responses(
        (status = 200, description = "Assigned time, null when never set", body = AssignedTimeResponse),
        (status = 404, description = "User not found", body = Object, example = json!({
            "message": "User not found"
        }))
    ),
    tag = "User"
)]
pub async fn get_assigned_time(
    pool: web::Data<MySqlPool>,
    user_id: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let assigned_time = sqlx::query_scalar::<_, Option<NaiveDateTime>>(
        "SELECT assigned_time FROM users WHERE id = ?",
    )
    .bind(user_id.into_inner())
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(AssignedTimeResponse { assigned_time }))
}

/* =========================
Assign a daily time to a user
========================= */
#[utoipa::path(
    post,
    path = "/assign-time",
    request_body = AssignTimeRequest,
    responses(
        (status = 200, description = "Time assigned", body = Object, example = json!({
            "message": "Assigned time 2026-01-01 14:30:00 to user alice"
        })),
        (status = 400, description = "Time is not HH:MM", body = Object, example = json!({
            "message": "Time must be in HH:MM format"
        })),
        (status = 404, description = "User not found", body = Object, example = json!({
            "message": "User not found"
        }))
    ),
    tag = "User"
)]
#[instrument(name = "assign_time", skip(pool, payload), fields(user_id = payload.user_id))]
pub async fn assign_time(
    pool: web::Data<MySqlPool>,
    payload: web::Json<AssignTimeRequest>,
) -> Result<HttpResponse, ApiError> {
    // validated before touching the database
    let assigned = parse_assigned_time(&payload.time, Local::now().date_naive())?;

    let mut tx = pool.begin().await?;

    let username = sqlx::query_scalar::<_, Option<String>>(
        "SELECT username FROM users WHERE id = ? FOR UPDATE",
    )
    .bind(payload.user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    sqlx::query("UPDATE users SET assigned_time = ? WHERE id = ?")
        .bind(assigned)
        .bind(payload.user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(%assigned, "Assigned time updated");

    Ok(HttpResponse::Ok().json(json!({
        "message": format!(
            "Assigned time {assigned} to user {}",
            username.unwrap_or_default()
        )
    })))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{call_json, db_pool, init_app, lazy_pool, unique_digits};
    use actix_web::{http::StatusCode, test::TestRequest};
    use chrono::Local;
    use serde_json::json;

    #[actix_web::test]
    async fn malformed_time_is_rejected_before_lookup() {
        // lazy pool: any database access would fail with a connection error
        let app = init_app!(lazy_pool());

        let (status, body) = call_json!(
            app,
            TestRequest::post()
                .uri("/assign-time")
                .set_json(json!({ "user_id": 1, "time": "25:61" }))
        );

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Time must be in HH:MM format");
    }

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn users_list_never_contains_admins() {
        let app = init_app!(db_pool().await);
        let digits = unique_digits();
        let admin_phone = format!("+{digits}");

        let (status, _) = call_json!(
            app,
            TestRequest::post().uri("/signup/admin").set_json(json!({
                "username": format!("lister_{digits}"),
                "phone": admin_phone,
                "password": "pw",
            }))
        );
        assert_eq!(status, StatusCode::OK);

        let user_digits = unique_digits();
        let user_phone = format!("+{user_digits}");
        let (status, _) = call_json!(
            app,
            TestRequest::post().uri("/signup/user").set_json(json!({
                "username": format!("listed_{user_digits}"),
                "phone": user_phone,
            }))
        );
        assert_eq!(status, StatusCode::OK);

        let (status, users) = call_json!(app, TestRequest::get().uri("/users"));
        assert_eq!(status, StatusCode::OK);
        let users = users.as_array().unwrap();

        assert!(users.iter().all(|u| u["role"] == "user"));
        assert!(users.iter().all(|u| u["phone"] != admin_phone.as_str()));
        assert!(users.iter().any(|u| u["phone"] == user_phone.as_str()));
        assert!(users.iter().all(|u| u.get("password").is_none()));
    }

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn assign_time_sets_todays_timestamp() {
        let app = init_app!(db_pool().await);
        let digits = unique_digits();
        let username = format!("shift_{digits}");

        let (_, body) = call_json!(
            app,
            TestRequest::post().uri("/signup/user").set_json(json!({
                "username": username,
                "phone": format!("+{digits}"),
            }))
        );
        let user_id = body["userId"].as_u64().unwrap();

        let (status, body) = call_json!(
            app,
            TestRequest::get().uri(&format!("/users/{user_id}/assigned_time"))
        );
        assert_eq!(status, StatusCode::OK);
        assert!(body["assigned_time"].is_null());

        let today = Local::now().date_naive();
        let (status, body) = call_json!(
            app,
            TestRequest::post()
                .uri("/assign-time")
                .set_json(json!({ "user_id": user_id, "time": "09:15" }))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("Assigned time {today} 09:15:00 to user {username}")
        );

        let (status, body) = call_json!(
            app,
            TestRequest::get().uri(&format!("/users/{user_id}/assigned_time"))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assigned_time"], format!("{today}T09:15:00"));
    }

    #[actix_web::test]
    #[ignore = "requires database"]
    async fn unknown_user_is_not_found() {
        let app = init_app!(db_pool().await);

        let (status, body) = call_json!(
            app,
            TestRequest::post()
                .uri("/assign-time")
                .set_json(json!({ "user_id": u32::MAX, "time": "10:00" }))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");

        let (status, body) = call_json!(
            app,
            TestRequest::get().uri(&format!("/users/{}/assigned_time", u32::MAX))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }
}
