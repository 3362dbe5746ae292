use actix_web::{HttpResponse, web};
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::{
    auth::password::{hash_password, verify_password},
    error::ApiError,
    model::{role::Role, user::User},
    models::{AdminLoginRequest, AdminSignupRequest, UserLoginRequest, UserSignupRequest},
};

#[derive(Serialize, ToSchema)]
pub struct SignupResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    #[serde(rename = "userId")]
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "+8801712345678")]
    pub phone: String,
    #[schema(example = "user")]
    pub role: String,
}

#[derive(Serialize, ToSchema)]
pub struct AdminLoginResponse {
    #[schema(example = "Admin login successful")]
    pub message: String,
    #[schema(example = "admin")]
    pub role: String,
    #[schema(example = "root", nullable = true)]
    pub username: Option<String>,
    #[serde(rename = "userId")]
    #[schema(example = 1)]
    pub user_id: u64,
}

#[derive(Serialize, ToSchema)]
pub struct UserLoginResponse {
    #[schema(example = "User login successful")]
    pub message: String,
    #[schema(example = "user")]
    pub role: String,
    #[schema(example = "alice", nullable = true)]
    pub username: Option<String>,
    #[serde(rename = "userId")]
    #[schema(example = 7)]
    pub user_id: u64,
    #[schema(example = "2026-01-01T14:30:00", value_type = Option<String>, format = "date-time")]
    pub assigned_time: Option<NaiveDateTime>,
}

/// Inserts a user unless the phone is taken. One transaction, one commit.
///
/// The unique keys on `phone` and `username` still guard the race between the
/// lookup and the insert; that duplicate-key error maps to the same 400.
async fn insert_user(
    pool: &MySqlPool,
    role: Role,
    username: &str,
    phone: &str,
    password_hash: Option<&str>,
) -> Result<u64, ApiError> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, u64>("SELECT id FROM users WHERE phone = ? LIMIT 1")
        .bind(phone)
        .fetch_optional(&mut *tx)
        .await?;

    if existing.is_some() {
        info!("Signup rejected: phone already registered");
        return Err(ApiError::Conflict("Phone already registered".to_string()));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO users (role, username, password, phone)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(role.as_ref())
    .bind(username)
    .bind(password_hash)
    .bind(phone)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(result.last_insert_id())
}

/// Register an admin
#[utoipa::path(
    post,
    path = "/signup/admin",
    request_body = AdminSignupRequest,
    responses(
        (status = 200, description = "Admin registered", body = SignupResponse),
        (status = 400, description = "Phone or username already registered", body = Object, example = json!({
            "message": "Phone already registered"
        }))
    ),
    tag = "Account"
)]
#[instrument(name = "signup_admin", skip(pool, payload), fields(phone = %payload.phone))]
pub async fn signup_admin(
    pool: web::Data<MySqlPool>,
    payload: web::Json<AdminSignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let hashed = hash_password(&payload.password)?;

    let user_id = insert_user(
        pool.get_ref(),
        Role::Admin,
        &payload.username,
        &payload.phone,
        Some(&hashed),
    )
    .await?;

    info!(user_id, "Admin registered");

    let payload = payload.into_inner();
    Ok(HttpResponse::Ok().json(SignupResponse {
        message: "Admin registered successfully".to_string(),
        user_id,
        username: payload.username,
        phone: payload.phone,
        role: Role::Admin.to_string(),
    }))
}

/// Register a regular user
#[utoipa::path(
    post,
    path = "/signup/user",
    request_body = UserSignupRequest,
    responses(
        (status = 200, description = "User registered", body = SignupResponse),
        (status = 400, description = "Phone or username already registered", body = Object, example = json!({
            "message": "Phone already registered"
        }))
    ),
    tag = "Account"
)]
#[instrument(name = "signup_user", skip(pool, payload), fields(phone = %payload.phone))]
pub async fn signup_user(
    pool: web::Data<MySqlPool>,
    payload: web::Json<UserSignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = insert_user(
        pool.get_ref(),
        Role::User,
        &payload.username,
        &payload.phone,
        None,
    )
    .await?;

    info!(user_id, "User registered");

    let payload = payload.into_inner();
    Ok(HttpResponse::Ok().json(SignupResponse {
        message: "User registered successfully".to_string(),
        user_id,
        username: payload.username,
        phone: payload.phone,
        role: Role::User.to_string(),
    }))
}

/// Admin login with username and password
#[utoipa::path(
    post,
    path = "/login/admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid admin credentials"
        }))
    ),
    tag = "Account"
)]
#[instrument(name = "login_admin", skip(pool, payload), fields(username = %payload.username))]
pub async fn login_admin(
    pool: web::Data<MySqlPool>,
    payload: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, ApiError> {
    debug!("Fetching admin from database");

    let admin = sqlx::query_as::<_, User>(
        r#"
        SELECT id, role, username, password, phone, assigned_time
        FROM users
        WHERE username = ? AND role = ?
        LIMIT 1
        "#,
    )
    .bind(&payload.username)
    .bind(Role::Admin.as_ref())
    .fetch_optional(pool.get_ref())
    .await?;

    // Unknown username and wrong password are indistinguishable to the caller
    let admin = match admin {
        Some(admin)
            if admin
                .password
                .as_deref()
                .is_some_and(|hash| verify_password(&payload.password, hash)) =>
        {
            admin
        }
        _ => {
            info!("Invalid admin credentials");
            return Err(ApiError::invalid_credentials("Invalid admin credentials"));
        }
    };

    info!(user_id = admin.id, "Admin login successful");

    Ok(HttpResponse::Ok().json(AdminLoginResponse {
        message: "Admin login successful".to_string(),
        role: admin.role,
        username: admin.username,
        user_id: admin.id,
    }))
}

/// User login by phone number
#[utoipa::path(
    post,
    path = "/login/user",
    request_body = UserLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserLoginResponse),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid user credentials"
        }))
    ),
    tag = "Account"
)]
#[instrument(name = "login_user", skip(pool, payload), fields(phone = %payload.phone))]
pub async fn login_user(
    pool: web::Data<MySqlPool>,
    payload: web::Json<UserLoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, role, username, password, phone, assigned_time
        FROM users
        WHERE phone = ? AND role = ?
        LIMIT 1
        "#,
    )
    .bind(&payload.phone)
    .bind(Role::User.as_ref())
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| {
        info!("Invalid user credentials");
        ApiError::invalid_credentials("Invalid user credentials")
    })?;

    info!(user_id = user.id, "User login successful");

    Ok(HttpResponse::Ok().json(UserLoginResponse {
        message: "User login successful".to_string(),
        role: user.role,
        username: user.username,
        user_id: user.id,
        assigned_time: user.assigned_time,
    }))
}
