use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Every failure a handler can report to a client.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Referenced row is absent (404)
    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Duplicate value in a unique column (400)
    #[display(fmt = "{}", _0)]
    Conflict(String),

    /// Malformed input (400)
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Login did not match (401)
    #[display(fmt = "{}", _0)]
    InvalidCredentials(String),

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),

    #[display(fmt = "internal error: {}", _0)]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials(message.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "Internal Server Error".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // MySQL reports duplicate keys as SQLSTATE 23000 / error 1062
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23000") {
                if let Some(conflict) = duplicate_key_conflict(db_err.message()) {
                    return conflict;
                }
            }
        }
        Self::Database(e)
    }
}

/// Maps "Duplicate entry '<value>' for key '[users.]<key>'" to the unique key that was hit.
/// The key name is read from the end so the duplicated value cannot be mistaken for it.
fn duplicate_key_conflict(message: &str) -> Option<ApiError> {
    let (_, key) = message.rsplit_once("for key '")?;
    let key = key.trim_end_matches('\'');
    let key = key.rsplit_once('.').map_or(key, |(_, name)| name);

    match key {
        "uq_users_username" => Some(ApiError::Conflict("Username already registered".to_string())),
        "uq_users_phone" => Some(ApiError::Conflict("Phone already registered".to_string())),
        _ => None,
    }
}
