use strum_macros::{AsRefStr, Display};

/// Stored as a plain string in `users.role`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}
