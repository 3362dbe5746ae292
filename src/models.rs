use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AdminSignupRequest {
    #[schema(example = "root")]
    pub username: String,
    #[schema(example = "+8801700000000")]
    pub phone: String,
    #[schema(example = "s3cret", format = "password")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UserSignupRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "+8801712345678")]
    pub phone: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    #[schema(example = "root")]
    pub username: String,
    #[schema(example = "s3cret", format = "password")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UserLoginRequest {
    #[schema(example = "+8801712345678")]
    pub phone: String,
}

#[derive(Deserialize, ToSchema)]
pub struct NotifyAdminRequest {
    #[schema(example = 7)]
    pub user_id: u64,
    /// copied onto the leave request as-is
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Family event on Friday")]
    pub message: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AssignTimeRequest {
    #[schema(example = 7)]
    pub user_id: u64,
    /// 24h clock, e.g. "14:30"
    #[schema(example = "14:30")]
    pub time: String,
}
