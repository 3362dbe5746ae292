use crate::api::account::{AdminLoginResponse, SignupResponse, UserLoginResponse};
use crate::api::user::AssignedTimeResponse;
use crate::model::leave_request::LeaveRequest;
use crate::model::user::User;
use crate::models::{
    AdminLoginRequest, AdminSignupRequest, AssignTimeRequest, NotifyAdminRequest,
    UserLoginRequest, UserSignupRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "0.1.0",
        description = r#"
## Leave Desk

Small administrative backend for two roles, **admin** and **user**.

### Features
- **Accounts**: admin signup/login with username and password, user signup/login by phone
- **Assigned time**: admins attach one daily time to a user
- **Leave requests**: users notify admins, admins approve or reject

### Security
There is no session or token layer. Login endpoints only confirm credentials.
Admin passwords are stored as Argon2 hashes.

### Errors
Every error body is `{"message": "..."}`.
- `400` duplicate phone/username, malformed time or body
- `401` invalid credentials
- `404` unknown user or leave request
"#,
    ),
    paths(
        crate::api::account::signup_admin,
        crate::api::account::signup_user,
        crate::api::account::login_admin,
        crate::api::account::login_user,

        crate::api::leave_request::notify_admin,
        crate::api::leave_request::pending_leave_requests,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::latest_leave_request,

        crate::api::user::list_users,
        crate::api::user::get_assigned_time,
        crate::api::user::assign_time
    ),
    components(
        schemas(
            AdminSignupRequest,
            UserSignupRequest,
            AdminLoginRequest,
            UserLoginRequest,
            NotifyAdminRequest,
            AssignTimeRequest,
            SignupResponse,
            AdminLoginResponse,
            UserLoginResponse,
            AssignedTimeResponse,
            LeaveRequest,
            User
        )
    ),
    tags(
        (name = "Account", description = "Signup and login"),
        (name = "Leave", description = "Leave request workflow"),
        (name = "User", description = "User listing and assigned time"),
    )
)]
pub struct ApiDoc;
