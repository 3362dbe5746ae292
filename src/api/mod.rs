pub mod account;
pub mod leave_request;
pub mod user;
