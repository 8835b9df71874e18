// src/users/mod.rs
//
// User input validation pipelines. The account-management layer calls the
// validators here before creating or updating a user and surfaces any
// returned violations as a 400 payload.

pub mod constants;
pub mod email;
pub mod models;
pub mod password;
pub mod similarity;


pub use email::EmailValidator;
pub use models::UserProfile;
pub use password::PasswordValidator;
