//! Page-level route components.

pub mod admin;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod register;
