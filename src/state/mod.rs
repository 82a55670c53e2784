//! Shared client-side state.
//!
//! DESIGN
//! ======
//! The session is the only cross-page state; it is provided once by `App`
//! and read by the header, route guard and pages.

pub mod auth;
