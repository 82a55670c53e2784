//! Networking for the auth and appointment services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the session crate's `AuthApi` over `fetch` and issues
//! bearer-authenticated appointment reads.

pub mod api;
