//! Reusable UI components.
//!
//! ARCHITECTURE
//! ============
//! `protected` is the route gate every access-controlled page is wrapped in;
//! `header` is the session-aware navigation bar; `appointment_table` renders
//! appointment lists for both dashboards.

pub mod appointment_table;
pub mod header;
pub mod protected;
