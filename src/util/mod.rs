//! Browser environment adapters.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules isolate `web-sys`/`js-sys` glue so session logic stays
//! platform-neutral and testable off the browser.

pub mod clock;
pub mod storage;
