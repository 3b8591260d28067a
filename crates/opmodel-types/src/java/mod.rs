//! Java-specific helpers for the type model.
//!
//! The formatters here are "Java-like" and stable, intended for logs, reports and diagnostics.

pub mod format;
pub mod subtyping;
