//! perioscope-core
//!
//! Pure domain types and the clinical rules table shared by the staging,
//! invocation and assessment crates. No AWS SDK dependency.

pub mod error;
pub mod models;
pub mod rules;
