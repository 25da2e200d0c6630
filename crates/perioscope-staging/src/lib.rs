//! perioscope-staging
//!
//! Converts three radiographic landmarks into a bone-loss measurement and a
//! periodontal stage. Pure and synchronous: no AWS dependency and no shared
//! mutable state.

pub mod error;
pub mod geometry;
pub mod ladder;

pub use error::StagingError;
pub use geometry::{StagingReport, stage, stage_landmarks};
pub use ladder::{classify, classify_by_percentage};
