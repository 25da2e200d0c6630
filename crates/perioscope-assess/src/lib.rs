//! perioscope-assess
//!
//! Confidence scoring, the deterministic fallback generator, and the
//! pipeline that decides between the model path and the fallback path.

pub mod confidence;
pub mod error;
pub mod fallback;
pub mod pipeline;
