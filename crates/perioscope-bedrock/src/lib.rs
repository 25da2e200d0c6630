//! perioscope-bedrock
//!
//! Guarded access to the generative model: a sliding-window rate limiter
//! with exponential backoff, the prompt, and the sanitise/validate stage
//! that turns model text into a schema-valid `EnhancedAnalysis` or rejects it.

pub mod client;
pub mod error;
pub mod limiter;
pub mod prompt;
pub mod sanitize;
pub mod validate;
