//! perioscope-cli
//!
//! Command-line front end over the staging and assessment crates, plus the
//! on-disk configuration it reads.

pub mod cli;
pub mod commands;
pub mod config;
