//! # flowqa-cli
//!
//! Command handlers for the `flowqa` binary. They live in a library so that
//! integration tests can drive them directly.

pub mod ask;
pub mod config;
pub mod process;
pub mod records;
