//! Core types and utilities for synctropy
//!
//! This is the foundation crate (Layer 0) that all other synctropy crates depend on.
//! It provides:
//! - Base error types and the exit codes they map to
//! - Platform detection
//!
//! This crate has no dependencies on other synctropy crates.

pub mod error;
pub mod platform;

pub use error::{Error, Result, exit_code};
