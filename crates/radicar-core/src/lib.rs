//! Core types and trait definitions for the radicar case tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod actor;
pub mod case;
pub mod deadline;
pub mod directory;
pub mod error;
pub mod lifecycle;
pub mod notify;
pub mod policy;
pub mod store;

pub use error::{Error, ErrorKind, Result};
