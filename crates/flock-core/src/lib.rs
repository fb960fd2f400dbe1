//! Core types and trait definitions for the Flock read façade.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod access;
pub mod error;
pub mod field;
pub mod record;
pub mod store;

pub use error::{AuthError, Error, Result};
pub use field::{Field, Meaningful};
