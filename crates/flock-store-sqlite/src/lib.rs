//! SQLite backend for Flock.
//!
//! One [`SqliteStore`] implements every collaborator trait in
//! [`flock_core::store`]: the record directory, role membership, the grant
//! store and password authentication. All database access goes through
//! [`tokio_rusqlite`] so it never blocks the async runtime.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

mod access;
mod accounts;
mod encode;
mod schema;
mod seed;
mod store;

pub mod error;

pub use accounts::{NewAccount, hash_password};
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
