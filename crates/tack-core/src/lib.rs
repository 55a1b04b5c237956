//! Core types and trait definitions for the Tack ticket aggregation engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The aggregation pipeline is strictly read-only: every operation in
//! [`resolve`], [`aggregate`], [`board`], and [`report`] issues only read
//! queries through the [`store::TicketStore`] abstraction and tolerates
//! concurrent writes happening between its own steps.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod board;
pub mod contact;
pub mod directory;
pub mod error;
pub mod page;
pub mod report;
pub mod resolve;
pub mod store;
pub mod tag;
pub mod tenant;
pub mod ticket;

pub use error::{Error, Result};
