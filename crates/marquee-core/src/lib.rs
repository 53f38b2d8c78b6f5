//! Core types and the activity aggregation pipeline for Marquee.
//!
//! This crate is deliberately free of HTTP and database dependencies. Data
//! comes in through the [`source::ActivitySource`] trait, which storage
//! backends (e.g. `marquee-store-sqlite`) and test fakes implement.

pub mod display;
pub mod error;
pub mod event;
pub mod history;
pub mod id;
pub mod record;
pub mod roster;
pub mod source;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
