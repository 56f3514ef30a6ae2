//! Domain primitives shared by every pairblend crate.
//!
//! Nothing in here touches the network or the database. Pair resolution
//! and registration rules live here so the worker and the API agree on
//! them.

pub mod config;
pub mod error;
pub mod pairing;
pub mod registration;
pub mod types;
