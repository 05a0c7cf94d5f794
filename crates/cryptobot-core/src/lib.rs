//! Core types for cryptobot
//!
//! This crate defines the data bag carried by every conversation session.

pub mod context;

pub use context::Context;
