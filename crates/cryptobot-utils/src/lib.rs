//! Shared utilities for cryptobot
//!
//! This crate provides common functionality used across the cryptobot workspace,
//! including logging setup, environment variable lookups, and secret masking.

pub mod env;
pub mod logging;
pub mod secret;

pub use env::{EnvError, ProcessEnv, VarSource};
pub use logging::{LogFormat, init_tracing};
pub use secret::mask_secret;
