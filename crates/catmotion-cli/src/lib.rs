//! catmotion CLI library.
//!
//! Command implementations for the `catmotion` binary, kept in a library so
//! integration tests can drive them directly.

pub mod commands;
