//! Core types for Parley.

pub mod context;

pub use context::*;
