//! Shared utilities for trend-rs
//!
//! This crate provides common functionality used across the trend-rs
//! workspace, currently logging setup.

pub mod logging;

pub use logging::init_tracing;
