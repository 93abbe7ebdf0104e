//! Frota fleet-management API.
//!
//! Route builders and error types for the server binary; exposed as a
//! library so integration tests can drive the router directly.

pub mod error;
pub mod vehicles;
