//! # Ports
//!
//! The header factory decides which header version a block carries.

pub mod header;

pub use header::HeaderFactory;
