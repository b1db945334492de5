//! # Domain Layer
//!
//! Core domain types for Sharding subsystem.

pub mod encoding;
pub mod entities;
pub mod errors;

pub use encoding::*;
pub use entities::*;
pub use errors::*;
