//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (the key-value store the service writes to)

pub mod outbound;
