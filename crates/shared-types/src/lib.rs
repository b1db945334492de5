//! # Shared Types Crate
//!
//! Types shared by every subsystem taking part in chain bootstrap.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: hashes, addresses, the block model and the
//!   chain configuration are defined once, here.
//! - **Canonical Encoding**: headers and bodies are RLP-encoded and hashed with
//!   Keccak-256; nothing else in the workspace re-implements that codec.
//! - **JSON Field Codecs**: hex and hex-or-decimal serde helpers live in
//!   [`codec`] so specification files decode the same way everywhere.

pub mod block;
pub mod codec;
pub mod entities;
pub mod errors;
pub mod params;

pub use block::*;
pub use entities::*;
pub use errors::*;
pub use params::*;
