//! # Domain Layer
//!
//! - `schema` - Key layout of every chain record
//! - `errors` - Domain error types

pub mod errors;
pub mod schema;
