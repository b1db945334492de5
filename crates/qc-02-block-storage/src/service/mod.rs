//! # Block Storage Service
//!
//! - `writer` - [`ChainBatch`], the staged set of chain records committed in
//!   one atomic write
//! - `accessors` - typed reads of the records the writer produces

mod accessors;
mod writer;
#[cfg(test)]
mod tests;

pub use accessors::*;
pub use writer::ChainBatch;
