//! # Genesis Services
//!
//! ```text
//! Genesis ──→ materialize ──→ state root ─┐
//!    │                                    ↓
//!    └──→ encode_wrapper ──────→ assemble_header ──→ Block
//!                                                     │
//!                   BlockCommitter / ChainBootstrapper ↓
//!                                               KeyValueStore
//! ```

pub mod assembler;
pub mod bootstrap;
pub mod committer;
pub mod materializer;

pub use assembler::assemble_header;
pub use bootstrap::{resolve_chain_config, ChainBootstrapper};
pub use committer::BlockCommitter;
pub use materializer::materialize;
