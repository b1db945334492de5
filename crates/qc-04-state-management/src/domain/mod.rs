pub mod entities;
pub mod errors;
pub mod nibbles;
pub mod node;
pub mod reader;
pub mod state;
pub mod trie;

pub use entities::*;
pub use errors::*;
pub use nibbles::*;
pub use node::*;
pub use reader::*;
pub use state::*;
pub use trie::*;
