pub mod codec;
pub mod dev;
pub mod errors;
pub mod slashing;
pub mod spec;

pub use codec::{decode_alloc, decode_storage_slot, encode_storage_slot};
pub use dev::{dev_genesis, DEV_ACCOUNT, DEV_GAS_LIMIT};
pub use errors::*;
pub use slashing::{SlashRecord, SlashRecords};
pub use spec::{Genesis, GenesisAccount, GenesisAlloc, GENESIS_EPOCH};
