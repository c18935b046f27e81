pub mod codec;
pub mod error;
pub mod layout;
pub mod memory_store;
pub mod persistent_store;
