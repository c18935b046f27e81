mod identity;
mod roster_store;

pub use identity::Identity;
pub use roster_store::RosterStore;
