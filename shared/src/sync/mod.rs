mod delivery;
mod sync_driver;

pub use delivery::{Delivery, DrainReport, RecordOutcome};
pub use sync_driver::SyncDriver;
