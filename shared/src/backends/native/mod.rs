mod file_store;
mod system_clock;

pub use file_store::FileStore;
pub use system_clock::SystemClock;
