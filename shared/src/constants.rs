/// Largest number of identities the roster holds
pub const MAX_IDENTITIES: usize = 50;
/// Largest number of attendance events held while the remote store is unreachable
pub const QUEUE_CAPACITY: usize = 30;

/// On-disk width of a display name, terminator included
pub const NAME_WIDTH: usize = 24;
/// On-disk width of a registration number, terminator included
pub const REG_NUMBER_WIDTH: usize = 16;
/// On-disk width of a timestamp: "YYYY-MM-DD HH:MM:SS" plus terminator
pub const TIMESTAMP_WIDTH: usize = 20;

/// Total size of the emulated EEPROM the layout must fit into
pub const STORE_SIZE: usize = 4096;

/// Timestamp recorded when the wall clock has not been set
pub const UNKNOWN_TIMESTAMP: &str = "unknown";
/// Display name used for a verified template that is not on the local roster
pub const UNKNOWN_NAME: &str = "Unknown";
