use rollcall_shared::{Clock, FingerprintSensor, Network, RemoteStore, StatusDisplay};

/// The hardware and services the device drives
pub struct Peripherals {
    pub sensor: Box<dyn FingerprintSensor>,
    pub display: Box<dyn StatusDisplay>,
    pub remote: Box<dyn RemoteStore>,
    pub network: Box<dyn Network>,
    pub clock: Box<dyn Clock>,
}
