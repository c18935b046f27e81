mod display;
mod network;
mod sensor;

pub use display::{Indicator, StatusDisplay};
pub use network::Network;
pub use sensor::{Capture, FingerprintSensor, SearchResult, SensorFault};
