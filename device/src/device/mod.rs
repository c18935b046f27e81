mod device;
mod device_config;
mod device_state;
mod peripherals;

pub use device::Device;
pub use device_config::DeviceConfig;
pub use device_state::DeviceState;
pub use peripherals::Peripherals;
