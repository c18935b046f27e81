use std::{default::Default, time::Duration};

use rollcall_shared::RemotePaths;

/// Contains Config properties which will be used by the Device
#[derive(Clone, Debug)]
pub struct DeviceConfig {
    /// How often the idle screen is redrawn
    pub status_refresh_interval: Duration,
    /// How long to wait between reconnect attempts while the link is down
    pub reconnect_interval: Duration,
    /// Upper bound on a single reconnect attempt
    pub reconnect_timeout: Duration,
    pub heartbeat_interval: Duration,
    /// How often a drain pass is attempted while events are queued
    pub drain_interval: Duration,
    /// How often the remote control flag is read
    pub control_poll_interval: Duration,
    /// How often the sensor is polled for a finger in VERIFY
    pub verify_interval: Duration,
    /// Pause at the end of every tick
    pub tick_delay: Duration,
    /// How long a success or failure indicator stays lit
    pub indicator_hold: Duration,
    /// How long enrollment waits for each finger placement or removal
    pub enroll_timeout: Duration,
    /// Pause between sensor polls while waiting on a finger during enrollment
    pub finger_poll_delay: Duration,
    /// Pause after asking the operator to lift their finger
    pub remove_finger_delay: Duration,
    /// Where documents live in the remote tree
    pub paths: RemotePaths,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            status_refresh_interval: Duration::from_secs(1),
            reconnect_interval: Duration::from_secs(5),
            reconnect_timeout: Duration::from_secs(2),
            heartbeat_interval: Duration::from_secs(60),
            drain_interval: Duration::from_secs(10),
            control_poll_interval: Duration::from_secs(1),
            verify_interval: Duration::from_millis(250),
            tick_delay: Duration::from_millis(50),
            indicator_hold: Duration::from_millis(1500),
            enroll_timeout: Duration::from_secs(20),
            finger_poll_delay: Duration::from_millis(50),
            remove_finger_delay: Duration::from_secs(2),
            paths: RemotePaths::default(),
        }
    }
}
