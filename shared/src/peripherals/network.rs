use std::time::Duration;

/// Link-layer connectivity (Wi-Fi or similar)
pub trait Network {
    fn is_connected(&self) -> bool;

    /// Attempt to reconnect, giving up after `timeout`. Returns whether the link is up.
    fn reconnect(&mut self, timeout: Duration) -> bool;
}
