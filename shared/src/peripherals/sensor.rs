use thiserror::Error;

/// Outcome of asking the sensor for an image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    Ok,
    NoFingerPresent,
    Error,
}

/// Outcome of a template search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchResult {
    Match(u16),
    NoMatch,
}

/// A sensor operation reported failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Fingerprint sensor reported failure code {code:#04x}")]
pub struct SensorFault {
    pub code: u8,
}

/// Fingerprint sensor driver. Matching thresholds, template storage and
/// anti-spoofing all live behind this boundary.
pub trait FingerprintSensor {
    /// Handshake with the sensor at boot; false means it is missing or miswired
    fn verify_password(&mut self) -> bool;

    fn template_count(&mut self) -> Option<u16>;

    fn capture_image(&mut self) -> Capture;

    /// Convert the last captured image into a feature set in `slot` (1 or 2)
    fn extract_features(&mut self, slot: u8) -> Result<(), SensorFault>;

    /// Exhaustive search of slot 1 against every stored template
    fn search_all_templates(&mut self) -> SearchResult;

    /// Quick search of slot 1, used for verification
    fn fast_search(&mut self) -> SearchResult;

    /// Merge slots 1 and 2 into a model
    fn create_model(&mut self) -> Result<(), SensorFault>;

    fn store_model(&mut self, id: u16) -> Result<(), SensorFault>;
}
