/// Steady state of the two status LEDs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    Off,
    /// success
    Green,
    /// failure or mismatch
    Red,
}

/// Fire-and-forget status output: a small screen plus LEDs
pub trait StatusDisplay {
    fn show_status(&mut self, text: &str);

    fn show_progress(&mut self, percent: u8);

    fn set_indicator(&mut self, indicator: Indicator);
}
