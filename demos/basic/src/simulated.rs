use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
    time::Duration,
};

use log::info;
use serde_json::Value;

use rollcall_shared::{
    Capture, FingerprintSensor, Indicator, MemoryRemote, Network, RemoteStore, SearchResult,
    SensorFault, StatusDisplay,
};

/// A sensor driven by the demo script. Placing a finger queues the captures
/// and search results the device will see next.
#[derive(Clone, Default)]
pub struct SimulatedSensor {
    captures: Rc<RefCell<VecDeque<Capture>>>,
    matches: Rc<RefCell<VecDeque<SearchResult>>>,
    templates: Rc<Cell<u16>>,
}

impl SimulatedSensor {
    pub fn place_finger(&self, template_id: u16) {
        self.captures.borrow_mut().push_back(Capture::Ok);
        self.matches
            .borrow_mut()
            .push_back(SearchResult::Match(template_id));
    }

    /// Place, lift and place a finger that is not yet enrolled
    pub fn enroll_finger(&self) {
        self.captures
            .borrow_mut()
            .extend([Capture::Ok, Capture::NoFingerPresent, Capture::Ok]);
    }
}

impl FingerprintSensor for SimulatedSensor {
    fn verify_password(&mut self) -> bool {
        true
    }

    fn template_count(&mut self) -> Option<u16> {
        Some(self.templates.get())
    }

    fn capture_image(&mut self) -> Capture {
        self.captures
            .borrow_mut()
            .pop_front()
            .unwrap_or(Capture::NoFingerPresent)
    }

    fn extract_features(&mut self, _slot: u8) -> Result<(), SensorFault> {
        Ok(())
    }

    fn search_all_templates(&mut self) -> SearchResult {
        SearchResult::NoMatch
    }

    fn fast_search(&mut self) -> SearchResult {
        self.matches
            .borrow_mut()
            .pop_front()
            .unwrap_or(SearchResult::NoMatch)
    }

    fn create_model(&mut self) -> Result<(), SensorFault> {
        Ok(())
    }

    fn store_model(&mut self, id: u16) -> Result<(), SensorFault> {
        self.templates.set(self.templates.get().max(id));
        Ok(())
    }
}

/// Writes the screen to the log
pub struct LogDisplay;

impl StatusDisplay for LogDisplay {
    fn show_status(&mut self, text: &str) {
        info!("[screen] {}", text.replace('\n', " | "));
    }

    fn show_progress(&mut self, percent: u8) {
        info!("[screen] progress {}%", percent);
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        if indicator != Indicator::Off {
            info!("[led] {:?}", indicator);
        }
    }
}

/// A link the demo script can cut
#[derive(Clone)]
pub struct SimulatedNetwork {
    up: Rc<Cell<bool>>,
}

impl SimulatedNetwork {
    pub fn new() -> Self {
        Self {
            up: Rc::new(Cell::new(true)),
        }
    }

    pub fn set_up(&self, up: bool) {
        self.up.set(up);
    }
}

impl Network for SimulatedNetwork {
    fn is_connected(&self) -> bool {
        self.up.get()
    }

    fn reconnect(&mut self, _timeout: Duration) -> bool {
        self.up.get()
    }
}

/// An in-process remote tree shared between the device and the demo's
/// stand-in for the web console
#[derive(Clone, Default)]
pub struct SharedRemote {
    tree: Rc<RefCell<MemoryRemote>>,
}

impl SharedRemote {
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(MemoryRemote::new())),
        }
    }

    /// Write a node the way the console would
    pub fn console_write(&self, path: &str, value: Value) {
        self.tree.borrow_mut().write_json(path, &value);
    }

    pub fn count_under(&self, prefix: &str) -> usize {
        self.tree.borrow().children(prefix).count()
    }
}

impl RemoteStore for SharedRemote {
    fn is_ready(&self) -> bool {
        self.tree.borrow().is_ready()
    }

    fn write_json(&mut self, path: &str, document: &Value) -> bool {
        self.tree.borrow_mut().write_json(path, document)
    }

    fn read_string(&mut self, path: &str) -> Option<String> {
        self.tree.borrow_mut().read_string(path)
    }

    fn read_json(&mut self, path: &str) -> Option<Value> {
        self.tree.borrow_mut().read_json(path)
    }

    fn delete_node(&mut self, path: &str) -> bool {
        self.tree.borrow_mut().delete_node(path)
    }
}
