use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use rollcall_shared::{Capture, FingerprintSensor, SearchResult, SensorFault};

struct SensorState {
    present: bool,
    captures: VecDeque<Capture>,
    fast_results: VecDeque<SearchResult>,
    full_results: VecDeque<SearchResult>,
    extract_faults: VecDeque<(u8, SensorFault)>,
    model_fault: Option<SensorFault>,
    stored: Vec<u16>,
}

/// Scripted fingerprint sensor. Captures with nothing scripted see no finger;
/// searches with nothing scripted find no match. Clones share state.
#[derive(Clone)]
pub struct FakeSensor {
    inner: Rc<RefCell<SensorState>>,
}

impl FakeSensor {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SensorState {
                present: true,
                captures: VecDeque::new(),
                fast_results: VecDeque::new(),
                full_results: VecDeque::new(),
                extract_faults: VecDeque::new(),
                model_fault: None,
                stored: Vec::new(),
            })),
        }
    }

    /// A sensor that fails the boot handshake
    pub fn missing() -> Self {
        let sensor = Self::new();
        sensor.inner.borrow_mut().present = false;
        sensor
    }

    /// A finger matching `template_id` is placed for one verification
    pub fn present_finger(&self, template_id: u16) {
        let mut inner = self.inner.borrow_mut();
        inner.captures.push_back(Capture::Ok);
        inner.fast_results.push_back(SearchResult::Match(template_id));
    }

    /// A finger that matches nothing is placed for one verification
    pub fn present_unknown_finger(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.captures.push_back(Capture::Ok);
        inner.fast_results.push_back(SearchResult::NoMatch);
    }

    /// A new finger is placed, lifted and placed again
    pub fn enroll_new_finger(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.captures.extend([Capture::Ok, Capture::NoFingerPresent, Capture::Ok]);
        inner.full_results.push_back(SearchResult::NoMatch);
    }

    /// The finger placed for enrollment already matches `template_id`
    pub fn enroll_known_finger(&self, template_id: u16) {
        let mut inner = self.inner.borrow_mut();
        inner.captures.push_back(Capture::Ok);
        inner.full_results.push_back(SearchResult::Match(template_id));
    }

    pub fn push_capture(&self, capture: Capture) {
        self.inner.borrow_mut().captures.push_back(capture);
    }

    pub fn fail_extract(&self, slot: u8, fault: SensorFault) {
        self.inner.borrow_mut().extract_faults.push_back((slot, fault));
    }

    pub fn fail_model(&self, fault: SensorFault) {
        self.inner.borrow_mut().model_fault = Some(fault);
    }

    /// Template ids stored by enrollment, in order
    pub fn stored_templates(&self) -> Vec<u16> {
        self.inner.borrow().stored.clone()
    }
}

impl Default for FakeSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintSensor for FakeSensor {
    fn verify_password(&mut self) -> bool {
        self.inner.borrow().present
    }

    fn template_count(&mut self) -> Option<u16> {
        u16::try_from(self.inner.borrow().stored.len()).ok()
    }

    fn capture_image(&mut self) -> Capture {
        self.inner
            .borrow_mut()
            .captures
            .pop_front()
            .unwrap_or(Capture::NoFingerPresent)
    }

    fn extract_features(&mut self, slot: u8) -> Result<(), SensorFault> {
        let mut inner = self.inner.borrow_mut();
        match inner.extract_faults.front() {
            Some((failing_slot, fault)) if *failing_slot == slot => {
                let fault = *fault;
                inner.extract_faults.pop_front();
                Err(fault)
            }
            _ => Ok(()),
        }
    }

    fn search_all_templates(&mut self) -> SearchResult {
        self.inner
            .borrow_mut()
            .full_results
            .pop_front()
            .unwrap_or(SearchResult::NoMatch)
    }

    fn fast_search(&mut self) -> SearchResult {
        self.inner
            .borrow_mut()
            .fast_results
            .pop_front()
            .unwrap_or(SearchResult::NoMatch)
    }

    fn create_model(&mut self) -> Result<(), SensorFault> {
        match self.inner.borrow_mut().model_fault.take() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn store_model(&mut self, id: u16) -> Result<(), SensorFault> {
        self.inner.borrow_mut().stored.push(id);
        Ok(())
    }
}
