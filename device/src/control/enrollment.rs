use log::{debug, info, warn};

use rollcall_shared::{
    identity_document, status_message_document, Capture, Clock, Deadline, EnrollPayload,
    FingerprintSensor, Identity, Indicator, Network, NvCodec, RemotePaths, RemoteStore,
    RosterStore, SearchResult, StatusDisplay, StorageFull, StoreRegion, MAX_IDENTITIES,
};

use crate::{DeviceConfig, DeviceError};

/// One blocking enrollment run. Every wait is bounded by
/// `DeviceConfig::enroll_timeout`, so a walk-away operator cannot wedge the
/// device. Progress lines go to the display and, while the link is up, to the
/// remote message log the console watches.
pub struct EnrollSession<'a> {
    sensor: &'a mut dyn FingerprintSensor,
    display: &'a mut dyn StatusDisplay,
    clock: &'a mut dyn Clock,
    remote: &'a mut dyn RemoteStore,
    network: &'a dyn Network,
    paths: &'a RemotePaths,
    config: &'a DeviceConfig,
    next_message: u32,
}

impl<'a> EnrollSession<'a> {
    pub fn new(
        sensor: &'a mut dyn FingerprintSensor,
        display: &'a mut dyn StatusDisplay,
        clock: &'a mut dyn Clock,
        remote: &'a mut dyn RemoteStore,
        network: &'a dyn Network,
        config: &'a DeviceConfig,
    ) -> Self {
        Self {
            sensor,
            display,
            clock,
            remote,
            network,
            paths: &config.paths,
            config,
            next_message: 0,
        }
    }

    /// Capture a new finger and add it to the roster under the next id.
    /// Nothing is written to the roster unless the sensor stored the template.
    pub fn run(
        &mut self,
        roster: &mut RosterStore,
        codec: &mut NvCodec,
        payload: &EnrollPayload,
    ) -> Result<Identity, DeviceError> {
        self.clear_messages();

        if roster.is_full() {
            self.fail("Enroll fail: roster full");
            return Err(StorageFull {
                region: StoreRegion::Roster,
                capacity: MAX_IDENTITIES,
            }
            .into());
        }
        let id = roster.next_id();
        info!("Enrolling id {} ('{}')", id, payload.name);

        // First placement
        self.display.show_progress(0);
        self.report("Place finger...");
        self.wait_for_finger("first finger placement")?;
        if let Err(fault) = self.sensor.extract_features(1) {
            debug!("First image conversion failed: {}", fault);
            self.fail("Image fail");
            return Err(DeviceError::CaptureError {
                stage: "first image conversion",
            });
        }
        if let SearchResult::Match(template_id) = self.sensor.search_all_templates() {
            self.fail("Enroll fail: already enrolled");
            return Err(DeviceError::DuplicateEnrollment { template_id });
        }
        self.display.show_progress(25);

        // Lift
        self.report("Remove finger");
        self.clock.sleep(self.config.remove_finger_delay);
        self.wait_for_removal()?;
        self.display.show_progress(50);

        // Second placement
        self.report("Place same finger...");
        self.wait_for_finger("second finger placement")?;
        if let Err(fault) = self.sensor.extract_features(2) {
            debug!("Second image conversion failed: {}", fault);
            self.fail("Image 2 fail");
            return Err(DeviceError::CaptureError {
                stage: "second image conversion",
            });
        }
        self.display.show_progress(75);

        if let Err(fault) = self.sensor.create_model() {
            self.fail("Model fail: fingers did not match");
            return Err(DeviceError::SensorFault {
                stage: "create model",
                fault,
            });
        }
        if let Err(fault) = self.sensor.store_model(u16::from(id)) {
            self.fail("Store fail");
            return Err(DeviceError::SensorFault {
                stage: "store model",
                fault,
            });
        }

        let name = if payload.name.is_empty() {
            format!("Student_{}", id)
        } else {
            payload.name.clone()
        };
        let identity = roster.append(&name, &payload.registration_number)?;
        if let Err(error) = roster.persist(codec) {
            warn!("Roster persist failed after enrolling {}: {}", id, error);
        }

        self.display.show_progress(100);
        self.display.set_indicator(Indicator::Green);
        self.report(&format!("Enroll Success: {}", identity.display_name.as_str()));
        self.upload_identity(&identity);

        Ok(identity)
    }

    fn link_up(&self) -> bool {
        self.network.is_connected() && self.remote.is_ready()
    }

    /// Show `text` and append it to the remote message log
    fn report(&mut self, text: &str) {
        info!("Enroll: {}", text);
        self.display.show_status(text);
        if !self.link_up() {
            return;
        }
        let path = self.paths.message_path(self.next_message);
        if self.remote.write_json(&path, &status_message_document(text)) {
            self.next_message += 1;
        } else {
            debug!("Could not post enrollment message to {}", path);
        }
    }

    fn fail(&mut self, text: &str) {
        self.display.set_indicator(Indicator::Red);
        self.report(text);
    }

    fn clear_messages(&mut self) {
        if self.link_up() && !self.remote.delete_node(&self.paths.messages) {
            debug!("Could not clear {}", self.paths.messages);
        }
        self.next_message = 0;
    }

    fn upload_identity(&mut self, identity: &Identity) {
        if !self.link_up() {
            info!("Offline; identity {} not uploaded", identity.id);
            return;
        }
        let path = self.paths.identity_path(identity.id);
        if !self.remote.write_json(&path, &identity_document(identity)) {
            warn!("Identity upload to {} failed", path);
        }
    }

    /// Poll until a finger image is captured. Capture errors are retried
    /// until the deadline passes.
    fn wait_for_finger(&mut self, waiting_for: &'static str) -> Result<(), DeviceError> {
        let deadline = Deadline::after(&self.clock.now(), self.config.enroll_timeout);
        loop {
            match self.sensor.capture_image() {
                Capture::Ok => return Ok(()),
                Capture::NoFingerPresent => {}
                Capture::Error => debug!("Capture error while waiting for {}", waiting_for),
            }
            if deadline.expired(&self.clock.now()) {
                self.fail("Enroll fail: timeout");
                return Err(DeviceError::EnrollTimeout { waiting_for });
            }
            self.clock.sleep(self.config.finger_poll_delay);
        }
    }

    fn wait_for_removal(&mut self) -> Result<(), DeviceError> {
        let deadline = Deadline::after(&self.clock.now(), self.config.enroll_timeout);
        while self.sensor.capture_image() != Capture::NoFingerPresent {
            if deadline.expired(&self.clock.now()) {
                self.fail("Enroll fail: timeout");
                return Err(DeviceError::EnrollTimeout {
                    waiting_for: "finger removal",
                });
            }
            self.clock.sleep(self.config.finger_poll_delay);
        }
        Ok(())
    }
}
