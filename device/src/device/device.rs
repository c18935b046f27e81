use std::mem;

use log::{debug, info, warn};

use rollcall_shared::{
    control_flag_document, format_timestamp, heartbeat_document, AttendanceEvent, Capture,
    ControlFlag, Deadline, EnrollPayload, IdentityId, Indicator, Instant, NvCodec,
    PersistentStore, RecordOutcome, SearchResult, SyncDriver, Timer,
};

use super::{DeviceState, Peripherals};
use crate::{
    control::EnrollSession,
    events::{ErrorEvent, TickEvents},
    ControlState, DeviceConfig, DeviceError,
};

/// One timer per periodic activity. Fresh timers ring on the first tick.
struct Schedule {
    status: Timer,
    reconnect: Timer,
    heartbeat: Timer,
    drain: Timer,
    control_poll: Timer,
    verify: Timer,
}

impl Schedule {
    fn new(config: &DeviceConfig) -> Self {
        Self {
            status: Timer::new(config.status_refresh_interval),
            reconnect: Timer::new(config.reconnect_interval),
            heartbeat: Timer::new(config.heartbeat_interval),
            drain: Timer::new(config.drain_interval),
            control_poll: Timer::new(config.control_poll_interval),
            verify: Timer::new(config.verify_interval),
        }
    }
}

/// The attendance device: a cooperative, single-threaded scheduler that owns
/// every peripheral and all durable state
pub struct Device {
    config: DeviceConfig,
    peripherals: Peripherals,
    state: DeviceState,
    sync: SyncDriver,
    schedule: Schedule,
    booted_at: Instant,
    link_up: bool,
    indicator_until: Option<Deadline>,
    outgoing_events: TickEvents,
}

impl Device {
    /// Bring the device up: check the sensor, open storage and rebuild the
    /// roster and queue. A missing sensor or an undersized store is fatal.
    pub fn boot(
        config: DeviceConfig,
        mut peripherals: Peripherals,
        store: Box<dyn PersistentStore>,
    ) -> Result<Self, DeviceError> {
        peripherals.display.show_status("System Booting...");

        if !peripherals.sensor.verify_password() {
            warn!("Fingerprint sensor did not answer");
            peripherals.display.show_status("SENSOR NOT FOUND!");
            peripherals.display.set_indicator(Indicator::Red);
            return Err(DeviceError::HardwareFault);
        }
        match peripherals.sensor.template_count() {
            Some(count) => info!("Fingerprint sensor ready, {} templates stored", count),
            None => info!("Fingerprint sensor ready"),
        }

        let codec = NvCodec::open(store)?;
        if codec.formatted_on_open() {
            info!("Persistent store was blank or from another layout; formatted");
        }
        let (state, resets) = DeviceState::load(codec);
        info!(
            "Loaded {} identities and {} queued events",
            state.roster.len(),
            state.queue.len()
        );

        let mut outgoing_events = TickEvents::new();
        for reset in resets {
            outgoing_events.push_error(reset);
        }

        let booted_at = peripherals.clock.now();
        let link_up = peripherals.network.is_connected();

        Ok(Self {
            sync: SyncDriver::new(config.paths.clone()),
            schedule: Schedule::new(&config),
            config,
            peripherals,
            state,
            booted_at,
            link_up,
            indicator_until: None,
            outgoing_events,
        })
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Whether the network link was up at the last check
    pub fn is_link_up(&self) -> bool {
        self.link_up
    }

    /// Run the scheduler forever
    pub fn run(&mut self) -> ! {
        loop {
            let mut events = self.tick();
            for error in events.read::<ErrorEvent>() {
                warn!("{}", error);
            }
        }
    }

    /// Must be called regularly. Runs every due activity once, in order,
    /// then pauses for `tick_delay`. Returns what happened.
    pub fn tick(&mut self) -> TickEvents {
        let now = self.peripherals.clock.now();

        self.expire_indicator(&now);
        if self.schedule.status.try_ring(&now) && self.indicator_until.is_none() {
            self.refresh_status();
        }
        self.maintain_link(&now);
        self.send_heartbeat(&now);
        self.drain_queue(&now);
        self.poll_control(&now);

        if self.state.control.is_enrolling() {
            self.run_enrollment();
        } else if self.schedule.verify.try_ring(&now) {
            self.verify(&now);
        }

        self.peripherals.clock.sleep(self.config.tick_delay);

        mem::replace(&mut self.outgoing_events, TickEvents::new())
    }

    // Status

    fn refresh_status(&mut self) {
        let text = format!(
            "Mode: {}\nWiFi: {}\nQueued: {}",
            self.state.control.state().name(),
            if self.link_up { "OK" } else { "OFFLINE" },
            self.state.queue.len()
        );
        self.peripherals.display.show_status(&text);
    }

    fn show_indicator(&mut self, indicator: Indicator, now: &Instant) {
        self.peripherals.display.set_indicator(indicator);
        self.indicator_until = Some(Deadline::after(now, self.config.indicator_hold));
    }

    fn expire_indicator(&mut self, now: &Instant) {
        let expired = self
            .indicator_until
            .as_ref()
            .is_some_and(|deadline| deadline.expired(now));
        if expired {
            self.indicator_until = None;
            self.peripherals.display.set_indicator(Indicator::Off);
            self.refresh_status();
        }
    }

    fn timestamp(&self) -> String {
        format_timestamp(self.peripherals.clock.now_local())
    }

    // Connectivity

    fn remote_reachable(&self) -> bool {
        self.peripherals.network.is_connected() && self.peripherals.remote.is_ready()
    }

    fn maintain_link(&mut self, now: &Instant) {
        if self.peripherals.network.is_connected() {
            if !self.link_up {
                info!("Network link up");
                self.link_up = true;
                self.outgoing_events.push_connect();
            }
            return;
        }

        if self.link_up {
            warn!("Network link lost");
            self.link_up = false;
            self.outgoing_events.push_disconnect();
        }

        if self.schedule.reconnect.try_ring(now) {
            debug!("Attempting reconnect");
            if self
                .peripherals
                .network
                .reconnect(self.config.reconnect_timeout)
            {
                info!("Network link up");
                self.link_up = true;
                self.outgoing_events.push_connect();
            }
        }
    }

    /// A heartbeat that comes due while offline is sent as soon as the
    /// remote store is reachable again
    fn send_heartbeat(&mut self, now: &Instant) {
        if !self.schedule.heartbeat.ringing(now) || !self.remote_reachable() {
            return;
        }
        self.schedule.heartbeat.reset(now);

        let uptime = now.duration_since(&self.booted_at).as_millis();
        let document = heartbeat_document(
            u64::try_from(uptime).unwrap_or(u64::MAX),
            self.state.queue.len(),
            self.state.control.state().name(),
            &self.timestamp(),
        );
        if self
            .peripherals
            .remote
            .write_json(&self.config.paths.heartbeat, &document)
        {
            self.outgoing_events.push_heartbeat();
        } else {
            debug!("Heartbeat write failed");
        }
    }

    fn drain_queue(&mut self, now: &Instant) {
        if self.state.queue.is_empty() || !self.peripherals.network.is_connected() {
            return;
        }
        if !self.schedule.drain.try_ring(now) {
            return;
        }

        let report = self.sync.drain(
            self.peripherals.remote.as_mut(),
            self.peripherals.network.as_ref(),
            &mut self.state.queue,
            &mut self.state.codec,
        );
        self.outgoing_events.push_drain(report);
    }

    // Control

    fn poll_control(&mut self, now: &Instant) {
        if self.state.control.is_enrolling() || !self.remote_reachable() {
            return;
        }
        if !self.schedule.control_poll.try_ring(now) {
            return;
        }

        // an unreadable flag is no observation; the edge detector keeps its last reading
        let Some(raw) = self
            .peripherals
            .remote
            .read_string(&self.config.paths.control_flag)
        else {
            debug!("Control flag unreadable");
            return;
        };
        if !self.state.control.observe_flag(ControlFlag::parse(&raw)) {
            return;
        }

        info!("Enrollment requested");
        match self.fetch_enroll_payload() {
            Ok(payload) => {
                self.outgoing_events.push_enroll_request(payload.clone());
                self.state.control.enter_enroll(payload);
            }
            Err(error) => {
                warn!("{}", error);
                self.peripherals
                    .display
                    .show_status("Enroll fail: no details");
                self.show_indicator(Indicator::Red, now);
                self.reset_remote_control();
                self.outgoing_events.push_enrollment(Err(error));
            }
        }
    }

    fn fetch_enroll_payload(&mut self) -> Result<EnrollPayload, DeviceError> {
        let path = &self.config.paths.enroll_payload;
        let missing = || DeviceError::MissingEnrollPayload { path: path.clone() };

        let document = self
            .peripherals
            .remote
            .read_json(path)
            .ok_or_else(missing)?;
        EnrollPayload::from_json(document).map_err(|error| {
            debug!("Malformed enrollment details: {}", error);
            missing()
        })
    }

    /// Put the remote flag back to VERIFY and clear the enrollment details
    fn reset_remote_control(&mut self) {
        if !self.remote_reachable() {
            warn!("Offline; remote control flag left as is");
            self.outgoing_events.push_error(DeviceError::RemoteUnreachable);
            return;
        }
        let paths = &self.config.paths;
        let remote = &mut self.peripherals.remote;
        if !remote.write_json(
            &paths.control_flag,
            &control_flag_document(ControlFlag::Verify),
        ) {
            warn!("Could not reset {}", paths.control_flag);
        }
        if !remote.delete_node(&paths.enroll_payload) {
            debug!("Could not delete {}", paths.enroll_payload);
        }
    }

    fn run_enrollment(&mut self) {
        let ControlState::Enroll { payload } = self.state.control.state().clone() else {
            return;
        };

        let result = {
            let Peripherals {
                sensor,
                display,
                remote,
                network,
                clock,
            } = &mut self.peripherals;
            let mut session = EnrollSession::new(
                sensor.as_mut(),
                display.as_mut(),
                clock.as_mut(),
                remote.as_mut(),
                network.as_ref(),
                &self.config,
            );
            session.run(&mut self.state.roster, &mut self.state.codec, &payload)
        };

        let now = self.peripherals.clock.now();
        match &result {
            Ok(identity) => {
                info!(
                    "Enrolled id {} as '{}'",
                    identity.id,
                    identity.display_name.as_str()
                );
                self.show_indicator(Indicator::Green, &now);
            }
            Err(error) => {
                warn!("Enrollment failed: {}", error);
                self.show_indicator(Indicator::Red, &now);
            }
        }

        self.state.control.finish_enroll();
        self.reset_remote_control();
        self.schedule.verify.reset(&now);
        self.outgoing_events.push_enrollment(result);
    }

    // Verification

    fn verify(&mut self, now: &Instant) {
        match self.peripherals.sensor.capture_image() {
            Capture::NoFingerPresent => return,
            Capture::Error => {
                debug!("Capture error while verifying");
                self.peripherals.display.show_status("Sensor error");
                self.show_indicator(Indicator::Red, now);
                self.outgoing_events.push_error(DeviceError::CaptureError {
                    stage: "verification capture",
                });
                return;
            }
            Capture::Ok => {}
        }

        if let Err(fault) = self.peripherals.sensor.extract_features(1) {
            debug!("Image conversion failed: {}", fault);
            self.peripherals.display.show_status("Image fail");
            self.show_indicator(Indicator::Red, now);
            self.outgoing_events.push_error(DeviceError::CaptureError {
                stage: "verification image conversion",
            });
            return;
        }

        let template_id = match self.peripherals.sensor.fast_search() {
            SearchResult::Match(template_id) => template_id,
            SearchResult::NoMatch => {
                self.reject_finger(now);
                return;
            }
        };
        let Ok(identity_id) = IdentityId::try_from(template_id) else {
            warn!("Template {} has no roster id", template_id);
            self.reject_finger(now);
            return;
        };

        // uptime wraps after about 49 days
        let event = AttendanceEvent::for_identity(
            identity_id,
            self.state.roster.get(identity_id),
            &self.timestamp(),
            now.millis() as u32,
        );
        let name = event.display_name.as_str().to_string();
        info!("Recognized id {} ('{}')", identity_id, name);

        let outcome = self.sync.record(
            self.peripherals.remote.as_mut(),
            self.peripherals.network.as_ref(),
            &mut self.state.queue,
            &mut self.state.codec,
            event,
        );

        let detail = match &outcome {
            RecordOutcome::Delivered => {
                self.show_indicator(Indicator::Green, now);
                "Attendance logged".to_string()
            }
            RecordOutcome::Queued { .. } => {
                self.show_indicator(Indicator::Green, now);
                format!("Saved offline ({})", self.state.queue.len())
            }
            RecordOutcome::Dropped(full) => {
                self.show_indicator(Indicator::Red, now);
                self.outgoing_events.push_error(full.clone().into());
                "Storage full!".to_string()
            }
        };
        self.peripherals
            .display
            .show_status(&format!("Welcome: {}\n{}", name, detail));
        self.outgoing_events.push_verification(identity_id, outcome);
    }

    fn reject_finger(&mut self, now: &Instant) {
        info!("No match");
        self.peripherals.display.show_status("No Match!");
        self.show_indicator(Indicator::Red, now);
        self.outgoing_events.push_no_match();
    }
}
