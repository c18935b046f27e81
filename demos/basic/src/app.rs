use log::{info, warn};
use serde_json::json;

use rollcall_device::{
    ConnectEvent, Device, DeviceConfig, DeviceError, DisconnectEvent, DrainEvent, EnrollEvent,
    ErrorEvent, NoMatchEvent, Peripherals, VerifyEvent,
};
use rollcall_shared::{FileStore, SystemClock};

use crate::simulated::{LogDisplay, SharedRemote, SimulatedNetwork, SimulatedSensor};

/// Length of one pass through the demo script, in ticks
const SCRIPT_LENGTH: u32 = 200;

pub struct App {
    device: Device,
    sensor: SimulatedSensor,
    network: SimulatedNetwork,
    remote: SharedRemote,
    tick_count: u32,
}

impl App {
    pub fn new(store: FileStore) -> Result<Self, DeviceError> {
        info!("Rollcall demo started, store image at {}", store.path().display());

        let sensor = SimulatedSensor::default();
        let network = SimulatedNetwork::new();
        let remote = SharedRemote::new();

        let peripherals = Peripherals {
            sensor: Box::new(sensor.clone()),
            display: Box::new(LogDisplay),
            remote: Box::new(remote.clone()),
            network: Box::new(network.clone()),
            clock: Box::new(SystemClock::new()),
        };
        let device = Device::boot(DeviceConfig::default(), peripherals, Box::new(store))?;

        Ok(Self {
            device,
            sensor,
            network,
            remote,
            tick_count: 0,
        })
    }

    pub fn update(&mut self) {
        self.play_script();

        let mut events = self.device.tick();
        self.tick_count = self.tick_count.wrapping_add(1);

        for _ in events.read::<ConnectEvent>() {
            info!("Link up");
        }
        for _ in events.read::<DisconnectEvent>() {
            info!("Link down");
        }
        for (id, outcome) in events.read::<VerifyEvent>() {
            info!("Attendance for {}: {:?}", id, outcome);
        }
        for _ in events.read::<NoMatchEvent>() {
            info!("Unrecognized finger");
        }
        for report in events.read::<DrainEvent>() {
            info!(
                "Drained {} events, {} left",
                report.delivered, report.remaining
            );
        }
        for result in events.read::<EnrollEvent>() {
            match result {
                Ok(identity) => info!(
                    "Enrolled {} as {}",
                    identity.display_name, identity.id
                ),
                Err(error) => warn!("Enrollment failed: {}", error),
            }
        }
        for error in events.read::<ErrorEvent>() {
            warn!("{}", error);
        }
    }

    /// Console requests, finger placements and an outage, on a loop
    fn play_script(&mut self) {
        let enrolled = self.device.state().roster().len();
        match self.tick_count % SCRIPT_LENGTH {
            20 if enrolled == 0 => {
                info!("Console requests enrollment");
                self.remote
                    .console_write("/enrollData", json!({"name": "Ana", "regNum": "R003"}));
                self.remote.console_write("/systemState", json!("ENROLL"));
                self.sensor.enroll_finger();
            }
            60 if enrolled > 0 => self.sensor.place_finger(1),
            80 => {
                info!("Cutting the link");
                self.network.set_up(false);
            }
            100 if enrolled > 0 => self.sensor.place_finger(1),
            140 => {
                info!("Restoring the link");
                self.network.set_up(true);
            }
            199 => info!(
                "{} attendance records in the remote store",
                self.remote.count_under("/attendance")
            ),
            _ => {}
        }
    }
}
