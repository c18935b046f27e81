use log::info;

use rollcall_shared::{ControlFlag, EnrollPayload};

/// What the device is currently doing with the sensor
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlState {
    Verify,
    /// Enrolling the person described by `payload`
    Enroll { payload: EnrollPayload },
}

impl ControlState {
    pub fn name(&self) -> &'static str {
        match self {
            ControlState::Verify => "VERIFY",
            ControlState::Enroll { .. } => "ENROLL",
        }
    }
}

/// Two-state machine driven by the remote control flag.
///
/// The flag is edge-triggered: enrollment is requested only when the flag is
/// seen changing to ENROLL while verifying. A flag left at ENROLL after an
/// enrollment never starts a second one.
pub struct ControlStateMachine {
    state: ControlState,
    last_flag: ControlFlag,
}

impl ControlStateMachine {
    pub fn new() -> Self {
        Self {
            state: ControlState::Verify,
            last_flag: ControlFlag::Verify,
        }
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn is_enrolling(&self) -> bool {
        matches!(self.state, ControlState::Enroll { .. })
    }

    /// Record the latest flag reading. Returns true on a VERIFY to ENROLL edge
    /// observed while verifying.
    pub fn observe_flag(&mut self, flag: ControlFlag) -> bool {
        let rising = flag == ControlFlag::Enroll
            && self.last_flag != ControlFlag::Enroll
            && !self.is_enrolling();
        self.last_flag = flag;
        rising
    }

    pub fn enter_enroll(&mut self, payload: EnrollPayload) {
        info!("Entering ENROLL for '{}'", payload.name);
        self.state = ControlState::Enroll { payload };
    }

    /// Leave ENROLL, handing back the payload it was entered with
    pub fn finish_enroll(&mut self) -> Option<EnrollPayload> {
        match std::mem::replace(&mut self.state, ControlState::Verify) {
            ControlState::Enroll { payload } => {
                info!("Returning to VERIFY");
                Some(payload)
            }
            ControlState::Verify => None,
        }
    }
}

impl Default for ControlStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
