mod enrollment;
mod state_machine;

pub use enrollment::EnrollSession;
pub use state_machine::{ControlState, ControlStateMachine};
