use std::{mem, vec::IntoIter};

use rollcall_shared::{DrainReport, EnrollPayload, Identity, IdentityId, RecordOutcome};

use crate::DeviceError;

/// Everything that happened during one scheduler tick
#[derive(Debug, Default)]
pub struct TickEvents {
    connects: Vec<()>,
    disconnects: Vec<()>,
    heartbeats: Vec<()>,
    drains: Vec<DrainReport>,
    verifications: Vec<(IdentityId, RecordOutcome)>,
    no_matches: Vec<()>,
    enroll_requests: Vec<EnrollPayload>,
    enrollments: Vec<Result<Identity, DeviceError>>,
    errors: Vec<DeviceError>,
    empty: bool,
}

impl TickEvents {
    pub(crate) fn new() -> Self {
        Self {
            empty: true,
            ..Default::default()
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: TickEventType>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: TickEventType>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_connect(&mut self) {
        self.connects.push(());
        self.empty = false;
    }

    pub(crate) fn push_disconnect(&mut self) {
        self.disconnects.push(());
        self.empty = false;
    }

    pub(crate) fn push_heartbeat(&mut self) {
        self.heartbeats.push(());
        self.empty = false;
    }

    pub(crate) fn push_drain(&mut self, report: DrainReport) {
        self.drains.push(report);
        self.empty = false;
    }

    pub(crate) fn push_verification(&mut self, identity_id: IdentityId, outcome: RecordOutcome) {
        self.verifications.push((identity_id, outcome));
        self.empty = false;
    }

    pub(crate) fn push_no_match(&mut self) {
        self.no_matches.push(());
        self.empty = false;
    }

    pub(crate) fn push_enroll_request(&mut self, payload: EnrollPayload) {
        self.enroll_requests.push(payload);
        self.empty = false;
    }

    pub(crate) fn push_enrollment(&mut self, result: Result<Identity, DeviceError>) {
        self.enrollments.push(result);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: DeviceError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait TickEventType {
    type Iter;

    fn iter(events: &mut TickEvents) -> Self::Iter;

    fn has(events: &TickEvents) -> bool;
}

fn take_all<T>(list: &mut Vec<T>) -> IntoIter<T> {
    IntoIterator::into_iter(mem::take(list))
}

/// The network link came up
pub struct ConnectEvent;
impl TickEventType for ConnectEvent {
    type Iter = IntoIter<()>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.connects)
    }

    fn has(events: &TickEvents) -> bool {
        !events.connects.is_empty()
    }
}

/// The network link went down
pub struct DisconnectEvent;
impl TickEventType for DisconnectEvent {
    type Iter = IntoIter<()>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.disconnects)
    }

    fn has(events: &TickEvents) -> bool {
        !events.disconnects.is_empty()
    }
}

/// A heartbeat was written
pub struct HeartbeatEvent;
impl TickEventType for HeartbeatEvent {
    type Iter = IntoIter<()>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.heartbeats)
    }

    fn has(events: &TickEvents) -> bool {
        !events.heartbeats.is_empty()
    }
}

/// An offline queue drain pass ran
pub struct DrainEvent;
impl TickEventType for DrainEvent {
    type Iter = IntoIter<DrainReport>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.drains)
    }

    fn has(events: &TickEvents) -> bool {
        !events.drains.is_empty()
    }
}

/// A finger matched a stored template
pub struct VerifyEvent;
impl TickEventType for VerifyEvent {
    type Iter = IntoIter<(IdentityId, RecordOutcome)>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.verifications)
    }

    fn has(events: &TickEvents) -> bool {
        !events.verifications.is_empty()
    }
}

/// A finger was read but matched nothing
pub struct NoMatchEvent;
impl TickEventType for NoMatchEvent {
    type Iter = IntoIter<()>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.no_matches)
    }

    fn has(events: &TickEvents) -> bool {
        !events.no_matches.is_empty()
    }
}

/// The remote control flag rose to ENROLL and its details were fetched
pub struct EnrollRequestEvent;
impl TickEventType for EnrollRequestEvent {
    type Iter = IntoIter<EnrollPayload>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.enroll_requests)
    }

    fn has(events: &TickEvents) -> bool {
        !events.enroll_requests.is_empty()
    }
}

/// An enrollment attempt finished
pub struct EnrollEvent;
impl TickEventType for EnrollEvent {
    type Iter = IntoIter<Result<Identity, DeviceError>>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.enrollments)
    }

    fn has(events: &TickEvents) -> bool {
        !events.enrollments.is_empty()
    }
}

/// A non-fatal error outside of enrollment
pub struct ErrorEvent;
impl TickEventType for ErrorEvent {
    type Iter = IntoIter<DeviceError>;

    fn iter(events: &mut TickEvents) -> Self::Iter {
        take_all(&mut events.errors)
    }

    fn has(events: &TickEvents) -> bool {
        !events.errors.is_empty()
    }
}
