mod tick_events;

pub use tick_events::{
    ConnectEvent, DisconnectEvent, DrainEvent, EnrollEvent, EnrollRequestEvent, ErrorEvent,
    HeartbeatEvent, NoMatchEvent, TickEventType, TickEvents, VerifyEvent,
};
