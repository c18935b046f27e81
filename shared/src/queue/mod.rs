mod attendance_event;
mod offline_queue;

pub use attendance_event::AttendanceEvent;
pub use offline_queue::OfflineQueue;
