/// Integration tests for the VERIFY path: recognition, write-through to the
/// remote store and fallback to the offline queue

use serde_json::json;

use rollcall_device::{DeviceError, ErrorEvent, NoMatchEvent, VerifyEvent};
use rollcall_shared::{
    AttendanceEvent, Delivery, Indicator, MemoryStore, NvCodec, OfflineQueue, RecordOutcome,
    StorageFull, StoreRegion, QUEUE_CAPACITY,
};
use rollcall_test::{ManualClock, StoreImage, TestRig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn three_students() -> Vec<u8> {
    StoreImage::new()
        .with_identities(&[("Ben", "R001"), ("Cai", "R002"), ("Ana", "R003")])
        .bytes()
}

#[test]
fn recognized_finger_is_written_through() {
    init_logging();
    let rig = TestRig::new();
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_finger(3);

    let mut events = device.tick();

    let verified: Vec<_> = events.read::<VerifyEvent>().collect();
    assert_eq!(verified, vec![(3, RecordOutcome::Delivered)]);
    let writes = rig.remote.writes_under("/attendance");
    assert_eq!(writes.len(), 1);
    assert!(writes[0].0.starts_with("/attendance/3_2024-05-01_08_30_00_"));
    assert_eq!(
        writes[0].1,
        json!({
            "id": 3,
            "name": "Ana",
            "regNum": "R003",
            "timestamp": "2024-05-01 08:30:00"
        })
    );
    assert!(device.state().queue().is_empty());
    assert_eq!(rig.display.indicator(), Indicator::Green);
    assert!(rig.display.showed("Welcome: Ana"));
}

#[test]
fn offline_verification_is_queued_without_remote_writes() {
    init_logging();
    let rig = TestRig::offline();
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_finger(3);

    let mut events = device.tick();

    let verified: Vec<_> = events.read::<VerifyEvent>().collect();
    assert_eq!(
        verified,
        vec![(
            3,
            RecordOutcome::Queued {
                cause: Delivery::Unreachable
            }
        )]
    );
    assert_eq!(rig.remote.write_attempts(), 0);

    let queued: Vec<_> = device.state().queue().iter().cloned().collect();
    assert_eq!(queued.len(), 1);
    let expected = AttendanceEvent::new(3, "Ana", "R003", "2024-05-01 08:30:00");
    assert_eq!(queued[0], expected.with_uptime(queued[0].uptime_millis));

    let image = device.state().codec().store().snapshot();
    let reopened = NvCodec::open(Box::new(MemoryStore::from_bytes(image))).unwrap();
    assert_eq!(OfflineQueue::load(&reopened).len(), 1);
}

#[test]
fn remote_not_ready_counts_as_unreachable() {
    let rig = TestRig::new();
    rig.remote.set_ready(false);
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_finger(1);

    let mut events = device.tick();

    let verified: Vec<_> = events.read::<VerifyEvent>().collect();
    assert_eq!(
        verified,
        vec![(
            1,
            RecordOutcome::Queued {
                cause: Delivery::Unreachable
            }
        )]
    );
    assert_eq!(rig.remote.write_attempts(), 0);
}

#[test]
fn failed_write_is_queued() {
    let rig = TestRig::new();
    rig.remote.script_writes("/attendance", vec![false]);
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_finger(2);

    let mut events = device.tick();

    let verified: Vec<_> = events.read::<VerifyEvent>().collect();
    assert_eq!(
        verified,
        vec![(
            2,
            RecordOutcome::Queued {
                cause: Delivery::Rejected
            }
        )]
    );
    assert_eq!(device.state().queue().len(), 1);
}

#[test]
fn full_queue_drops_new_event() {
    init_logging();
    let rig = TestRig::offline();
    let backlog = (0..QUEUE_CAPACITY)
        .map(|i| AttendanceEvent::new(1, "Ben", "R001", &format!("2024-05-01 07:00:{:02}", i)));
    let image = StoreImage::new()
        .with_identities(&[("Ben", "R001"), ("Cai", "R002"), ("Ana", "R003")])
        .with_queued(backlog)
        .bytes();
    let mut device = rig.boot_from(image).unwrap();
    let before: Vec<_> = device.state().queue().iter().cloned().collect();
    rig.sensor.present_finger(3);

    let mut events = device.tick();

    let full = StorageFull {
        region: StoreRegion::Queue,
        capacity: QUEUE_CAPACITY,
    };
    let verified: Vec<_> = events.read::<VerifyEvent>().collect();
    assert_eq!(verified, vec![(3, RecordOutcome::Dropped(full.clone()))]);
    let errors: Vec<_> = events.read::<ErrorEvent>().collect();
    assert_eq!(errors, vec![DeviceError::StorageFull(full)]);

    let after: Vec<_> = device.state().queue().iter().cloned().collect();
    assert_eq!(after, before);
    assert_eq!(rig.display.indicator(), Indicator::Red);
}

#[test]
fn unmatched_finger_records_nothing() {
    let rig = TestRig::new();
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_unknown_finger();

    let mut events = device.tick();

    assert!(events.has::<NoMatchEvent>());
    assert!(!events.has::<VerifyEvent>());
    assert!(rig.remote.writes_under("/attendance").is_empty());
    assert!(rig.display.showed("No Match!"));
    assert_eq!(rig.display.indicator(), Indicator::Red);
}

#[test]
fn template_missing_from_roster_is_recorded_as_unknown() {
    let rig = TestRig::new();
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_finger(7);

    device.tick();

    let writes = rig.remote.writes_under("/attendance");
    assert_eq!(writes.len(), 1);
    assert!(writes[0].0.starts_with("/attendance/7_2024-05-01_08_30_00_"));
    assert_eq!(
        writes[0].1,
        json!({
            "id": 7,
            "name": "Unknown",
            "regNum": "",
            "timestamp": "2024-05-01 08:30:00"
        })
    );
}

#[test]
fn unsynchronized_clock_uses_unknown_timestamp() {
    let rig = TestRig {
        clock: ManualClock::unsynchronized(),
        ..TestRig::new()
    };
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_finger(1);

    device.tick();

    let writes = rig.remote.writes_under("/attendance");
    assert_eq!(writes.len(), 1);
    assert!(writes[0].0.starts_with("/attendance/1_unknown_"));
    assert_eq!(writes[0].1["timestamp"], json!("unknown"));
}

#[test]
fn indicator_clears_after_hold() {
    let rig = TestRig::new();
    let mut device = rig.boot_from(three_students()).unwrap();
    rig.sensor.present_finger(1);
    device.tick();
    assert_eq!(rig.display.indicator(), Indicator::Green);

    // 1500ms hold at 50ms per tick
    rig.tick_n(&mut device, 31);

    assert_eq!(rig.display.indicator(), Indicator::Off);
}
