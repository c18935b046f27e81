/// Integration tests for the periodic activities: reconnects, heartbeats and
/// draining the offline queue once the link returns

use std::time::Duration;

use proptest::prelude::*;
use serde_json::json;

use rollcall_device::{ConnectEvent, DeviceConfig, DisconnectEvent, DrainEvent, HeartbeatEvent};
use rollcall_shared::{AttendanceEvent, Delivery, DrainReport};
use rollcall_test::{test_config, ManualClock, StoreImage, TestRig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn three_students() -> StoreImage {
    StoreImage::new().with_identities(&[("Ben", "R001"), ("Cai", "R002"), ("Ana", "R003")])
}

fn attendance_ids(rig: &TestRig) -> Vec<u64> {
    rig.remote
        .writes_under("/attendance")
        .iter()
        .map(|(_, document)| document["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn queued_events_drain_in_capture_order() {
    init_logging();
    let rig = TestRig::offline();
    let mut device = rig.boot_from(three_students().bytes()).unwrap();
    for id in [2, 1, 3] {
        rig.sensor.present_finger(id);
        device.tick();
    }
    assert_eq!(device.state().queue().len(), 3);

    rig.network.go_online();
    let mut events = device.tick();

    assert!(events.has::<ConnectEvent>());
    let reports: Vec<_> = events.read::<DrainEvent>().collect();
    assert_eq!(
        reports,
        vec![DrainReport {
            delivered: 3,
            remaining: 0,
            halted_on: None
        }]
    );
    assert_eq!(attendance_ids(&rig), vec![2, 1, 3]);
    assert!(device.state().queue().is_empty());
}

#[test]
fn repeat_scans_without_wall_clock_keep_separate_records() {
    init_logging();
    let rig = TestRig {
        clock: ManualClock::unsynchronized(),
        ..TestRig::offline()
    };
    let mut device = rig.boot_from(three_students().bytes()).unwrap();
    for _ in 0..3 {
        rig.sensor.present_finger(1);
        device.tick();
    }
    assert_eq!(device.state().queue().len(), 3);

    rig.network.go_online();
    device.tick();

    assert!(device.state().queue().is_empty());
    let nodes = rig.remote.nodes_under("/attendance");
    assert_eq!(nodes.len(), 3);
    assert!(nodes
        .iter()
        .all(|(path, _)| path.starts_with("/attendance/1_unknown_")));
}

#[test]
fn repeat_scans_within_one_second_keep_separate_records() {
    let rig = TestRig::new();
    let mut device = rig.boot_from(three_students().bytes()).unwrap();
    rig.sensor.present_finger(2);
    device.tick();
    rig.sensor.present_finger(2);
    device.tick();

    let nodes = rig.remote.nodes_under("/attendance");
    assert_eq!(nodes.len(), 2);
    for (path, document) in &nodes {
        assert!(path.starts_with("/attendance/2_2024-05-01_08_30_00_"));
        assert_eq!(document["timestamp"], json!("2024-05-01 08:30:00"));
    }
}

#[test]
fn drain_stops_at_first_failure_and_resumes_later() {
    init_logging();
    let rig = TestRig::offline();
    let mut device = rig.boot_from(three_students().bytes()).unwrap();
    for id in [1, 2, 3] {
        rig.sensor.present_finger(id);
        device.tick();
    }
    rig.remote.script_writes("/attendance", vec![true, false]);

    rig.network.go_online();
    let mut events = device.tick();

    let reports: Vec<_> = events.read::<DrainEvent>().collect();
    assert_eq!(
        reports,
        vec![DrainReport {
            delivered: 1,
            remaining: 2,
            halted_on: Some(Delivery::Rejected)
        }]
    );
    let remaining: Vec<u8> = device
        .state()
        .queue()
        .iter()
        .map(|event| event.identity_id)
        .collect();
    assert_eq!(remaining, vec![2, 3]);

    // next pass only once the drain interval has passed
    let soon = device.tick();
    assert!(!soon.has::<DrainEvent>());

    rig.clock.advance(Duration::from_secs(10));
    let mut later = device.tick();

    let reports: Vec<_> = later.read::<DrainEvent>().collect();
    assert_eq!(reports[0].delivered, 2);
    assert_eq!(attendance_ids(&rig), vec![1, 2, 3]);
}

#[test]
fn drain_passes_follow_the_drain_interval() {
    let rig = TestRig::new();
    let backlog = [
        AttendanceEvent::new(1, "Ben", "R001", "2024-05-01 07:00:00"),
        AttendanceEvent::new(2, "Cai", "R002", "2024-05-01 07:00:01"),
    ];
    let image = three_students().with_queued(backlog).bytes();
    rig.remote.script_writes("/attendance", vec![false; 10]);
    let config = DeviceConfig {
        drain_interval: Duration::from_millis(500),
        ..test_config()
    };
    let mut device = rig.boot_with(config, image).unwrap();

    // ticks at t = 0, 50, ..., 1000
    let mut ticks = rig.tick_n(&mut device, 21);

    let reports: Vec<DrainReport> = ticks
        .iter_mut()
        .flat_map(|events| events.read::<DrainEvent>())
        .collect();
    assert_eq!(reports.len(), 3);
    assert!(reports
        .iter()
        .all(|report| report.delivered == 0 && report.halted_on == Some(Delivery::Rejected)));
    assert_eq!(device.state().queue().len(), 2);
}

#[test]
fn heartbeats_follow_the_heartbeat_interval() {
    let rig = TestRig::new();
    let config = DeviceConfig {
        heartbeat_interval: Duration::from_millis(500),
        ..test_config()
    };
    let mut device = rig
        .boot_with(config, three_students().bytes())
        .unwrap();

    let ticks = rig.tick_n(&mut device, 21);

    let beats = ticks
        .iter()
        .filter(|events| events.has::<HeartbeatEvent>())
        .count();
    assert_eq!(beats, 3);

    let writes = rig.remote.writes_under("/device/heartbeat");
    assert_eq!(writes.len(), 3);
    assert_eq!(writes[2].1["uptimeMs"], json!(1000));
    assert_eq!(writes[2].1["queued"], json!(0));
    assert_eq!(writes[2].1["state"], json!("VERIFY"));
}

#[test]
fn heartbeat_due_while_offline_is_sent_on_reconnect() {
    let rig = TestRig::offline();
    let mut device = rig.boot().unwrap();

    let offline = rig.tick_n(&mut device, 5);
    assert!(offline.iter().all(|events| !events.has::<HeartbeatEvent>()));

    rig.network.go_online();
    let events = device.tick();

    assert!(events.has::<HeartbeatEvent>());
}

#[test]
fn reconnects_are_rate_limited() {
    let rig = TestRig::offline();
    let mut device = rig.boot().unwrap();

    // ticks at t = 0, 50, ..., 5000
    rig.tick_n(&mut device, 101);

    assert_eq!(rig.network.reconnect_attempts(), 2);
    assert!(!device.is_link_up());
}

#[test]
fn link_changes_are_reported() {
    let rig = TestRig::new();
    let mut device = rig.boot().unwrap();
    device.tick();

    rig.network.go_offline();
    let lost = device.tick();
    assert!(lost.has::<DisconnectEvent>());
    assert!(!device.is_link_up());

    rig.network.go_online();
    let back = device.tick();
    assert!(back.has::<ConnectEvent>());
    assert!(device.is_link_up());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_recognized_finger_is_delivered_exactly_once(
        scans in proptest::collection::vec((any::<bool>(), 1u16..=3), 0..20)
    ) {
        let rig = TestRig::new();
        let mut device = rig.boot_from(three_students().bytes()).unwrap();

        for (online, id) in &scans {
            if *online {
                rig.network.go_online();
            } else {
                rig.network.go_offline();
            }
            rig.sensor.present_finger(*id);
            device.tick();
        }

        rig.network.go_online();
        rig.clock.advance(Duration::from_secs(10));
        device.tick();

        prop_assert!(device.state().queue().is_empty());
        prop_assert_eq!(rig.remote.nodes_under("/attendance").len(), scans.len());
    }
}
