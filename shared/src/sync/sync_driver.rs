use log::{debug, info, warn};

use crate::{
    peripherals::Network,
    queue::{AttendanceEvent, OfflineQueue},
    remote::{attendance_document, RemotePaths, RemoteStore},
    storage::codec::NvCodec,
};

use super::{Delivery, DrainReport, RecordOutcome};

/// Moves attendance events to the remote store, falling back to the offline
/// queue when it cannot.
pub struct SyncDriver {
    paths: RemotePaths,
}

impl SyncDriver {
    pub fn new(paths: RemotePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &RemotePaths {
        &self.paths
    }

    /// Attempt a single write of `event`. Nothing is sent unless the link is
    /// up and the remote client is ready.
    pub fn try_deliver(
        &self,
        remote: &mut dyn RemoteStore,
        network: &dyn Network,
        event: &AttendanceEvent,
    ) -> Delivery {
        if !network.is_connected() || !remote.is_ready() {
            return Delivery::Unreachable;
        }

        let path = self.paths.attendance_path(
            event.identity_id,
            event.timestamp.as_str(),
            event.uptime_millis,
        );
        if remote.write_json(&path, &attendance_document(event)) {
            debug!("Attendance delivered: {}", path);
            Delivery::Delivered
        } else {
            warn!(
                "Attendance write to {} failed: {}",
                path,
                remote.last_error().unwrap_or_else(|| "no reason given".to_string())
            );
            Delivery::Rejected
        }
    }

    /// Write-through for a freshly captured event: deliver now, or hold it in
    /// the offline queue. A full queue drops the event.
    pub fn record(
        &self,
        remote: &mut dyn RemoteStore,
        network: &dyn Network,
        queue: &mut OfflineQueue,
        codec: &mut NvCodec,
        event: AttendanceEvent,
    ) -> RecordOutcome {
        let cause = self.try_deliver(remote, network, &event);
        if cause.is_delivered() {
            return RecordOutcome::Delivered;
        }

        match queue.enqueue(event) {
            Ok(()) => {
                if let Err(error) = queue.persist(codec) {
                    warn!("Offline queue persist failed: {}", error);
                }
                info!("Attendance queued offline ({:?}); {} pending", cause, queue.len());
                RecordOutcome::Queued { cause }
            }
            Err(full) => {
                warn!("Attendance dropped: {}", full);
                RecordOutcome::Dropped(full)
            }
        }
    }

    /// Deliver queued events oldest-first. Each success is removed and the
    /// queue re-persisted; the first failure ends the pass and leaves it and
    /// everything behind it queued in order.
    pub fn drain(
        &self,
        remote: &mut dyn RemoteStore,
        network: &dyn Network,
        queue: &mut OfflineQueue,
        codec: &mut NvCodec,
    ) -> DrainReport {
        let mut report = DrainReport::default();

        while let Some(event) = queue.peek_oldest().cloned() {
            let delivery = self.try_deliver(remote, network, &event);
            if !delivery.is_delivered() {
                report.halted_on = Some(delivery);
                break;
            }

            queue.remove_oldest();
            if let Err(error) = queue.persist(codec) {
                warn!("Offline queue persist failed during drain: {}", error);
            }
            report.delivered += 1;
        }

        report.remaining = queue.len();
        if report.delivered > 0 {
            info!(
                "Drain pass delivered {} events, {} remaining",
                report.delivered, report.remaining
            );
        }
        report
    }
}
