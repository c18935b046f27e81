use crate::types::IdentityId;

/// Replaces characters that are not allowed (or not wanted) in a path key
pub const PATH_PLACEHOLDER: char = '_';

/// Where each kind of document lives in the remote tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemotePaths {
    pub students: String,
    pub attendance: String,
    pub control_flag: String,
    pub enroll_payload: String,
    pub heartbeat: String,
    pub messages: String,
}

impl RemotePaths {
    pub fn identity_path(&self, id: IdentityId) -> String {
        format!("{}/{}", self.students, id)
    }

    /// One node per event, keyed by identity, wall-clock time and uptime at
    /// capture
    pub fn attendance_path(
        &self,
        id: IdentityId,
        timestamp: &str,
        uptime_millis: u32,
    ) -> String {
        format!(
            "{}/{}_{}_{}",
            self.attendance,
            id,
            sanitize_path_segment(timestamp),
            uptime_millis
        )
    }

    pub fn message_path(&self, index: u32) -> String {
        format!("{}/{}", self.messages, index)
    }
}

impl Default for RemotePaths {
    fn default() -> Self {
        Self {
            students: "/students".to_string(),
            attendance: "/attendance".to_string(),
            control_flag: "/systemState".to_string(),
            enroll_payload: "/enrollData".to_string(),
            heartbeat: "/device/heartbeat".to_string(),
            messages: "/messages".to_string(),
        }
    }
}

/// Make `segment` safe to use as a single path key: anything other than an
/// ASCII letter, digit or '-' becomes `PATH_PLACEHOLDER`.
pub fn sanitize_path_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                PATH_PLACEHOLDER
            }
        })
        .collect()
}
