mod documents;
mod memory_remote;
mod paths;
mod remote_store;

pub use documents::{
    attendance_document, control_flag_document, heartbeat_document, identity_document,
    status_message_document, ControlFlag, EnrollPayload,
};
pub use memory_remote::MemoryRemote;
pub use paths::{sanitize_path_segment, RemotePaths, PATH_PLACEHOLDER};
pub use remote_store::RemoteStore;
