//! Non-fatal conditions accumulated while scheduling a block (spec §4.5
//! "warning accumulation" — these never abort a render, they're surfaced to
//! the caller for logging/diagnostics).

use thiserror::Error;

/// A condition worth surfacing to the caller without aborting the block.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchedulerWarning {
    #[error("receiver '{receiver}' has no registered model for kind {kind:?}; silenced")]
    UnsupportedReceiverKind { receiver: String, kind: aural_scene::receiver::ReceiverKind },

    #[error("receiver '{receiver}' mask plugin '{mask_name}' does not match any scene mask")]
    DanglingMaskPlugin { receiver: String, mask_name: String },

    #[error("source vertex index {index} out of range for {vertex_count} flattened vertices")]
    VertexIndexOutOfRange { index: usize, vertex_count: usize },
}
