use crate::db::{ConnectionId, GateId, GateKind};

/// Errors surfaced by the layout core.
///
/// Invalid pointer gestures (completing a wire with nothing pending, joining
/// two outputs) are not errors, they are ordinary no-ops.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("gate kind {0:?} has no template")]
    UnsupportedGateKind(GateKind),
    #[error("gate {0} does not exist")]
    UnknownGate(GateId),
    #[error("connection {0} does not exist")]
    UnknownConnection(ConnectionId),
    #[error("gate kind {0:?} is not a constant")]
    NotConstant(GateKind),
    #[error("invalid canvas config: {0}")]
    Config(#[from] serde_json::Error),
}
