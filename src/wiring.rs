use crate::canvas::Canvas;
use crate::connection_manager::can_connect;
use crate::db::{Connection, ConnectionId, Segment, WireId};
use crate::error::LayoutError;

/// Progress of the two-click wire gesture.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WiringState {
    #[default]
    Idle,
    /// First endpoint picked, waiting for the second
    Wiring { active: ConnectionId },
}

impl WiringState {
    pub fn is_wiring(&self) -> bool {
        matches!(self, Self::Wiring { .. })
    }

    pub fn active(&self) -> Option<ConnectionId> {
        match self {
            Self::Idle => None,
            Self::Wiring { active } => Some(*active),
        }
    }
}

impl Canvas {
    /// Pick the first endpoint. Picking again replaces the pending one.
    pub fn start_wiring(&mut self, connection: ConnectionId) -> Result<(), LayoutError> {
        self.connection(connection)?;
        if let Some(previous) = self.wiring.active() {
            log::debug!("wiring restarted, dropping pending connection {previous}");
        }
        self.wiring = WiringState::Wiring { active: connection };
        Ok(())
    }

    /// Pick the second endpoint and create the wire.
    ///
    /// Always ends `Idle`. Returns `None` without touching the circuit when
    /// nothing was pending, when the pair may not be connected, or when both
    /// ends are the same connection.
    pub fn complete_wiring(&mut self, target: ConnectionId) -> Option<WireId> {
        let WiringState::Wiring { active } = std::mem::take(&mut self.wiring) else {
            log::debug!("complete_wiring with nothing pending");
            return None;
        };

        let (Some(&from), Some(&to)) = (
            self.circuit.connection(active),
            self.circuit.connection(target),
        ) else {
            log::debug!("wiring endpoint no longer exists");
            return None;
        };

        if from.id == to.id {
            log::debug!("ignoring wire from {} to itself", from.id);
            return None;
        }
        if !can_connect(&from, &to) {
            log::debug!("rejected wire {} -> {}: {} to {}", from.id, to.id, from.kind, to.kind);
            return None;
        }

        let segments = self.route(from.pos, to.pos);
        let id = self.circuit.new_wire(from.id, to.id, segments);
        log::info!("wire [{id}] created: {} -> {}", from.id, to.id);
        Some(id)
    }

    pub fn cancel_wiring(&mut self) {
        self.wiring = WiringState::Idle;
    }

    pub fn wiring_state(&self) -> WiringState {
        self.wiring
    }

    pub fn is_wiring(&self) -> bool {
        self.wiring.is_wiring()
    }

    pub fn active_connection(&self) -> Option<&Connection> {
        self.wiring
            .active()
            .and_then(|id| self.circuit.connection(id))
    }

    /// Path the pending wire would take to the current pointer position.
    pub fn wiring_preview(&self) -> Option<Vec<Segment>> {
        let from = self.active_connection()?;
        Some(self.route(from.pos, self.mouse))
    }
}
