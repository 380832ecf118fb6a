use egui::Pos2;

use crate::config::CanvasConfig;
use crate::connection_manager;
use crate::db::{Circuit, Connection, ConnectionId, Gate, GateId, GateKind, Segment, Wire, WireId};
use crate::drag::Drag;
use crate::error::LayoutError;
use crate::wiring::WiringState;

/// One editing session: the circuit plus the transient gesture state.
///
/// Every operation runs to completion before returning. The host gives each
/// session its own `Canvas`, nothing here is shared.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub config: CanvasConfig,
    pub(crate) circuit: Circuit,
    pub(crate) wiring: WiringState,
    pub(crate) drag: Option<Drag>,
    // Last known pointer position in canvas coordinates
    pub(crate) mouse: Pos2,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.circuit.gates()
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> + '_ {
        self.circuit.wires()
    }

    /// Place a gate centered under the pointer at `click`.
    pub fn place_gate(&mut self, kind: GateKind, click: Pos2) -> Result<GateId, LayoutError> {
        let template = kind.template()?;
        let anchor = click - template.centering_offset();
        let id = self.circuit.instantiate(kind, anchor)?;
        log::info!("placed {kind:?} [{id}] at ({}, {})", anchor.x, anchor.y);
        Ok(id)
    }

    /// Move a gate's anchor, refresh its connection points and reroute every
    /// wire attached to it.
    pub fn move_gate(&mut self, id: GateId, anchor: Pos2) -> Result<(), LayoutError> {
        let gate = self.circuit.gate_mut(id).ok_or(LayoutError::UnknownGate(id))?;
        gate.pos = anchor;
        connection_manager::recompute_positions(gate)?;

        for wire in self.circuit.wires_of_gate(id) {
            self.reroute_wire(wire);
        }
        Ok(())
    }

    /// Flip a constant between 0 and 1. Returns the new value.
    pub fn toggle_constant_value(&mut self, id: GateId) -> Result<u8, LayoutError> {
        let gate = self.circuit.gate_mut(id).ok_or(LayoutError::UnknownGate(id))?;
        let (kind, value) = match gate.kind {
            GateKind::Constant0 => (GateKind::Constant1, 1),
            GateKind::Constant1 => (GateKind::Constant0, 0),
            other @ (GateKind::Or | GateKind::And) => {
                return Err(LayoutError::NotConstant(other));
            }
        };
        gate.kind = kind;
        gate.value = Some(value);
        log::debug!("constant [{id}] is now {value}");
        Ok(value)
    }

    pub fn remove_gate(&mut self, id: GateId) -> Result<Gate, LayoutError> {
        if self.active_connection().is_some_and(|c| c.gate == id) {
            self.cancel_wiring();
        }
        let gate = self.circuit.remove_gate(id).ok_or(LayoutError::UnknownGate(id))?;
        log::info!("removed {:?} [{id}]", gate.kind);
        Ok(gate)
    }

    pub fn remove_wire(&mut self, id: WireId) -> Option<Wire> {
        self.circuit.remove_wire(id)
    }

    /// Connection under the pointer using the configured snap tolerance.
    pub fn find_connection_near(&self, pos: Pos2) -> Option<&Connection> {
        self.find_connection_within(pos, self.config.snap_tolerance)
    }

    pub fn find_connection_within(&self, pos: Pos2, tolerance: f32) -> Option<&Connection> {
        connection_manager::find_connection_near(&self.circuit, pos, tolerance)
    }

    /// Route between two points around every placed gate.
    pub fn route(&self, from: Pos2, to: Pos2) -> Vec<Segment> {
        let obstacles = self.circuit.obstacles(self.config.collision_margin);
        self.config
            .router()
            .route(from, to, &obstacles, &self.config)
    }

    fn reroute_wire(&mut self, id: WireId) {
        let Some(wire) = self.circuit.wire(id) else {
            return;
        };
        let (Some(from), Some(to)) = (
            self.circuit.connection(wire.from),
            self.circuit.connection(wire.to),
        ) else {
            return;
        };
        let segments = self.route(from.pos, to.pos);
        if let Some(wire) = self.circuit.wire_mut(id) {
            wire.segments = segments;
        }
    }

    pub(crate) fn connection(&self, id: ConnectionId) -> Result<&Connection, LayoutError> {
        self.circuit
            .connection(id)
            .ok_or(LayoutError::UnknownConnection(id))
    }
}
