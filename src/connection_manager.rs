use egui::Pos2;

use crate::assets::PinKind;
use crate::db::{Circuit, Connection, Gate, GateId};
use crate::error::LayoutError;

/// Reassign every connection position from the gate anchor and the template
/// offset of its kind and index. Positions are not tracked automatically, so
/// this runs after anything that moves the anchor.
pub fn recompute_positions(gate: &mut Gate) -> Result<(), LayoutError> {
    let template = gate.kind.template()?;
    for c in &mut gate.connections {
        if let Some(offset) = template.pin_offset(c.kind, c.index) {
            c.pos = gate.pos + offset;
        }
    }
    Ok(())
}

/// First connection within `tolerance` of `pos`, scanning gates in placement
/// order and each gate's connections in template order.
pub fn find_connection_near(circuit: &Circuit, pos: Pos2, tolerance: f32) -> Option<&Connection> {
    circuit
        .connections()
        .find(|c| (c.pos - pos).length() <= tolerance)
}

/// Which pin kinds may be wired together. Two outputs never can. Pins on the
/// same gate can, which is how feedback loops are drawn.
pub fn can_connect(from: &Connection, to: &Connection) -> bool {
    match (from.kind, to.kind) {
        (PinKind::Output, PinKind::Input)
        | (PinKind::Input, PinKind::Output)
        | (PinKind::Input, PinKind::Input) => true,
        (PinKind::Output, PinKind::Output) => false,
    }
}

impl Circuit {
    pub fn recompute_positions(&mut self, id: GateId) -> Result<(), LayoutError> {
        let gate = self.gate_mut(id).ok_or(LayoutError::UnknownGate(id))?;
        recompute_positions(gate)
    }
}
