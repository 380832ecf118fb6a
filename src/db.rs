use std::fmt::Display;

use egui::{Pos2, Rect, Vec2};
use slotmap::SlotMap;

use crate::assets::{self, GateTemplate, PinKind};
use crate::error::LayoutError;

slotmap::new_key_type! {
    pub struct GateId;
}

impl Display for GateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{:?}", self.0))
    }
}

slotmap::new_key_type! {
    pub struct ConnectionId;
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{:?}", self.0))
    }
}

slotmap::new_key_type! {
    pub struct WireId;
}

impl Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{:?}", self.0))
    }
}

/// Placed gates, their connection points and the wires between them.
///
/// Gates own their connections. Wires only refer to connections by id, and
/// `connection_owners` maps every live connection back to its gate so
/// neither side holds a pointer to the other.
#[derive(Default, serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct Circuit {
    pub(crate) gates: SlotMap<GateId, Gate>,
    // Placement order. Slot maps reuse freed slots so their own order drifts.
    pub(crate) gate_order: Vec<GateId>,
    pub(crate) connection_owners: SlotMap<ConnectionId, GateId>,
    pub(crate) wires: SlotMap<WireId, Wire>,
    pub(crate) wire_order: Vec<WireId>,
}

impl Circuit {
    /// Create a gate anchored at `anchor` together with one connection per
    /// template pin.
    pub fn instantiate(&mut self, kind: GateKind, anchor: Pos2) -> Result<GateId, LayoutError> {
        let template = kind.template()?;
        let connection_owners = &mut self.connection_owners;
        let id = self.gates.insert_with_key(|id| {
            let connections = template
                .pins
                .iter()
                .map(|pin| Connection {
                    id: connection_owners.insert(id),
                    gate: id,
                    kind: pin.kind,
                    index: pin.index,
                    pos: anchor + pin.offset,
                })
                .collect();
            Gate {
                id,
                kind,
                pos: anchor,
                size: template.size,
                value: kind.constant_value(),
                connections,
            }
        });
        self.gate_order.push(id);
        Ok(id)
    }

    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(id)
    }

    pub(crate) fn gate_mut(&mut self, id: GateId) -> Option<&mut Gate> {
        self.gates.get_mut(id)
    }

    /// Gates in placement order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.gate_order.iter().filter_map(|id| self.gates.get(*id))
    }

    pub fn gate_ids(&self) -> Vec<GateId> {
        self.gate_order.clone()
    }

    pub fn gate_count(&self) -> usize {
        self.gate_order.len()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        let owner = *self.connection_owners.get(id)?;
        self.gates
            .get(owner)?
            .connections
            .iter()
            .find(|c| c.id == id)
    }

    /// Every connection, by gate placement order then template order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.gates().flat_map(|g| g.connections.iter())
    }

    pub fn new_wire(&mut self, from: ConnectionId, to: ConnectionId, segments: Vec<Segment>) -> WireId {
        let id = self.wires.insert_with_key(|id| Wire {
            id,
            from,
            to,
            segments,
            is_connected: true,
        });
        self.wire_order.push(id);
        id
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id)
    }

    pub(crate) fn wire_mut(&mut self, id: WireId) -> Option<&mut Wire> {
        self.wires.get_mut(id)
    }

    /// Wires in creation order.
    pub fn wires(&self) -> impl Iterator<Item = &Wire> + '_ {
        self.wire_order.iter().filter_map(|id| self.wires.get(*id))
    }

    pub fn wire_count(&self) -> usize {
        self.wire_order.len()
    }

    pub fn wires_of_connection(&self, id: ConnectionId) -> Vec<WireId> {
        self.wires()
            .filter(|w| w.involves_connection(id))
            .map(|w| w.id)
            .collect()
    }

    pub fn wires_of_gate(&self, id: GateId) -> Vec<WireId> {
        self.wires()
            .filter(|w| {
                self.connection_owners.get(w.from) == Some(&id)
                    || self.connection_owners.get(w.to) == Some(&id)
            })
            .map(|w| w.id)
            .collect()
    }

    pub fn remove_wire(&mut self, id: WireId) -> Option<Wire> {
        let wire = self.wires.remove(id)?;
        self.wire_order.retain(|w| *w != id);
        Some(wire)
    }

    /// Remove a gate, its connections and every wire attached to them.
    pub fn remove_gate(&mut self, id: GateId) -> Option<Gate> {
        let attached = self.wires_of_gate(id);
        let gate = self.gates.remove(id)?;
        self.gate_order.retain(|g| *g != id);
        for c in &gate.connections {
            self.connection_owners.remove(c.id);
        }
        for wire in attached {
            self.remove_wire(wire);
        }
        Some(gate)
    }

    pub fn display(&self) -> String {
        let mut out = String::new();
        use std::fmt::Write as _;

        writeln!(out, "======================================").ok();
        writeln!(out, "  GATES ({} total)", self.gate_count()).ok();
        writeln!(out, "======================================").ok();

        let gate_count = self.gate_count();
        for (idx, gate) in self.gates().enumerate() {
            let is_last_gate = idx == gate_count - 1;
            let branch = if is_last_gate { "`-" } else { "|-" };
            let cont = if is_last_gate { "   " } else { "|  " };

            let value = gate
                .value
                .map(|v| format!(" = {v}"))
                .unwrap_or_default();
            writeln!(
                out,
                "{branch} {:?} [{}] @ ({}, {}){value}",
                gate.kind, gate.id, gate.pos.x, gate.pos.y
            )
            .ok();

            let pin_count = gate.connections.len();
            for (pin_idx, c) in gate.connections.iter().enumerate() {
                let pin_branch = if pin_idx == pin_count - 1 { "`-" } else { "|-" };
                let kind_str = match c.kind {
                    PinKind::Input => "In",
                    PinKind::Output => "Out",
                };
                let attached = self.wires_of_connection(c.id);
                let wire_str = if attached.is_empty() {
                    "(unconnected)".to_owned()
                } else {
                    attached
                        .iter()
                        .map(|w| format!("Wire[{w}]"))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                writeln!(
                    out,
                    "{cont}{pin_branch} #{} ({kind_str}) @ ({}, {})  {wire_str}",
                    c.index, c.pos.x, c.pos.y
                )
                .ok();
            }
        }

        writeln!(out).ok();
        writeln!(out, "======================================").ok();
        writeln!(out, "  WIRES ({} total)", self.wire_count()).ok();
        writeln!(out, "======================================").ok();
        for wire in self.wires() {
            let state = if wire.is_connected { "" } else { " (dangling)" };
            writeln!(
                out,
                "Wire[{}] {} -> {}{state}",
                wire.id,
                self.display_connection(wire.from),
                self.display_connection(wire.to)
            )
            .ok();
            for s in &wire.segments {
                writeln!(
                    out,
                    "   {:?} ({}, {}) -> ({}, {})",
                    s.orientation, s.start.x, s.start.y, s.end.x, s.end.y
                )
                .ok();
            }
        }

        out
    }

    // Short form like "Or[1v1]#0 Output"
    fn display_connection(&self, id: ConnectionId) -> String {
        match self.connection(id) {
            Some(c) => {
                let kind = self
                    .gate(c.gate)
                    .map(|g| format!("{:?}", g.kind))
                    .unwrap_or_else(|| "?".to_owned());
                format!("{kind}[{}]#{} {}", c.gate, c.index, c.kind)
            }
            None => format!("?[{id}]"),
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, PartialEq, Eq, Hash, Copy, Debug, Clone)]
pub enum GateKind {
    Or,
    // No template yet, placing one fails
    And,
    Constant0,
    Constant1,
}

impl GateKind {
    pub fn template(self) -> Result<&'static GateTemplate, LayoutError> {
        match self {
            Self::Or => Ok(&assets::OR_TEMPLATE),
            Self::Constant0 | Self::Constant1 => Ok(&assets::CONSTANT_TEMPLATE),
            Self::And => Err(LayoutError::UnsupportedGateKind(self)),
        }
    }

    pub fn is_constant(self) -> bool {
        matches!(self, Self::Constant0 | Self::Constant1)
    }

    pub fn constant_value(self) -> Option<u8> {
        match self {
            Self::Constant0 => Some(0),
            Self::Constant1 => Some(1),
            Self::Or | Self::And => None,
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
pub struct Gate {
    pub id: GateId,
    pub kind: GateKind,
    /// Top-left corner on the canvas
    pub pos: Pos2,
    pub size: Vec2,
    /// Only constants carry a value, and it always agrees with `kind`
    pub value: Option<u8>,
    /// Built once from the template at placement, never resized
    pub connections: Vec<Connection>,
}

impl Gate {
    pub fn footprint(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    pub fn connection(&self, kind: PinKind, index: u32) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.kind == kind && c.index == index)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter().filter(|c| c.kind == PinKind::Input)
    }

    pub fn output(&self) -> Option<&Connection> {
        self.connection(PinKind::Output, 0)
    }
}

/// A connection point on a placed gate. `pos` is cached from the gate
/// anchor and must be recomputed whenever the anchor moves.
#[derive(serde::Deserialize, serde::Serialize, Copy, Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub gate: GateId,
    pub kind: PinKind,
    pub index: u32,
    pub pos: Pos2,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub from: ConnectionId,
    pub to: ConnectionId,
    pub segments: Vec<Segment>,
    pub is_connected: bool,
}

impl Wire {
    pub fn involves_connection(&self, id: ConnectionId) -> bool {
        self.from == id || self.to == id
    }

    pub fn start(&self) -> Option<Pos2> {
        self.segments.first().map(|s| s.start)
    }

    pub fn end(&self) -> Option<Pos2> {
        self.segments.last().map(|s| s.end)
    }
}

#[derive(serde::Deserialize, serde::Serialize, PartialEq, Eq, Copy, Debug, Clone)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An axis-aligned piece of a wire. Never zero length.
#[derive(serde::Deserialize, serde::Serialize, Copy, Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: Pos2,
    pub end: Pos2,
    pub orientation: Orientation,
}

impl Segment {
    /// Returns `None` for diagonal pairs and for anything no longer than `epsilon`.
    pub fn between(start: Pos2, end: Pos2, epsilon: f32) -> Option<Self> {
        let orientation = if start.y == end.y {
            Orientation::Horizontal
        } else if start.x == end.x {
            Orientation::Vertical
        } else {
            return None;
        };
        let segment = Self {
            start,
            end,
            orientation,
        };
        (segment.length() > epsilon).then_some(segment)
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}
