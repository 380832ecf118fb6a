use std::fmt::Display;

use egui::{Pos2, Rect, Vec2};

/// Fixed geometry of one gate kind. Pin offsets are relative to the gate's
/// top-left anchor.
#[derive(Debug, PartialEq)]
pub struct GateTemplate {
    pub size: Vec2,
    pub pins: &'static [PinTemplate],
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinKind {
    Input,
    Output,
}

impl Display for PinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => f.write_str("Input"),
            Self::Output => f.write_str("Output"),
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PinTemplate {
    pub kind: PinKind,
    /// 0-based among the pins of the same kind
    pub index: u32,
    pub offset: Vec2,
}

impl GateTemplate {
    /// Offset from the pointer to the anchor that centers the gate under it.
    pub fn centering_offset(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn pin_offset(&self, kind: PinKind, index: u32) -> Option<Vec2> {
        self.pins
            .iter()
            .find(|p| p.kind == kind && p.index == index)
            .map(|p| p.offset)
    }

    pub fn footprint(&self, anchor: Pos2) -> Rect {
        Rect::from_min_size(anchor, self.size)
    }

    pub fn pin_count(&self, kind: PinKind) -> usize {
        self.pins.iter().filter(|p| p.kind == kind).count()
    }
}

pub static OR_TEMPLATE: GateTemplate = GateTemplate {
    size: Vec2::new(96.0, 72.0),
    pins: &[
        PinTemplate {
            kind: PinKind::Input,
            index: 0,
            offset: Vec2::new(4.0, 28.0),
        },
        PinTemplate {
            kind: PinKind::Input,
            index: 1,
            offset: Vec2::new(4.0, 44.0),
        },
        PinTemplate {
            kind: PinKind::Output,
            index: 0,
            offset: Vec2::new(88.0, 36.0),
        },
    ],
};

// Shared by Constant0 and Constant1 so toggling never changes the pin layout.
pub static CONSTANT_TEMPLATE: GateTemplate = GateTemplate {
    size: Vec2::new(32.0, 16.0),
    pins: &[PinTemplate {
        kind: PinKind::Output,
        index: 0,
        offset: Vec2::new(32.0, 8.0),
    }],
};
