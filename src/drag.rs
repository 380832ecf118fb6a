use egui::{Pos2, Rect};

use crate::canvas::Canvas;
use crate::db::{GateId, GateKind};
use crate::error::LayoutError;

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drag {
    /// A gate picked from the palette follows the pointer until dropped
    Panel { kind: GateKind },
}

impl Canvas {
    pub fn select_gate(&mut self, kind: GateKind) {
        log::debug!("selected {kind:?} from the palette");
        self.drag = Some(Drag::Panel { kind });
    }

    pub fn selected_gate(&self) -> Option<GateKind> {
        match self.drag {
            Some(Drag::Panel { kind }) => Some(kind),
            None => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn update_mouse_position(&mut self, pos: Pos2) {
        self.mouse = pos;
    }

    pub fn mouse_position(&self) -> Pos2 {
        self.mouse
    }

    /// Drop the selected gate at `click`. The selection stays so the same
    /// kind can be dropped again. Nothing happens when nothing is selected.
    pub fn place_selected_gate(&mut self, click: Pos2) -> Result<Option<GateId>, LayoutError> {
        let Some(kind) = self.selected_gate() else {
            return Ok(None);
        };
        self.place_gate(kind, click).map(Some)
    }

    /// Footprint the selected gate would take if dropped at the pointer.
    pub fn drag_preview(&self) -> Option<Rect> {
        let template = self.selected_gate()?.template().ok()?;
        Some(template.footprint(self.mouse - template.centering_offset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn select_enters_dragging() {
        let mut canvas = Canvas::default();
        assert!(!canvas.is_dragging());
        canvas.select_gate(GateKind::Or);
        assert!(canvas.is_dragging());
        assert_eq!(canvas.selected_gate(), Some(GateKind::Or));
    }

    #[test]
    fn cancel_drag_clears_selection() {
        let mut canvas = Canvas::default();
        canvas.select_gate(GateKind::Or);
        canvas.cancel_drag();
        assert!(!canvas.is_dragging());
        assert_eq!(canvas.selected_gate(), None);
    }

    #[test]
    fn placing_keeps_selection() {
        let mut canvas = Canvas::default();
        canvas.select_gate(GateKind::Or);
        let id = canvas
            .place_selected_gate(pos2(150.0, 250.0))
            .expect("or has a template")
            .expect("gate selected");
        canvas
            .place_selected_gate(pos2(300.0, 250.0))
            .expect("or has a template");

        assert_eq!(canvas.gates().count(), 2);
        assert_eq!(canvas.circuit().gate(id).map(|g| g.pos), Some(pos2(102.0, 214.0)));
        assert_eq!(canvas.selected_gate(), Some(GateKind::Or));
        assert!(canvas.is_dragging());
    }

    #[test]
    fn placing_without_selection_does_nothing() {
        let mut canvas = Canvas::default();
        let placed = canvas
            .place_selected_gate(pos2(150.0, 250.0))
            .expect("no error");
        assert_eq!(placed, None);
        assert_eq!(canvas.gates().count(), 0);
    }

    #[test]
    fn placing_selected_and_gate_fails() {
        let mut canvas = Canvas::default();
        canvas.select_gate(GateKind::And);
        assert!(matches!(
            canvas.place_selected_gate(pos2(0.0, 0.0)),
            Err(LayoutError::UnsupportedGateKind(GateKind::And))
        ));
        assert!(canvas.drag_preview().is_none());
    }

    #[test]
    fn preview_is_centered_on_pointer() {
        let mut canvas = Canvas::default();
        canvas.update_mouse_position(pos2(100.0, 200.0));
        assert_eq!(canvas.mouse_position(), pos2(100.0, 200.0));
        assert!(canvas.drag_preview().is_none());

        canvas.select_gate(GateKind::Constant1);
        let preview = canvas.drag_preview().expect("dragging");
        assert_eq!(preview.min, pos2(84.0, 192.0));
        assert_eq!(preview.size(), vec2(32.0, 16.0));
        assert_eq!(preview.center(), pos2(100.0, 200.0));
    }
}
