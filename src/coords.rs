//! Explicit left/right arithmetic on the X axis.
//!
//! Left is always lower X and right is always higher X. Direction lives in
//! the function name, never in the sign of a distance, so `move_left(x, -5.0)`
//! and `move_left(x, 5.0)` both move left.

use crate::error::LayoutError;

pub fn is_left_of(a: f32, b: f32) -> bool {
    a < b
}

pub fn is_right_of(a: f32, b: f32) -> bool {
    a > b
}

pub fn move_right(x: f32, distance: f32) -> f32 {
    x + distance.abs()
}

pub fn move_left(x: f32, distance: f32) -> f32 {
    x - distance.abs()
}

/// Left edge of an object anchored at its top-left corner.
pub fn left_edge(obj_x: f32) -> f32 {
    obj_x
}

pub fn right_edge(obj_x: f32, width: f32) -> f32 {
    obj_x + width
}

/// A position `clearance` to the right of the object's right edge.
pub fn position_right_of(obj_x: f32, width: f32, clearance: f32) -> f32 {
    move_right(right_edge(obj_x, width), clearance)
}

/// A position `clearance` to the left of the object's left edge.
pub fn position_left_of(obj_x: f32, clearance: f32) -> f32 {
    move_left(left_edge(obj_x), clearance)
}

pub fn leftmost(xs: &[f32]) -> Result<f32, LayoutError> {
    xs.iter()
        .copied()
        .reduce(f32::min)
        .ok_or(LayoutError::InvalidArgument(
            "at least one coordinate must be provided",
        ))
}

pub fn rightmost(xs: &[f32]) -> Result<f32, LayoutError> {
    xs.iter()
        .copied()
        .reduce(f32::max)
        .ok_or(LayoutError::InvalidArgument(
            "at least one coordinate must be provided",
        ))
}
