//! Orthogonal (Manhattan) wire routing.
//!
//! Every route has the same shape: horizontal out of the start point, one
//! vertical run at some X, horizontal into the end point. Routers differ only
//! in how they pick that X. Degenerate pieces are dropped, so a route has at
//! most three segments.

use egui::{Pos2, Rect, pos2};

use crate::config::CanvasConfig;
use crate::coords;
use crate::db::{Circuit, Orientation, Segment};

/// A gate footprint wires should stay out of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub footprint: Rect,
    /// Footprint grown by the collision margin
    pub bounds: Rect,
}

impl Obstacle {
    pub fn new(footprint: Rect, margin: f32) -> Self {
        Self {
            footprint,
            bounds: footprint.expand(margin),
        }
    }

    /// Does a vertical run at `x` spanning `y_min..=y_max` touch this obstacle?
    pub fn blocks_vertical(&self, x: f32, y_min: f32, y_max: f32) -> bool {
        x >= self.bounds.left()
            && x <= self.bounds.right()
            && y_max >= self.bounds.top()
            && y_min <= self.bounds.bottom()
    }

    pub fn left_reroute(&self, clearance: f32) -> f32 {
        coords::position_left_of(self.footprint.left(), clearance)
    }

    pub fn right_reroute(&self, clearance: f32) -> f32 {
        coords::position_right_of(self.footprint.left(), self.footprint.width(), clearance)
    }
}

impl Circuit {
    /// Every placed gate as an obstacle, in placement order.
    pub fn obstacles(&self, margin: f32) -> Vec<Obstacle> {
        self.gates()
            .map(|g| Obstacle::new(g.footprint(), margin))
            .collect()
    }
}

pub trait Router {
    /// X of the vertical run between `from` and `to`.
    fn corridor_x(&self, from: Pos2, to: Pos2, obstacles: &[Obstacle], clearance: f32) -> f32;

    fn route(
        &self,
        from: Pos2,
        to: Pos2,
        obstacles: &[Obstacle],
        config: &CanvasConfig,
    ) -> Vec<Segment> {
        let x = self.corridor_x(from, to, obstacles, config.reroute_clearance);
        three_segment_path(from, to, x, config.segment_epsilon)
    }
}

/// Reroutes around the first gate, in placement order, that the naive
/// midpoint run would cross. Further gates are not looked at, so the rerouted
/// run can still cross a second gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointRouter;

impl Router for MidpointRouter {
    fn corridor_x(&self, from: Pos2, to: Pos2, obstacles: &[Obstacle], clearance: f32) -> f32 {
        let mid = (from.x + to.x) / 2.0;
        let (y_min, y_max) = (from.y.min(to.y), from.y.max(to.y));

        let Some(hit) = obstacles
            .iter()
            .find(|o| o.blocks_vertical(mid, y_min, y_max))
        else {
            return mid;
        };

        let x = closer_to(mid, hit.left_reroute(clearance), hit.right_reroute(clearance));
        log::debug!("midpoint {mid} blocked by gate at {:?}, rerouting to {x}", hit.footprint);
        x
    }
}

/// Picks the X closest to the naive midpoint whose vertical run is clear of
/// every obstacle. Candidates are the midpoint and the left/right reroute of
/// each obstacle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorridorRouter;

impl Router for CorridorRouter {
    fn corridor_x(&self, from: Pos2, to: Pos2, obstacles: &[Obstacle], clearance: f32) -> f32 {
        let mid = (from.x + to.x) / 2.0;
        let (y_min, y_max) = (from.y.min(to.y), from.y.max(to.y));
        let is_clear = |x: f32| !obstacles.iter().any(|o| o.blocks_vertical(x, y_min, y_max));

        let candidates = std::iter::once(mid).chain(
            obstacles
                .iter()
                .flat_map(|o| [o.left_reroute(clearance), o.right_reroute(clearance)]),
        );

        let mut best: Option<f32> = None;
        for x in candidates.filter(|x| is_clear(*x)) {
            if best.is_none_or(|b| (x - mid).abs() < (b - mid).abs()) {
                best = Some(x);
            }
        }

        match best {
            Some(x) => {
                if x != mid {
                    log::debug!("midpoint {mid} blocked, clear corridor at {x}");
                }
                x
            }
            None => {
                log::warn!("no clear corridor between {from:?} and {to:?}");
                MidpointRouter.corridor_x(from, to, obstacles, clearance)
            }
        }
    }
}

// Ties go left.
fn closer_to(target: f32, left: f32, right: f32) -> f32 {
    if (left - target).abs() <= (right - target).abs() {
        left
    } else {
        right
    }
}

/// Horizontal, vertical at `x`, horizontal. Pieces no longer than `epsilon`
/// are dropped and collinear neighbours left behind are joined.
pub fn three_segment_path(from: Pos2, to: Pos2, x: f32, epsilon: f32) -> Vec<Segment> {
    let corner_a = pos2(x, from.y);
    let corner_b = pos2(x, to.y);

    let mut out: Vec<Segment> = Vec::with_capacity(3);
    for s in [
        Segment::between(from, corner_a, epsilon),
        Segment::between(corner_a, corner_b, epsilon),
        Segment::between(corner_b, to, epsilon),
    ]
    .into_iter()
    .flatten()
    {
        match out.last_mut() {
            Some(prev) if prev.orientation == s.orientation && prev.end == s.start => {
                prev.end = s.end;
            }
            _ => out.push(s),
        }
    }

    // Joining can fold a path back onto itself
    out.retain(|s| s.length() > epsilon);
    debug_assert!(
        out.iter().all(|s| match s.orientation {
            Orientation::Horizontal => s.start.y == s.end.y,
            Orientation::Vertical => s.start.x == s.end.x,
        }),
        "route must stay axis aligned"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn or_gate_at(x: f32, y: f32) -> Obstacle {
        Obstacle::new(Rect::from_min_size(pos2(x, y), vec2(96.0, 72.0)), 10.0)
    }

    fn config() -> CanvasConfig {
        CanvasConfig::default()
    }

    fn assert_connected(path: &[Segment], from: Pos2, to: Pos2) {
        assert_eq!(path.first().map(|s| s.start), Some(from));
        assert_eq!(path.last().map(|s| s.end), Some(to));
        for pair in path.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "segments must chain");
        }
    }

    #[test]
    fn straight_horizontal_is_one_segment() {
        let from = pos2(0.0, 100.0);
        let to = pos2(200.0, 100.0);
        let path = MidpointRouter.route(from, to, &[], &config());
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].start, from);
        assert_eq!(path[0].end, to);
        assert!(path[0].is_horizontal());
    }

    #[test]
    fn straight_vertical_is_one_segment() {
        let from = pos2(10.0, 0.0);
        let to = pos2(10.0, 100.0);
        let path = MidpointRouter.route(from, to, &[], &config());
        assert_eq!(path.len(), 1);
        assert!(path[0].is_vertical());
        assert_connected(&path, from, to);
    }

    #[test]
    fn offset_points_make_three_segments_through_midpoint() {
        let from = pos2(0.0, 0.0);
        let to = pos2(100.0, 50.0);
        let path = MidpointRouter.route(from, to, &[], &config());
        assert_eq!(path.len(), 3);
        assert!(path[0].is_horizontal());
        assert!(path[1].is_vertical());
        assert!(path[2].is_horizontal());
        assert_eq!(path[1].start.x, 50.0);
        assert_connected(&path, from, to);
    }

    #[test]
    fn coincident_points_have_no_segments() {
        let p = pos2(42.0, 42.0);
        assert!(MidpointRouter.route(p, p, &[], &config()).is_empty());
        assert!(CorridorRouter.route(p, p, &[], &config()).is_empty());
    }

    #[test]
    fn tiny_offsets_are_dropped() {
        // The vertical piece is under a pixel long
        let path = MidpointRouter.route(pos2(0.0, 0.0), pos2(100.0, 0.5), &[], &config());
        assert!(path.iter().all(|s| s.is_horizontal()));
        assert!(path.iter().all(|s| s.length() > 1.0));
    }

    #[test]
    fn avoids_gate_covering_midpoint() {
        let from = pos2(0.0, 100.0);
        let to = pos2(400.0, 120.0);
        let middle = or_gate_at(150.0, 60.0);
        let path = MidpointRouter.route(from, to, &[middle], &config());

        let vertical: Vec<&Segment> = path.iter().filter(|s| s.is_vertical()).collect();
        assert_eq!(vertical.len(), 1);
        let x = vertical[0].start.x;
        assert!(x < middle.bounds.left() || x > middle.bounds.right());
        // 261 is closer to 200 than 135
        assert_eq!(x, 261.0);
        assert_connected(&path, from, to);
    }

    #[test]
    fn gate_outside_vertical_span_is_ignored() {
        let from = pos2(0.0, 0.0);
        let to = pos2(400.0, 20.0);
        let below = or_gate_at(150.0, 200.0);
        assert_eq!(MidpointRouter.corridor_x(from, to, &[below], 15.0), 200.0);
    }

    #[test]
    fn ties_reroute_left() {
        assert_eq!(closer_to(10.0, 0.0, 20.0), 0.0);
        assert_eq!(closer_to(10.0, 0.0, 19.0), 19.0);
    }

    #[test]
    fn midpoint_router_only_avoids_first_gate() {
        let from = pos2(0.0, 100.0);
        let to = pos2(400.0, 110.0);
        let first = or_gate_at(150.0, 60.0);
        let second = or_gate_at(250.0, 60.0);
        let obstacles = [first, second];

        let x = MidpointRouter.corridor_x(from, to, &obstacles, 15.0);
        assert_eq!(x, 261.0);
        assert!(second.blocks_vertical(x, 100.0, 110.0));
    }

    #[test]
    fn corridor_router_clears_every_gate() {
        let from = pos2(0.0, 100.0);
        let to = pos2(400.0, 110.0);
        let obstacles = [or_gate_at(150.0, 60.0), or_gate_at(250.0, 60.0)];

        let x = CorridorRouter.corridor_x(from, to, &obstacles, 15.0);
        assert_eq!(x, 135.0);
        assert!(obstacles.iter().all(|o| !o.blocks_vertical(x, 100.0, 110.0)));
    }

    #[test]
    fn corridor_router_keeps_free_midpoint() {
        let from = pos2(0.0, 0.0);
        let to = pos2(100.0, 50.0);
        let far = or_gate_at(500.0, 0.0);
        assert_eq!(CorridorRouter.corridor_x(from, to, &[far], 15.0), 50.0);
    }

    #[test]
    fn corridor_router_falls_back_when_boxed_in() {
        // A clearance smaller than the margin puts both reroutes inside the box
        let from = pos2(0.0, 0.0);
        let to = pos2(200.0, 1000.0);
        let obstacles = [Obstacle::new(
            Rect::from_min_max(pos2(-500.0, -10.0), pos2(700.0, 1010.0)),
            10.0,
        )];
        let x = CorridorRouter.corridor_x(from, to, &obstacles, 5.0);
        assert_eq!(x, MidpointRouter.corridor_x(from, to, &obstacles, 5.0));
        assert_eq!(x, -505.0);
    }
}
