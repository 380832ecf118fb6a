use crate::error::LayoutError;
use crate::routing::{CorridorRouter, MidpointRouter, Router};

#[derive(serde::Deserialize, serde::Serialize, PartialEq, Eq, Copy, Debug, Clone, Default)]
pub enum RoutingStrategy {
    /// Reroute around the first gate hit by the naive midpoint.
    #[default]
    Midpoint,
    /// Search for a vertical corridor clear of every gate.
    Corridor,
}

impl RoutingStrategy {
    pub fn router(self) -> &'static dyn Router {
        match self {
            Self::Midpoint => &MidpointRouter,
            Self::Corridor => &CorridorRouter,
        }
    }
}

#[derive(Clone, PartialEq, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Expansion of a gate footprint when testing whether a wire crosses it
    pub collision_margin: f32,
    /// Distance from a gate edge at which a rerouted wire runs
    pub reroute_clearance: f32,
    /// Default radius for hit-testing connection points
    pub snap_tolerance: f32,
    /// Segments this short are not emitted
    pub segment_epsilon: f32,
    pub routing: RoutingStrategy,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            collision_margin: 10.0,
            reroute_clearance: 15.0,
            snap_tolerance: 10.0,
            segment_epsilon: 1.0,
            routing: RoutingStrategy::Midpoint,
        }
    }
}

impl CanvasConfig {
    /// Parse a config document. Missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn router(&self) -> &'static dyn Router {
        self.routing.router()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json(r#"{ "snap_tolerance": 4.0, "routing": "Corridor" }"#)
            .expect("config should parse");
        assert_eq!(config.snap_tolerance, 4.0);
        assert_eq!(config.routing, RoutingStrategy::Corridor);
        assert_eq!(config.collision_margin, 10.0);
        assert_eq!(config.reroute_clearance, 15.0);
    }

    #[test]
    fn empty_json_is_default() {
        let config = CanvasConfig::from_json("{}").expect("config should parse");
        assert_eq!(config, CanvasConfig::default());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = CanvasConfig::from_json("{ snap_tolerance: ").unwrap_err();
        assert!(matches!(err, LayoutError::Config(_)));
    }
}
