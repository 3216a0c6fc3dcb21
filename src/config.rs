use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the routing stack. Stub sizing directly shapes how
/// connectors leave their ports, so it stays adjustable rather than
/// hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Base port stub length before the stroke-width contribution.
    pub stub_base: f32,
    /// Stub length added per unit of stroke width; keeps the stub
    /// monotonically increasing with the connector's visual weight.
    pub stub_per_stroke: f32,
    /// Hard clamp range for the port stub length.
    pub stub_min: f32,
    pub stub_max: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            stub_base: 8.0,
            stub_per_stroke: 4.0,
            stub_min: 10.0,
            stub_max: 24.0,
        }
    }
}

impl RoutingConfig {
    /// Stub length for a connector of the given stroke width.
    pub fn stub_length(&self, stroke_width: f32) -> f32 {
        (self.stub_base + self.stub_per_stroke * stroke_width.max(0.0))
            .clamp(self.stub_min, self.stub_max)
    }
}

/// Tunables for the snap stack. These thresholds define the perceived
/// snapping feel and are covered by dedicated tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Maximum |delta| for an alignment candidate to be accepted.
    pub snap_tolerance: f32,
    /// Center-coordinate range below which a selection counts as aligned
    /// on an axis (uniform-spacing detection).
    pub alignment_tolerance: f32,
    /// Maximum deviation from the mean gap for a selection to count as
    /// uniformly spaced.
    pub spacing_tolerance: f32,
    /// Left/right (or top/bottom) gaps within this of each other are
    /// flagged equal on their badges.
    pub equal_gap_threshold: f32,
    /// Perpendicular overlap may be short by up to this much and a
    /// neighbor still qualifies for a distance badge.
    pub overlap_slack: f32,
    /// Without true overlap, a neighbor qualifies when centers sit within
    /// half the combined extent plus this pad.
    pub center_band_pad: f32,
    /// Neighbors searched (by center distance) before falling back to the
    /// remainder of the scene.
    pub nearest_first: usize,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: 8.0,
            alignment_tolerance: 8.0,
            spacing_tolerance: 2.0,
            equal_gap_threshold: 1.0,
            overlap_slack: 4.0,
            center_band_pad: 8.0,
            nearest_first: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub routing: RoutingConfig,
    pub snap: SnapConfig,
}

/// Loads a config overlay from a JSON file; missing sections and fields
/// fall back to their defaults. `None` yields the default config.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_length_is_monotone_in_stroke_width() {
        let config = RoutingConfig::default();
        let mut last = 0.0;
        for width in [0.0, 0.5, 1.0, 2.0, 4.0, 10.0] {
            let stub = config.stub_length(width);
            assert!(stub >= last, "stub shrank at stroke width {width}");
            last = stub;
        }
    }

    #[test]
    fn stub_length_is_clamped() {
        let config = RoutingConfig::default();
        assert_eq!(config.stub_length(0.0), 10.0);
        assert_eq!(config.stub_length(100.0), 24.0);
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"snap":{"snap_tolerance":12.0}}"#).unwrap();
        assert_eq!(config.snap.snap_tolerance, 12.0);
        assert_eq!(config.snap.alignment_tolerance, 8.0);
        assert_eq!(config.routing.stub_min, 10.0);
    }
}
