use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A point or displacement in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle. Invariant: `min_x <= max_x`, `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        let w = size.x.max(0.0);
        let h = size.y.max(0.0);
        Self {
            min_x: position.x,
            min_y: position.y,
            max_x: position.x + w,
            max_y: position.y + h,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

/// World axis a snap guide or spacing handle operates on. Vertical
/// guides align x coordinates; horizontal guides align y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// One of the four attachment points on a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Port {
    Top,
    Right,
    Bottom,
    Left,
}

impl Port {
    /// Fixed outward direction for a port; all routing math relies on
    /// ports being exactly these four cardinals.
    pub fn outward(self) -> Direction {
        match self {
            Port::Top => Direction::Up,
            Port::Right => Direction::Right,
            Port::Bottom => Direction::Down,
            Port::Left => Direction::Left,
        }
    }
}

impl FromStr for Port {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "top" => Ok(Port::Top),
            "right" => Ok(Port::Right),
            "bottom" => Ok(Port::Bottom),
            "left" => Ok(Port::Left),
            other => Err(Error::InvalidPort(other.to_string())),
        }
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Port::Top => "top",
            Port::Right => "right",
            Port::Bottom => "bottom",
            Port::Left => "left",
        };
        f.write_str(name)
    }
}

/// Outward direction of a resolved endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Where a connector end lands: pinned to a node port, or free in space.
/// Connectors reference nodes by id only; the scene owns the nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConnectorEndpoint {
    Attached { node_id: String, port: Port },
    Floating { position: Vec2 },
}

impl ConnectorEndpoint {
    pub fn attached(node_id: impl Into<String>, port: Port) -> Self {
        ConnectorEndpoint::Attached {
            node_id: node_id.into(),
            port,
        }
    }

    pub fn floating(position: Vec2) -> Self {
        ConnectorEndpoint::Floating { position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorStyle {
    pub stroke_width: f32,
    pub corner_radius: f32,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            corner_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorModel {
    pub id: String,
    pub source: ConnectorEndpoint,
    pub target: ConnectorEndpoint,
    /// User-authored interior waypoints. When present they override
    /// auto-routing; cleared to force a re-route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Vec2>>,
    #[serde(default)]
    pub style: ConnectorStyle,
    /// Label position as a ratio of total path length in [0, 1].
    #[serde(default = "default_label_position")]
    pub label_position: f32,
    /// Perpendicular displacement of the label from the path.
    #[serde(default)]
    pub label_offset: f32,
}

fn default_label_position() -> f32 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeModel {
    pub id: String,
    pub position: Vec2,
    pub size: Vec2,
}

impl NodeModel {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_position_size(self.position, self.size)
    }
}

/// Read-only projection of a node used by the snap engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectInfo {
    pub id: String,
    pub bounds: Bounds,
    pub center: Vec2,
    pub size: Vec2,
}

impl RectInfo {
    pub fn new(id: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            center: bounds.center(),
            size: bounds.size(),
            bounds,
        }
    }

    pub fn from_node(node: &NodeModel) -> Self {
        Self::new(node.id.clone(), node.bounds())
    }
}

/// Immutable snapshot of the scene handed in by the host on every
/// interaction tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub nodes: Vec<NodeModel>,
    #[serde(default)]
    pub connectors: Vec<ConnectorModel>,
}

impl Scene {
    pub fn node(&self, id: &str) -> Option<&NodeModel> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_center_and_size() {
        let bounds = Bounds::from_position_size(Vec2::new(10.0, 20.0), Vec2::new(100.0, 60.0));
        assert_eq!(bounds.center(), Vec2::new(60.0, 50.0));
        assert_eq!(bounds.size(), Vec2::new(100.0, 60.0));
    }

    #[test]
    fn port_parse_accepts_cardinals() {
        assert_eq!("top".parse::<Port>().unwrap(), Port::Top);
        assert_eq!("left".parse::<Port>().unwrap(), Port::Left);
    }

    #[test]
    fn port_parse_rejects_non_cardinal() {
        let err = "top-left".parse::<Port>().unwrap_err();
        assert!(
            matches!(err, Error::InvalidPort(ref name) if name == "top-left"),
            "expected InvalidPort, got {err:?}"
        );
    }

    #[test]
    fn endpoint_json_round_trips_tagged_variants() {
        let attached = ConnectorEndpoint::attached("a", Port::Right);
        let json = serde_json::to_string(&attached).unwrap();
        assert!(json.contains("\"kind\":\"attached\""), "unexpected json: {json}");
        let back: ConnectorEndpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attached);
    }

    #[test]
    fn endpoint_json_rejects_unknown_port() {
        let json = r#"{"kind":"attached","node_id":"a","port":"center"}"#;
        assert!(serde_json::from_str::<ConnectorEndpoint>(json).is_err());
    }
}
