mod endpoint;
mod query;
mod rounded;
mod tidy;

pub use endpoint::{ResolvedEndpoint, resolve_endpoint};
pub use query::{
    ClosestPoint, FALLBACK_NORMAL, PolylineMeasure, closest_point_on_polyline, label_anchor,
    measure_polyline, normal_at_ratio, point_at_ratio,
};
pub use rounded::{PathCommand, build_rounded_path};
pub use tidy::{dedup_waypoints, tidy_orthogonal_waypoints};

use serde::{Deserialize, Serialize};

use crate::config::RoutingConfig;
use crate::model::{ConnectorModel, Scene, Vec2};

// ── Numeric epsilons ────────────────────────────────────────────────
/// Adjacent points closer than this (per coordinate) are merged; also the
/// colinearity tolerance for waypoint cleanup.
pub(crate) const POINT_MERGE_EPSILON: f32 = 1e-3;
/// Corner radii at or below this render as hard corners.
pub(crate) const CORNER_RADIUS_EPSILON: f32 = 1e-3;
/// Polylines shorter than this are treated as a single point.
pub(crate) const MIN_TOTAL_LENGTH: f32 = 1e-6;
/// A later segment must beat the incumbent closest-point candidate by
/// this much, keeping hit-tests stable at corners.
pub(crate) const CLOSEST_POINT_HYSTERESIS: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentAxis {
    Horizontal,
    Vertical,
}

/// One leg of a routed polyline with its axis classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub axis: SegmentAxis,
    pub length: f32,
}

/// Derived connector geometry. Recomputed from the scene snapshot on
/// every query; never cached across node moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorPath {
    pub start: Vec2,
    pub end: Vec2,
    /// Interior waypoints, i.e. `points` minus the two endpoints.
    pub waypoints: Vec<Vec2>,
    pub points: Vec<Vec2>,
    pub segments: Vec<PathSegment>,
    pub total_length: f32,
}

fn classify_segment(start: Vec2, end: Vec2) -> PathSegment {
    let delta = end - start;
    let axis = if delta.y.abs() <= delta.x.abs() {
        SegmentAxis::Horizontal
    } else {
        SegmentAxis::Vertical
    };
    PathSegment {
        start,
        end,
        axis,
        length: delta.length(),
    }
}

fn assemble(start: Vec2, interior: Vec<Vec2>, end: Vec2) -> ConnectorPath {
    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(start);
    points.extend(interior);
    points.push(end);
    let points = dedup_waypoints(&points);
    let segments: Vec<PathSegment> = points
        .windows(2)
        .map(|pair| classify_segment(pair[0], pair[1]))
        .collect();
    let total_length = segments.iter().map(|segment| segment.length).sum();
    let waypoints = if points.len() > 2 {
        points[1..points.len() - 1].to_vec()
    } else {
        Vec::new()
    };
    ConnectorPath {
        start,
        end,
        waypoints,
        points,
        segments,
        total_length,
    }
}

/// Routes one connector against the current scene.
///
/// User-authored waypoints, when present, are deduplicated and used
/// as-is. Otherwise an orthogonal route is synthesized: a stub leaves
/// each attached end along its outward direction, and at most one bend
/// joins the two stub points, traveling the axis with the larger offset
/// first. Colinear interior points are merged away before the path is
/// measured.
pub fn route_connector(
    connector: &ConnectorModel,
    scene: &Scene,
    config: &RoutingConfig,
) -> ConnectorPath {
    let source = resolve_endpoint(&connector.source, scene);
    let target = resolve_endpoint(&connector.target, scene);

    if let Some(user_points) = &connector.points {
        let waypoints = dedup_waypoints(user_points);
        return assemble(source.point, waypoints, target.point);
    }

    let stub = config.stub_length(connector.style.stroke_width);
    let mut raw: Vec<Vec2> = Vec::with_capacity(3);

    // Stub point per attached end; a floating end routes from the
    // endpoint itself.
    let from = match source.direction {
        Some(direction) => {
            let point = source.point + direction.unit() * stub;
            raw.push(point);
            point
        }
        None => source.point,
    };
    let to = match target.direction {
        Some(direction) => target.point + direction.unit() * stub,
        None => target.point,
    };

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > POINT_MERGE_EPSILON && dy.abs() > POINT_MERGE_EPSILON {
        // Aligned on neither axis: exactly one bend, horizontal-first
        // when the x offset dominates.
        let bend = if dx.abs() >= dy.abs() {
            Vec2::new(to.x, from.y)
        } else {
            Vec2::new(from.x, to.y)
        };
        raw.push(bend);
    }
    if target.direction.is_some() {
        raw.push(to);
    }

    let waypoints = tidy_orthogonal_waypoints(source.point, &raw, target.point);
    assemble(source.point, waypoints, target.point)
}
