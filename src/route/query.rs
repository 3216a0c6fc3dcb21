use crate::model::Vec2;

use super::{CLOSEST_POINT_HYSTERESIS, MIN_TOTAL_LENGTH};

/// Normal reported for degenerate or near-zero-length polylines.
pub const FALLBACK_NORMAL: Vec2 = Vec2 { x: 0.0, y: -1.0 };

/// Arc-length parameterization of a polyline: cumulative length at each
/// point plus the total.
#[derive(Debug, Clone)]
pub struct PolylineMeasure {
    pub cumulative: Vec<f32>,
    pub total: f32,
}

pub fn measure_polyline(points: &[Vec2]) -> PolylineMeasure {
    let mut cumulative = Vec::with_capacity(points.len());
    if !points.is_empty() {
        cumulative.push(0.0);
    }
    let mut total = 0.0;
    for pair in points.windows(2) {
        total += pair[0].distance_to(pair[1]);
        cumulative.push(total);
    }
    PolylineMeasure { cumulative, total }
}

/// Index of the segment containing arc length `target`, given cumulative
/// lengths. Returns the last segment for targets at or past the end.
fn segment_at_length(measure: &PolylineMeasure, target: f32) -> usize {
    let n = measure.cumulative.len();
    for i in 1..n {
        if measure.cumulative[i] >= target {
            return i - 1;
        }
    }
    n.saturating_sub(2)
}

/// Point at normalized arc-length `t`; `t` is clamped to [0, 1].
/// Near-zero-length polylines resolve to the first point.
pub fn point_at_ratio(points: &[Vec2], t: f32) -> Vec2 {
    let Some(&first) = points.first() else {
        return Vec2::ZERO;
    };
    if points.len() < 2 {
        return first;
    }
    let measure = measure_polyline(points);
    if measure.total <= MIN_TOTAL_LENGTH {
        return first;
    }
    let t = t.clamp(0.0, 1.0);
    if t <= 0.0 {
        return first;
    }
    if t >= 1.0 {
        return points[points.len() - 1];
    }
    let target = measure.total * t;
    let seg = segment_at_length(&measure, target);
    let seg_start = measure.cumulative[seg];
    let seg_len = measure.cumulative[seg + 1] - seg_start;
    if seg_len <= MIN_TOTAL_LENGTH {
        return points[seg];
    }
    let local = (target - seg_start) / seg_len;
    points[seg].lerp(points[seg + 1], local)
}

/// Unit perpendicular `(-dy, dx)` of the segment containing ratio `t`.
/// Degenerate polylines and zero-length segments get [`FALLBACK_NORMAL`].
pub fn normal_at_ratio(points: &[Vec2], t: f32) -> Vec2 {
    if points.len() < 2 {
        return FALLBACK_NORMAL;
    }
    let measure = measure_polyline(points);
    if measure.total <= MIN_TOTAL_LENGTH {
        return FALLBACK_NORMAL;
    }
    let target = measure.total * t.clamp(0.0, 1.0);
    let seg = segment_at_length(&measure, target);
    let delta = points[seg + 1] - points[seg];
    let len = delta.length();
    if len <= MIN_TOTAL_LENGTH {
        return FALLBACK_NORMAL;
    }
    Vec2::new(-delta.y / len, delta.x / len)
}

/// Label anchor: the point at `ratio` displaced along the local normal by
/// `offset`.
pub fn label_anchor(points: &[Vec2], ratio: f32, offset: f32) -> Vec2 {
    let base = point_at_ratio(points, ratio);
    if offset == 0.0 {
        return base;
    }
    base + normal_at_ratio(points, ratio) * offset
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    pub point: Vec2,
    /// Index of the segment the projection landed on.
    pub segment: usize,
    /// Position within that segment, in [0, 1].
    pub t: f32,
    pub distance: f32,
}

/// Projects `probe` onto every segment (clamped) and keeps the minimum
/// distance hit. A later segment must beat the incumbent by more than the
/// hysteresis epsilon, so repeated calls with near-identical inputs keep
/// selecting the earlier segment instead of oscillating.
pub fn closest_point_on_polyline(points: &[Vec2], probe: Vec2) -> Option<ClosestPoint> {
    if points.is_empty() {
        return None;
    }
    if points.len() == 1 {
        return Some(ClosestPoint {
            point: points[0],
            segment: 0,
            t: 0.0,
            distance: probe.distance_to(points[0]),
        });
    }
    let mut best: Option<ClosestPoint> = None;
    for (i, pair) in points.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let delta = b - a;
        let len_sq = delta.x * delta.x + delta.y * delta.y;
        let t = if len_sq <= MIN_TOTAL_LENGTH {
            0.0
        } else {
            (((probe.x - a.x) * delta.x + (probe.y - a.y) * delta.y) / len_sq).clamp(0.0, 1.0)
        };
        let point = a.lerp(b, t);
        let distance = probe.distance_to(point);
        let better = match &best {
            None => true,
            Some(current) => distance + CLOSEST_POINT_HYSTERESIS < current.distance,
        };
        if better {
            best = Some(ClosestPoint {
                point,
                segment: i,
                t,
                distance,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn elbow() -> Vec<Vec2> {
        vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 50.0)]
    }

    #[test]
    fn ratio_endpoints_hit_first_and_last_point() {
        let points = elbow();
        assert_eq!(point_at_ratio(&points, 0.0), points[0]);
        assert_eq!(point_at_ratio(&points, 1.0), *points.last().unwrap());
    }

    #[test]
    fn ratio_is_arc_length_parameterized() {
        // Total length 150; t=0.5 lands 75 along, i.e. (75, 0).
        let mid = point_at_ratio(&elbow(), 0.5);
        assert!((mid.x - 75.0).abs() < 1e-4 && mid.y.abs() < 1e-4, "got {mid:?}");
    }

    #[test]
    fn ratio_is_clamped_outside_unit_range() {
        let points = elbow();
        assert_eq!(point_at_ratio(&points, -3.0), points[0]);
        assert_eq!(point_at_ratio(&points, 7.0), *points.last().unwrap());
    }

    #[test]
    fn degenerate_polyline_returns_first_point() {
        let points = vec![p(4.0, 4.0), p(4.0, 4.0)];
        assert_eq!(point_at_ratio(&points, 0.7), p(4.0, 4.0));
        assert_eq!(normal_at_ratio(&points, 0.7), FALLBACK_NORMAL);
    }

    #[test]
    fn normal_is_unit_perpendicular() {
        // First leg runs +x, so its normal is (0, 1) under (-dy, dx).
        let normal = normal_at_ratio(&elbow(), 0.25);
        assert_eq!(normal, p(0.0, 1.0));
        // Second leg runs +y, normal (-1, 0).
        let normal = normal_at_ratio(&elbow(), 0.9);
        assert_eq!(normal, p(-1.0, 0.0));
    }

    #[test]
    fn label_anchor_offsets_along_normal() {
        let anchor = label_anchor(&elbow(), 0.25, 5.0);
        assert!((anchor.x - 37.5).abs() < 1e-3 && (anchor.y - 5.0).abs() < 1e-3, "got {anchor:?}");
    }

    #[test]
    fn closest_point_projects_and_clamps() {
        let hit = closest_point_on_polyline(&elbow(), p(50.0, 20.0)).unwrap();
        assert_eq!(hit.segment, 0);
        assert_eq!(hit.point, p(50.0, 0.0));
        assert!((hit.distance - 20.0).abs() < 1e-4);

        let hit = closest_point_on_polyline(&elbow(), p(-30.0, -40.0)).unwrap();
        assert_eq!(hit.point, p(0.0, 0.0), "probe before the start should clamp");
    }

    #[test]
    fn closest_point_tie_prefers_earlier_segment() {
        // The corner (100, 0) belongs to both segments; the earlier one
        // must win so repeated hit-tests stay stable.
        let hit = closest_point_on_polyline(&elbow(), p(100.0, 0.0)).unwrap();
        assert_eq!(hit.segment, 0);
        assert_eq!(hit.t, 1.0);
    }

    #[test]
    fn closest_point_on_empty_polyline_is_none() {
        assert!(closest_point_on_polyline(&[], p(0.0, 0.0)).is_none());
    }

    #[test]
    fn measure_accumulates_segment_lengths() {
        let measure = measure_polyline(&elbow());
        assert_eq!(measure.cumulative, vec![0.0, 100.0, 150.0]);
        assert_eq!(measure.total, 150.0);
    }
}
