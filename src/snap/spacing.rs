use serde::{Deserialize, Serialize};

use crate::config::SnapConfig;
use crate::model::{Axis, RectInfo, Vec2};

/// Draggable spacing-equalization control between two adjacent shapes of
/// an aligned selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartSelectionHandle {
    pub id: String,
    pub axis: Axis,
    /// Handle anchor at the gap midpoint.
    pub position: Vec2,
    /// Shape just before the gap; it and everything earlier stay fixed
    /// when the handle is dragged.
    pub before_id: String,
    /// Every shape from the gap onward, in axis order. Dragging the
    /// handle ripples all of these while earlier shapes stay put.
    pub affected_ids: Vec<String>,
    /// Clearance between the adjacent pair, clamped at zero.
    pub gap: f32,
    /// Signed clearance; negative when the pair overlaps.
    pub raw_gap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartSelectionResult {
    pub axis: Axis,
    /// Selection ids sorted along the dominant axis.
    pub order: Vec<String>,
    pub handles: Vec<SmartSelectionHandle>,
    /// True when every gap sits within the spacing tolerance of the mean;
    /// an external equalize operation sets all gaps to `mean_gap`.
    pub is_uniform: bool,
    pub mean_gap: f32,
}

fn center_range(rects: &[RectInfo], axis: Axis) -> f32 {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for rect in rects {
        let c = match axis {
            Axis::X => rect.center.x,
            Axis::Y => rect.center.y,
        };
        min = min.min(c);
        max = max.max(c);
    }
    max - min
}

/// Dominant spread axis of an aligned selection: shapes aligned in y form
/// a row (axis X) and vice versa; aligned both ways, the wider spread
/// wins; aligned neither way, there is no dominant axis.
fn dominant_axis(rects: &[RectInfo], tolerance: f32) -> Option<Axis> {
    let range_x = center_range(rects, Axis::X);
    let range_y = center_range(rects, Axis::Y);
    let row = range_y <= tolerance;
    let column = range_x <= tolerance;
    match (row, column) {
        (true, true) => Some(if range_x >= range_y { Axis::X } else { Axis::Y }),
        (true, false) => Some(Axis::X),
        (false, true) => Some(Axis::Y),
        (false, false) => None,
    }
}

/// Detects a uniformly spaceable selection: at least three shapes aligned
/// along one axis. Returns gap-equalization handles for each adjacent
/// pair, or `None` when the selection has no dominant axis.
pub fn detect_smart_selection(
    rects: &[RectInfo],
    config: &SnapConfig,
) -> Option<SmartSelectionResult> {
    if rects.len() < 3 {
        return None;
    }
    let axis = dominant_axis(rects, config.alignment_tolerance)?;

    let mut sorted: Vec<&RectInfo> = rects.iter().collect();
    sorted.sort_by(|a, b| {
        let (ca, cb) = match axis {
            Axis::X => (a.center.x, b.center.x),
            Axis::Y => (a.center.y, b.center.y),
        };
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut handles = Vec::with_capacity(sorted.len() - 1);
    let mut gap_sum = 0.0;
    for i in 0..sorted.len() - 1 {
        let before = sorted[i];
        let after = sorted[i + 1];
        let raw_gap = match axis {
            Axis::X => after.bounds.min_x - before.bounds.max_x,
            Axis::Y => after.bounds.min_y - before.bounds.max_y,
        };
        gap_sum += raw_gap;
        let along = match axis {
            Axis::X => (before.bounds.max_x + after.bounds.min_x) / 2.0,
            Axis::Y => (before.bounds.max_y + after.bounds.min_y) / 2.0,
        };
        let across = match axis {
            Axis::X => (before.center.y + after.center.y) / 2.0,
            Axis::Y => (before.center.x + after.center.x) / 2.0,
        };
        let position = match axis {
            Axis::X => Vec2::new(along, across),
            Axis::Y => Vec2::new(across, along),
        };
        handles.push(SmartSelectionHandle {
            id: format!("{}:{}", before.id, after.id),
            axis,
            position,
            before_id: before.id.clone(),
            affected_ids: sorted[i + 1..].iter().map(|rect| rect.id.clone()).collect(),
            gap: raw_gap.max(0.0),
            raw_gap,
        });
    }

    let mean_gap = gap_sum / handles.len() as f32;
    let is_uniform = handles
        .iter()
        .all(|handle| (handle.raw_gap - mean_gap).abs() <= config.spacing_tolerance);

    Some(SmartSelectionResult {
        axis,
        order: sorted.iter().map(|rect| rect.id.clone()).collect(),
        handles,
        is_uniform,
        mean_gap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bounds;

    fn rect(id: &str, x: f32, y: f32, w: f32, h: f32) -> RectInfo {
        RectInfo::new(
            id,
            Bounds {
                min_x: x,
                min_y: y,
                max_x: x + w,
                max_y: y + h,
            },
        )
    }

    fn row(xs: &[f32], width: f32) -> Vec<RectInfo> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| rect(&format!("r{i}"), x, 0.0, width, 60.0))
            .collect()
    }

    #[test]
    fn fewer_than_three_rects_yields_none() {
        let rects = row(&[0.0, 140.0], 100.0);
        assert!(detect_smart_selection(&rects, &SnapConfig::default()).is_none());
    }

    #[test]
    fn unaligned_selection_yields_none() {
        let rects = vec![
            rect("a", 0.0, 0.0, 50.0, 50.0),
            rect("b", 100.0, 90.0, 50.0, 50.0),
            rect("c", 200.0, 180.0, 50.0, 50.0),
        ];
        assert!(detect_smart_selection(&rects, &SnapConfig::default()).is_none());
    }

    #[test]
    fn uniform_row_is_detected() {
        let rects = row(&[0.0, 140.0, 280.0], 100.0);
        let result = detect_smart_selection(&rects, &SnapConfig::default()).unwrap();
        assert_eq!(result.axis, Axis::X);
        assert_eq!(result.handles.len(), 2);
        assert!(result.is_uniform);
        assert_eq!(result.mean_gap, 40.0);
        assert_eq!(result.handles[0].position, Vec2::new(120.0, 30.0));
    }

    #[test]
    fn deviating_gap_breaks_uniformity() {
        // Gaps 100, 110, 100; the 110 gap is 6.7 off the mean, beyond the
        // spacing tolerance of 2.
        let rects = vec![
            rect("a", 0.0, 0.0, 0.0, 60.0),
            rect("b", 100.0, 0.0, 0.0, 60.0),
            rect("c", 210.0, 0.0, 0.0, 60.0),
            rect("d", 310.0, 0.0, 0.0, 60.0),
        ];
        let result = detect_smart_selection(&rects, &SnapConfig::default()).unwrap();
        assert_eq!(result.axis, Axis::X);
        assert!(!result.is_uniform);
        assert!((result.mean_gap - 103.333_3).abs() < 1e-3);
    }

    #[test]
    fn handles_ripple_later_shapes_only() {
        let rects = row(&[0.0, 140.0, 280.0, 420.0], 100.0);
        let result = detect_smart_selection(&rects, &SnapConfig::default()).unwrap();
        assert_eq!(result.order, vec!["r0", "r1", "r2", "r3"]);
        assert_eq!(result.handles[0].before_id, "r0");
        assert_eq!(result.handles[0].affected_ids, vec!["r1", "r2", "r3"]);
        assert_eq!(result.handles[2].affected_ids, vec!["r3"]);
    }

    #[test]
    fn column_selection_uses_y_axis() {
        let rects = vec![
            rect("a", 0.0, 0.0, 80.0, 40.0),
            rect("b", 2.0, 90.0, 80.0, 40.0),
            rect("c", -3.0, 180.0, 80.0, 40.0),
        ];
        let result = detect_smart_selection(&rects, &SnapConfig::default()).unwrap();
        assert_eq!(result.axis, Axis::Y);
        assert_eq!(result.handles[0].gap, 50.0);
    }

    #[test]
    fn overlapping_pair_reports_negative_raw_gap() {
        let rects = row(&[0.0, 80.0, 200.0], 100.0);
        let result = detect_smart_selection(&rects, &SnapConfig::default()).unwrap();
        assert_eq!(result.handles[0].raw_gap, -20.0);
        assert_eq!(result.handles[0].gap, 0.0);
    }
}
