use serde::{Deserialize, Serialize};

use crate::config::SnapConfig;
use crate::model::{RectInfo, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Clearance annotation between a dragged shape and its nearest eligible
/// neighbor on one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceBadge {
    pub side: Side,
    pub neighbor_id: String,
    pub gap: f32,
    /// Badge anchor: gap midpoint along the query axis, centered on the
    /// overlapping span.
    pub position: Vec2,
    /// Set when the opposite side's gap matches within the equal-gap
    /// threshold.
    pub equal: bool,
}

/// Perpendicular span shared by two rects on the given axis; negative
/// when they do not overlap.
fn overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    a_max.min(b_max) - a_min.max(b_min)
}

struct SideHit {
    neighbor: usize,
    gap: f32,
    position: Vec2,
}

fn eligible_perpendicular(
    moving: &RectInfo,
    neighbor: &RectInfo,
    horizontal_query: bool,
    config: &SnapConfig,
) -> bool {
    let (m_min, m_max, n_min, n_max, m_center, n_center, m_size, n_size) = if horizontal_query {
        (
            moving.bounds.min_y,
            moving.bounds.max_y,
            neighbor.bounds.min_y,
            neighbor.bounds.max_y,
            moving.center.y,
            neighbor.center.y,
            moving.size.y,
            neighbor.size.y,
        )
    } else {
        (
            moving.bounds.min_x,
            moving.bounds.max_x,
            neighbor.bounds.min_x,
            neighbor.bounds.max_x,
            moving.center.x,
            neighbor.center.x,
            moving.size.x,
            neighbor.size.x,
        )
    };
    if overlap(m_min, m_max, n_min, n_max) >= -config.overlap_slack {
        return true;
    }
    (m_center - n_center).abs() <= (m_size + n_size) / 2.0 + config.center_band_pad
}

/// Badge anchor on the perpendicular axis: center of the true overlap
/// span, or the averaged centers when only the center-band rule applied.
fn perpendicular_anchor(moving: &RectInfo, neighbor: &RectInfo, horizontal_query: bool) -> f32 {
    let (m_min, m_max, n_min, n_max) = if horizontal_query {
        (
            moving.bounds.min_y,
            moving.bounds.max_y,
            neighbor.bounds.min_y,
            neighbor.bounds.max_y,
        )
    } else {
        (
            moving.bounds.min_x,
            moving.bounds.max_x,
            neighbor.bounds.min_x,
            neighbor.bounds.max_x,
        )
    };
    let lo = m_min.max(n_min);
    let hi = m_max.min(n_max);
    if hi > lo {
        (lo + hi) / 2.0
    } else if horizontal_query {
        (moving.center.y + neighbor.center.y) / 2.0
    } else {
        (moving.center.x + neighbor.center.x) / 2.0
    }
}

fn nearest_on_side(
    side: Side,
    moving: &RectInfo,
    neighbors: &[RectInfo],
    config: &SnapConfig,
) -> Option<SideHit> {
    let horizontal_query = matches!(side, Side::Left | Side::Right);
    let mut best: Option<SideHit> = None;
    for (index, neighbor) in neighbors.iter().enumerate() {
        if neighbor.id == moving.id {
            continue;
        }
        if !eligible_perpendicular(moving, neighbor, horizontal_query, config) {
            continue;
        }
        // Strictly on the queried side, gap measured between facing edges.
        let gap = match side {
            Side::Left => moving.bounds.min_x - neighbor.bounds.max_x,
            Side::Right => neighbor.bounds.min_x - moving.bounds.max_x,
            Side::Top => moving.bounds.min_y - neighbor.bounds.max_y,
            Side::Bottom => neighbor.bounds.min_y - moving.bounds.max_y,
        };
        if gap < 0.0 {
            continue;
        }
        if best.as_ref().is_some_and(|hit| hit.gap <= gap) {
            continue;
        }
        let along = match side {
            Side::Left => (neighbor.bounds.max_x + moving.bounds.min_x) / 2.0,
            Side::Right => (moving.bounds.max_x + neighbor.bounds.min_x) / 2.0,
            Side::Top => (neighbor.bounds.max_y + moving.bounds.min_y) / 2.0,
            Side::Bottom => (moving.bounds.max_y + neighbor.bounds.min_y) / 2.0,
        };
        let across = perpendicular_anchor(moving, neighbor, horizontal_query);
        let position = if horizontal_query {
            Vec2::new(along, across)
        } else {
            Vec2::new(across, along)
        };
        best = Some(SideHit {
            neighbor: index,
            gap,
            position,
        });
    }
    best
}

/// Nearest-neighbor clearance in all four directions, with matching
/// left/right (and top/bottom) gaps flagged equal.
pub fn compute_distance_badges(
    moving: &RectInfo,
    neighbors: &[RectInfo],
    config: &SnapConfig,
) -> Vec<DistanceBadge> {
    let hits = [
        (Side::Left, nearest_on_side(Side::Left, moving, neighbors, config)),
        (Side::Right, nearest_on_side(Side::Right, moving, neighbors, config)),
        (Side::Top, nearest_on_side(Side::Top, moving, neighbors, config)),
        (Side::Bottom, nearest_on_side(Side::Bottom, moving, neighbors, config)),
    ];

    let equal_pair = |a: &Option<SideHit>, b: &Option<SideHit>| match (a, b) {
        (Some(left), Some(right)) => (left.gap - right.gap).abs() <= config.equal_gap_threshold,
        _ => false,
    };
    let horizontal_equal = equal_pair(&hits[0].1, &hits[1].1);
    let vertical_equal = equal_pair(&hits[2].1, &hits[3].1);

    hits.into_iter()
        .filter_map(|(side, hit)| {
            let hit = hit?;
            let equal = match side {
                Side::Left | Side::Right => horizontal_equal,
                Side::Top | Side::Bottom => vertical_equal,
            };
            Some(DistanceBadge {
                side,
                neighbor_id: neighbors[hit.neighbor].id.clone(),
                gap: hit.gap,
                position: hit.position,
                equal,
            })
        })
        .collect()
}
