mod distance;
mod spacing;

pub use distance::{DistanceBadge, Side, compute_distance_badges};
pub use spacing::{SmartSelectionHandle, SmartSelectionResult, detect_smart_selection};

use serde::{Deserialize, Serialize};

use crate::config::SnapConfig;
use crate::model::{Axis, RectInfo};

// ── Tie-break epsilon ───────────────────────────────────────────────
/// Deltas within this of each other count as equal when ranking
/// candidates, letting the kind preference decide.
const DELTA_TIE_EPSILON: f32 = 1e-3;

/// Which feature of a shape an alignment candidate uses on its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapEdge {
    /// Left or top edge, depending on axis.
    Start,
    /// Right or bottom edge.
    End,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapKind {
    Center,
    Edge,
}

/// Rendered guide geometry: a line at `position` on the snapped axis,
/// spanning `[start, end]` on the perpendicular axis across both shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub position: f32,
    pub start: f32,
    pub end: f32,
}

/// A candidate or active alignment. `delta` is the translation (along
/// `axis`) that satisfies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapMatch {
    pub axis: Axis,
    pub edge: SnapEdge,
    pub neighbor_edge: SnapEdge,
    pub kind: SnapKind,
    /// Coordinate the moving edge snaps to.
    pub target: f32,
    pub neighbor_id: String,
    pub delta: f32,
    pub line: GuideLine,
}

/// Sticky per-axis locks held by the caller across interaction frames.
/// The engine itself keeps no state; continuity comes purely from the
/// host re-feeding the previous tick's locks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveSnapLocks {
    pub x: Option<SnapMatch>,
    pub y: Option<SnapMatch>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmartGuideResult {
    /// Winning match per axis; its delta aligns the moving shape.
    pub x: Option<SnapMatch>,
    pub y: Option<SnapMatch>,
    /// Every in-tolerance candidate found, for guide rendering.
    pub candidates: Vec<SnapMatch>,
}

impl SmartGuideResult {
    /// Locks to feed back on the next tick.
    pub fn locks(&self) -> ActiveSnapLocks {
        ActiveSnapLocks {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

fn edge_coord(rect: &RectInfo, axis: Axis, edge: SnapEdge) -> f32 {
    match (axis, edge) {
        (Axis::X, SnapEdge::Start) => rect.bounds.min_x,
        (Axis::X, SnapEdge::End) => rect.bounds.max_x,
        (Axis::X, SnapEdge::Center) => rect.center.x,
        (Axis::Y, SnapEdge::Start) => rect.bounds.min_y,
        (Axis::Y, SnapEdge::End) => rect.bounds.max_y,
        (Axis::Y, SnapEdge::Center) => rect.center.y,
    }
}

/// Guide span on the perpendicular axis, covering both shapes. The delta
/// is along the snapped axis, so the moving shape's perpendicular extent
/// is unaffected by the snap itself.
fn guide_line(moving: &RectInfo, neighbor: &RectInfo, axis: Axis, target: f32) -> GuideLine {
    let (moving_min, moving_max, other_min, other_max) = match axis {
        Axis::X => (
            moving.bounds.min_y,
            moving.bounds.max_y,
            neighbor.bounds.min_y,
            neighbor.bounds.max_y,
        ),
        Axis::Y => (
            moving.bounds.min_x,
            moving.bounds.max_x,
            neighbor.bounds.min_x,
            neighbor.bounds.max_x,
        ),
    };
    GuideLine {
        position: target,
        start: moving_min.min(other_min),
        end: moving_max.max(other_max),
    }
}

const EDGE_PAIRS: [(SnapEdge, SnapEdge); 5] = [
    (SnapEdge::Start, SnapEdge::Start),
    (SnapEdge::End, SnapEdge::End),
    (SnapEdge::Start, SnapEdge::End),
    (SnapEdge::End, SnapEdge::Start),
    (SnapEdge::Center, SnapEdge::Center),
];

fn make_match(
    moving: &RectInfo,
    neighbor: &RectInfo,
    axis: Axis,
    edge: SnapEdge,
    neighbor_edge: SnapEdge,
) -> SnapMatch {
    let moving_coord = edge_coord(moving, axis, edge);
    let target = edge_coord(neighbor, axis, neighbor_edge);
    let kind = if edge == SnapEdge::Center && neighbor_edge == SnapEdge::Center {
        SnapKind::Center
    } else {
        SnapKind::Edge
    };
    SnapMatch {
        axis,
        edge,
        neighbor_edge,
        kind,
        target,
        neighbor_id: neighbor.id.clone(),
        delta: target - moving_coord,
        line: guide_line(moving, neighbor, axis, target),
    }
}

/// Re-checks a previous tick's lock against the neighbor's current
/// position. While it still holds within tolerance it is refreshed and
/// reused, so guides do not flicker between equally good candidates
/// mid-drag.
fn revalidate_lock(
    lock: &SnapMatch,
    moving: &RectInfo,
    neighbors: &[&RectInfo],
    center_only: bool,
    config: &SnapConfig,
) -> Option<SnapMatch> {
    if center_only && lock.kind != SnapKind::Center {
        return None;
    }
    let neighbor = neighbors
        .iter()
        .copied()
        .find(|rect| rect.id == lock.neighbor_id)?;
    let refreshed = make_match(moving, neighbor, lock.axis, lock.edge, lock.neighbor_edge);
    (refreshed.delta.abs() <= config.snap_tolerance).then_some(refreshed)
}

/// Ranks candidates: nearer neighbor first, then smaller |delta|, then
/// center matches over edge matches, then smaller delta. The precedence
/// is kept exactly as observed in production snapping; see DESIGN.md.
fn better(a: &SnapMatch, a_rank: usize, b: &SnapMatch, b_rank: usize) -> bool {
    if a_rank != b_rank {
        return a_rank < b_rank;
    }
    let (abs_a, abs_b) = (a.delta.abs(), b.delta.abs());
    if (abs_a - abs_b).abs() > DELTA_TIE_EPSILON {
        return abs_a < abs_b;
    }
    if a.kind != b.kind {
        return a.kind == SnapKind::Center;
    }
    a.delta < b.delta
}

fn resolve_axis(
    axis: Axis,
    moving: &RectInfo,
    ranked: &[&RectInfo],
    lock: Option<&SnapMatch>,
    center_only: bool,
    config: &SnapConfig,
    candidates: &mut Vec<SnapMatch>,
) -> Option<SnapMatch> {
    if let Some(lock) = lock
        && lock.axis == axis
        && let Some(refreshed) = revalidate_lock(lock, moving, ranked, center_only, config)
    {
        candidates.push(refreshed.clone());
        return Some(refreshed);
    }

    let mut best: Option<(SnapMatch, usize)> = None;
    let near = config.nearest_first.min(ranked.len());
    for (phase_start, phase_end) in [(0, near), (near, ranked.len())] {
        for (offset, neighbor) in ranked[phase_start..phase_end].iter().enumerate() {
            let rank = phase_start + offset;
            for (edge, neighbor_edge) in EDGE_PAIRS {
                if center_only && edge != SnapEdge::Center {
                    continue;
                }
                let candidate = make_match(moving, neighbor, axis, edge, neighbor_edge);
                if candidate.delta.abs() > config.snap_tolerance {
                    continue;
                }
                candidates.push(candidate.clone());
                let take = match &best {
                    None => true,
                    Some((current, current_rank)) => {
                        better(&candidate, rank, current, *current_rank)
                    }
                };
                if take {
                    best = Some((candidate, rank));
                }
            }
        }
        // The nearest few usually settle it; only scan the rest when they
        // produced nothing.
        if best.is_some() {
            break;
        }
    }
    best.map(|(found, _)| found)
}

/// Per-axis best-alignment search across neighbor shapes.
///
/// `locks` are the previous tick's winners; a still-valid lock wins
/// outright. Otherwise neighbors are ranked by center distance and the
/// nearest few searched first, falling back to the remainder only when
/// they yield nothing. `center_only` (modifier held) restricts matching
/// to center-to-center candidates.
pub fn compute_smart_guides(
    moving: &RectInfo,
    neighbors: &[RectInfo],
    locks: &ActiveSnapLocks,
    center_only: bool,
    config: &SnapConfig,
) -> SmartGuideResult {
    let mut ranked: Vec<&RectInfo> = neighbors
        .iter()
        .filter(|rect| rect.id != moving.id)
        .collect();
    ranked.sort_by(|a, b| {
        let da = a.center.distance_to(moving.center);
        let db = b.center.distance_to(moving.center);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut candidates = Vec::new();
    let x = resolve_axis(
        Axis::X,
        moving,
        &ranked,
        locks.x.as_ref(),
        center_only,
        config,
        &mut candidates,
    );
    let y = resolve_axis(
        Axis::Y,
        moving,
        &ranked,
        locks.y.as_ref(),
        center_only,
        config,
        &mut candidates,
    );
    SmartGuideResult { x, y, candidates }
}
