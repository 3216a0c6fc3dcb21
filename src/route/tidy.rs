use crate::model::Vec2;

use super::POINT_MERGE_EPSILON;

fn nearly_equal(a: f32, b: f32) -> bool {
    (a - b).abs() <= POINT_MERGE_EPSILON
}

fn same_point(a: Vec2, b: Vec2) -> bool {
    nearly_equal(a.x, b.x) && nearly_equal(a.y, b.y)
}

fn colinear(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (nearly_equal(a.x, b.x) && nearly_equal(c.x, b.x))
        || (nearly_equal(a.y, b.y) && nearly_equal(c.y, b.y))
}

/// Drops consecutive near-duplicate points, keeping the first of each run.
pub fn dedup_waypoints(points: &[Vec2]) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(points.len());
    for &point in points {
        match out.last() {
            Some(&last) if same_point(last, point) => {}
            _ => out.push(point),
        }
    }
    out
}

/// Collapses the interior waypoints of `[start, waypoints, end]`:
/// consecutive near-duplicates are stripped, and any interior point whose
/// neighbors share its x or its y is merged away. Returns the tidied
/// interior waypoints.
///
/// Idempotent: tidying an already-tidy list returns it unchanged. On
/// orthogonal input it never produces a non-orthogonal segment, since a
/// point is only removed when all three involved points share a
/// coordinate.
pub fn tidy_orthogonal_waypoints(start: Vec2, waypoints: &[Vec2], end: Vec2) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(waypoints.len() + 2);
    out.push(start);
    for &point in waypoints.iter().chain(std::iter::once(&end)) {
        if let Some(&last) = out.last()
            && same_point(last, point)
        {
            continue;
        }
        out.push(point);
        // Removing a midpoint can expose a new colinear triple ending at
        // the same spot, so collapse until the tail is stable.
        while out.len() >= 3 {
            let n = out.len();
            if colinear(out[n - 3], out[n - 2], out[n - 1]) {
                out.remove(n - 2);
            } else {
                break;
            }
        }
    }
    if out.len() <= 2 {
        return Vec::new();
    }
    out[1..out.len() - 1].to_vec()
}
