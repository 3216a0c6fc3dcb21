use serde::{Deserialize, Serialize};

use crate::model::Vec2;

use super::{CORNER_RADIUS_EPSILON, MIN_TOTAL_LENGTH};

/// Backend-agnostic path primitive; each renderer serializes these into
/// its own path syntax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: Vec2 },
    LineTo { to: Vec2 },
    QuadTo { control: Vec2, to: Vec2 },
}

/// Emits a connector outline with rounded corners.
///
/// For `radius` at or below epsilon the polyline is traced with straight
/// lines. Otherwise each interior vertex is trimmed by
/// `min(radius, half the adjacent segment length)` on both sides and the
/// trim points are joined with a quadratic through the original vertex,
/// so the rounding can never overrun an adjacent segment however short
/// it is.
pub fn build_rounded_path(points: &[Vec2], radius: f32) -> Vec<PathCommand> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut commands = vec![PathCommand::MoveTo { to: first }];
    if points.len() < 2 {
        return commands;
    }
    if radius <= CORNER_RADIUS_EPSILON {
        for &point in &points[1..] {
            commands.push(PathCommand::LineTo { to: point });
        }
        return commands;
    }

    for i in 1..points.len() - 1 {
        let prev = points[i - 1];
        let vertex = points[i];
        let next = points[i + 1];
        let len_in = prev.distance_to(vertex);
        let len_out = vertex.distance_to(next);
        if len_in <= MIN_TOTAL_LENGTH || len_out <= MIN_TOTAL_LENGTH {
            commands.push(PathCommand::LineTo { to: vertex });
            continue;
        }
        let trim_in = radius.min(len_in / 2.0);
        let trim_out = radius.min(len_out / 2.0);
        let entry = vertex + (prev - vertex) * (trim_in / len_in);
        let exit = vertex + (next - vertex) * (trim_out / len_out);
        commands.push(PathCommand::LineTo { to: entry });
        commands.push(PathCommand::QuadTo {
            control: vertex,
            to: exit,
        });
    }
    commands.push(PathCommand::LineTo {
        to: points[points.len() - 1],
    });
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn traced_points(commands: &[PathCommand]) -> Vec<Vec2> {
        commands
            .iter()
            .map(|command| match command {
                PathCommand::MoveTo { to }
                | PathCommand::LineTo { to }
                | PathCommand::QuadTo { to, .. } => *to,
            })
            .collect()
    }

    #[test]
    fn zero_radius_traces_the_polyline() {
        let points = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 50.0)];
        let commands = build_rounded_path(&points, 0.0);
        assert_eq!(traced_points(&commands), points);
        assert!(
            commands[1..]
                .iter()
                .all(|c| matches!(c, PathCommand::LineTo { .. })),
            "zero radius must not emit curves"
        );
    }

    #[test]
    fn corner_becomes_trimmed_quadratic() {
        let points = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 50.0)];
        let commands = build_rounded_path(&points, 8.0);
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo { to: p(0.0, 0.0) },
                PathCommand::LineTo { to: p(92.0, 0.0) },
                PathCommand::QuadTo {
                    control: p(100.0, 0.0),
                    to: p(100.0, 8.0),
                },
                PathCommand::LineTo { to: p(100.0, 50.0) },
            ]
        );
    }

    #[test]
    fn radius_never_overruns_a_short_segment() {
        // Middle segment is only 6 long; trim is capped at 3 on each side.
        let points = vec![p(0.0, 0.0), p(40.0, 0.0), p(40.0, 6.0), p(80.0, 6.0)];
        let commands = build_rounded_path(&points, 20.0);
        let quads: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                PathCommand::QuadTo { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(quads[0], p(40.0, 3.0), "first corner exit past segment midpoint");
    }

    #[test]
    fn single_point_is_just_a_move() {
        let commands = build_rounded_path(&[p(3.0, 4.0)], 8.0);
        assert_eq!(commands, vec![PathCommand::MoveTo { to: p(3.0, 4.0) }]);
    }
}
