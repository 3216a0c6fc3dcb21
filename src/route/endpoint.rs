use crate::model::{ConnectorEndpoint, Direction, Port, Scene, Vec2};

/// World anchor for a connector end plus the direction routing should
/// leave it in. Floating ends have no outward direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedEndpoint {
    pub point: Vec2,
    pub direction: Option<Direction>,
}

impl ResolvedEndpoint {
    fn free(point: Vec2) -> Self {
        Self {
            point,
            direction: None,
        }
    }
}

/// Resolves an endpoint descriptor against the current scene.
///
/// An attached end lands on the midpoint of the named edge of the node's
/// bounding box. A node deleted mid-drag resolves to the origin with no
/// direction; that is a documented fallback, not an error — the host is
/// expected to re-route or drop the connector on its next consistency
/// pass.
pub fn resolve_endpoint(endpoint: &ConnectorEndpoint, scene: &Scene) -> ResolvedEndpoint {
    match endpoint {
        ConnectorEndpoint::Floating { position } => ResolvedEndpoint::free(*position),
        ConnectorEndpoint::Attached { node_id, port } => {
            let Some(node) = scene.node(node_id) else {
                return ResolvedEndpoint::free(Vec2::ZERO);
            };
            let bounds = node.bounds();
            let center = bounds.center();
            let point = match port {
                Port::Top => Vec2::new(center.x, bounds.min_y),
                Port::Right => Vec2::new(bounds.max_x, center.y),
                Port::Bottom => Vec2::new(center.x, bounds.max_y),
                Port::Left => Vec2::new(bounds.min_x, center.y),
            };
            ResolvedEndpoint {
                point,
                direction: Some(port.outward()),
            }
        }
    }
}
