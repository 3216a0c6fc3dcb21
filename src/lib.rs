#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod model;
pub mod route;
pub mod snap;

pub use config::{Config, RoutingConfig, SnapConfig, load_config};
pub use error::Error;
pub use model::{
    Axis, Bounds, ConnectorEndpoint, ConnectorModel, ConnectorStyle, Direction, NodeModel, Port,
    RectInfo, Scene, Vec2,
};
pub use route::{ConnectorPath, PathCommand, route_connector};
pub use snap::{
    ActiveSnapLocks, DistanceBadge, SmartGuideResult, SmartSelectionHandle, SmartSelectionResult,
    SnapMatch, compute_smart_guides, compute_distance_badges, detect_smart_selection,
};

#[cfg(feature = "cli")]
pub use cli::run;
