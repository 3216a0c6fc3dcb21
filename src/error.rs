use thiserror::Error;

/// Geometry failures that are contract violations rather than degenerate
/// input. Degenerate geometry (missing nodes, zero-length polylines) is
/// handled with documented fallbacks instead of errors; see the individual
/// routing functions.
#[derive(Debug, Error)]
pub enum Error {
    /// Port-position math assumes exactly four cardinal attachment points;
    /// anything else would corrupt routing invisibly, so it fails up front.
    #[error("invalid connector port `{0}`: expected top, right, bottom, or left")]
    InvalidPort(String),
}
