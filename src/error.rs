use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Configuration errors raised by the domain mergers, the scale factory and
/// the axis layout engine.
///
/// Every variant indicates an unsatisfiable chart configuration, not a
/// transient data condition. Degenerate data (empty datasets, single-value
/// domains) is handled locally by each component and never surfaces here.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot merge X domain, missing X scale types in series specs")]
    MissingScaleType,

    #[error("custom X domain shape mismatch: {0}")]
    InvalidOrdinalOverride(String),

    #[error("custom {axis} domain is invalid, {reason}")]
    InvalidDomainBounds { axis: String, reason: String },

    #[error("custom X domain is invalid, {0}")]
    InvalidMinInterval(String),

    #[error("cannot compute scale for axis spec {axis_id}")]
    UnresolvableAxis { axis_id: String },

    #[error("invalid chart dimensions: width={width}, height={height}")]
    InvalidDimensions { width: f64, height: f64 },
}
