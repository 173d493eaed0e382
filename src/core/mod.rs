pub mod extent;
pub mod pipeline;
pub mod scales;
pub mod series;
pub mod spec;
pub mod types;
pub mod x_domain;
pub mod y_domain;

pub use scales::{BandScale, ContinuousScale, Scale};
pub use series::{RawDatum, SeriesData};
pub use spec::{AxisSpec, CustomXDomain, DomainRange, SeriesKind, SeriesSpec, TickFormat};
pub use types::{CategoryValue, Position, Rotation, ScaleType, Size, TimeZone};
pub use x_domain::{Domain, XDomain};
pub use y_domain::YDomain;
