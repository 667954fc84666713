pub mod coefficients;
pub mod engine;
pub mod performance;
pub mod registry;
pub mod validation;

pub use coefficients::{Coefficients, coefficients_for};
pub use engine::{PointsPreview, compute_points, measure, preview_points, raw_points};
pub use performance::{ParseError, parse_distance, parse_height, parse_time};
pub use registry::{EventTypeInfo, disciplines_for, disciplines_for_code, list_event_types};
pub use validation::is_plausible;
