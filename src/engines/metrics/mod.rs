pub mod indicator;
pub mod epsilon;
pub mod igd;
pub mod hypervolume;
pub mod normalize;

pub use indicator::{indicator_by_name, Aggregation, QualityIndicator};
pub use epsilon::AdditiveEpsilon;
pub use igd::{InvertedGenerationalDistance, InvertedGenerationalDistancePlus};
pub use hypervolume::{Hypervolume, NormalizedHypervolume};
pub use normalize::{bounds_of, normalize_front};
