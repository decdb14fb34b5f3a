pub mod meta_optimizer;
pub mod progress;

pub use meta_optimizer::{MetaOptimizer, MetaOptimizerSettings, ProgressCallback};
pub use progress::LogProgressCallback;
