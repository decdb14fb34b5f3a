pub mod space;
pub mod builder;
pub mod algorithm;
pub mod metrics;
pub mod evaluation;
pub mod generation;
