pub mod catalogue;
pub mod configurable;

pub use catalogue::{Factory, FactoryContext, OperatorCatalogue, Slot, StrategyRegistry};
pub use configurable::{ConfigurableAlgorithmBuilder, RunnerKind};
