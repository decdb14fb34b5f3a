pub mod budget;
pub mod harness;
pub mod meta_problem;
pub mod reference_front;
pub mod report;

pub use budget::EvaluationBudgetStrategy;
pub use harness::{EvaluationHarness, Evaluator, EvaluatorFactory};
pub use meta_problem::{CandidateEvaluation, MetaOptimizationProblem, TrainingFailure, TrainingProblem};
pub use reference_front::{
    DynamicReferenceFront, FileReferenceFront, FrontSnapshot, ReferenceFront, TrackerState,
};
pub use report::{ConfigurationReport, NamedObjective};
