//! Evolutionary operators assembled by the configurable base-level algorithm.

pub mod traits;
pub mod pareto;
pub mod crossover;
pub mod mutation;
pub mod selection;
pub mod ranking;
pub mod density;
pub mod replacement;
pub mod archive;
pub mod initial;

pub use traits::{
    Archive, Crossover, DensityEstimator, Fitness, Mutation, Ranking, Replacement, Selection,
    SolutionsCreation,
};
pub use archive::{CrowdingDistanceArchive, UnboundedArchive};
pub use crossover::{BlxAlphaCrossover, SbxCrossover, WholeArithmeticCrossover};
pub use density::{CrowdingDistance, KnnDensity};
pub use initial::{LatinHypercubeSampling, RandomSolutionsCreation};
pub use mutation::{PolynomialMutation, UniformMutation};
pub use ranking::{DominanceRanking, StrengthRanking};
pub use replacement::RankingAndDensityReplacement;
pub use selection::{RandomSelection, TournamentSelection};
