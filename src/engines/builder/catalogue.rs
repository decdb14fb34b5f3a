use crate::engines::space::Configuration;
use crate::error::{MetaError, Result};
use crate::operators::mutation::probability_from_factor;
use crate::operators::{
    Archive, BlxAlphaCrossover, Crossover, CrowdingDistance, CrowdingDistanceArchive,
    DensityEstimator, DominanceRanking, KnnDensity, LatinHypercubeSampling, Mutation,
    PolynomialMutation, RandomSelection, RandomSolutionsCreation, Ranking,
    RankingAndDensityReplacement, Replacement, SbxCrossover, Selection, SolutionsCreation,
    StrengthRanking, TournamentSelection, UnboundedArchive, UniformMutation,
    WholeArithmeticCrossover,
};
use crate::problems::Problem;
use std::collections::HashMap;
use std::fmt;

/// Categorical parameters whose value names an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    CreateInitialSolutions,
    Crossover,
    Mutation,
    Selection,
    Replacement,
    Ranking,
    DensityEstimator,
    ExternalArchive,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::CreateInitialSolutions,
        Slot::Crossover,
        Slot::Mutation,
        Slot::Selection,
        Slot::Replacement,
        Slot::Ranking,
        Slot::DensityEstimator,
        Slot::ExternalArchive,
    ];

    /// Name of the parameter carrying this slot's value
    pub fn parameter_name(&self) -> &'static str {
        match self {
            Slot::CreateInitialSolutions => "createInitialSolutions",
            Slot::Crossover => "crossover",
            Slot::Mutation => "mutation",
            Slot::Selection => "selection",
            Slot::Replacement => "replacement",
            Slot::Ranking => "ranking",
            Slot::DensityEstimator => "densityEstimator",
            Slot::ExternalArchive => "externalArchive",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.parameter_name())
    }
}

/// Everything a factory may read while building one operator
pub struct FactoryContext<'a> {
    pub configuration: &'a Configuration,
    pub problem: &'a dyn Problem,
    pub catalogue: &'a OperatorCatalogue,
    pub population_size: usize,
}

pub type Factory<T> = fn(&FactoryContext<'_>) -> Result<Box<T>>;

/// Name -> factory table for one slot
pub struct StrategyRegistry<T: ?Sized> {
    slot: Slot,
    factories: HashMap<String, Factory<T>>,
}

impl<T: ?Sized> StrategyRegistry<T> {
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, factory: Factory<T>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn create(&self, name: &str, context: &FactoryContext<'_>) -> Result<Box<T>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| MetaError::UnknownStrategy {
                slot: self.slot.to_string(),
                value: name.to_string(),
            })?;
        factory(context)
    }

    /// Create from the value the configuration holds for this slot
    pub fn create_configured(&self, context: &FactoryContext<'_>) -> Result<Box<T>> {
        let name = context.configuration.get_str(self.slot.parameter_name())?;
        self.create(name, context)
    }
}

/// Operator catalogue keyed by `(slot, value)`.
///
/// `new()` registers the built-in operators; custom ones can be added
/// through the public registries before the catalogue is shared.
pub struct OperatorCatalogue {
    pub initial_solutions: StrategyRegistry<dyn SolutionsCreation>,
    pub crossover: StrategyRegistry<dyn Crossover>,
    pub mutation: StrategyRegistry<dyn Mutation>,
    pub selection: StrategyRegistry<dyn Selection>,
    pub replacement: StrategyRegistry<dyn Replacement>,
    pub ranking: StrategyRegistry<dyn Ranking>,
    pub density_estimator: StrategyRegistry<dyn DensityEstimator>,
    pub external_archive: StrategyRegistry<dyn Archive>,
}

impl OperatorCatalogue {
    pub fn empty() -> Self {
        Self {
            initial_solutions: StrategyRegistry::new(Slot::CreateInitialSolutions),
            crossover: StrategyRegistry::new(Slot::Crossover),
            mutation: StrategyRegistry::new(Slot::Mutation),
            selection: StrategyRegistry::new(Slot::Selection),
            replacement: StrategyRegistry::new(Slot::Replacement),
            ranking: StrategyRegistry::new(Slot::Ranking),
            density_estimator: StrategyRegistry::new(Slot::DensityEstimator),
            external_archive: StrategyRegistry::new(Slot::ExternalArchive),
        }
    }

    pub fn new() -> Self {
        let mut catalogue = Self::empty();
        catalogue.register_variation();
        catalogue.register_survival();
        catalogue
    }

    pub fn contains(&self, slot: Slot, name: &str) -> bool {
        match slot {
            Slot::CreateInitialSolutions => self.initial_solutions.contains(name),
            Slot::Crossover => self.crossover.contains(name),
            Slot::Mutation => self.mutation.contains(name),
            Slot::Selection => self.selection.contains(name),
            Slot::Replacement => self.replacement.contains(name),
            Slot::Ranking => self.ranking.contains(name),
            Slot::DensityEstimator => self.density_estimator.contains(name),
            Slot::ExternalArchive => self.external_archive.contains(name),
        }
    }

    pub fn names(&self, slot: Slot) -> Vec<String> {
        match slot {
            Slot::CreateInitialSolutions => self.initial_solutions.names(),
            Slot::Crossover => self.crossover.names(),
            Slot::Mutation => self.mutation.names(),
            Slot::Selection => self.selection.names(),
            Slot::Replacement => self.replacement.names(),
            Slot::Ranking => self.ranking.names(),
            Slot::DensityEstimator => self.density_estimator.names(),
            Slot::ExternalArchive => self.external_archive.names(),
        }
    }

    fn register_variation(&mut self) {
        self.initial_solutions
            .register("random", |_| Ok(Box::new(RandomSolutionsCreation)));
        self.initial_solutions.register("latinHypercube", |ctx| {
            let samples = ctx.configuration.get_usize("latinHypercubeSamples")?;
            Ok(Box::new(LatinHypercubeSampling::new(samples)))
        });

        self.crossover.register("SBX", |ctx| {
            let config = ctx.configuration;
            Ok(Box::new(SbxCrossover::new(
                config.get_f64("crossoverProbability")?,
                config.get_f64("sbxDistributionIndex")?,
                ctx.problem.bounds(),
            )))
        });
        self.crossover.register("BLX_ALPHA", |ctx| {
            let config = ctx.configuration;
            Ok(Box::new(BlxAlphaCrossover::new(
                config.get_f64("crossoverProbability")?,
                config.get_f64("blxAlphaCrossoverAlphaValue")?,
                ctx.problem.bounds(),
            )))
        });
        self.crossover.register("wholeArithmetic", |ctx| {
            Ok(Box::new(WholeArithmeticCrossover::new(
                ctx.configuration.get_f64("crossoverProbability")?,
                ctx.problem.bounds(),
            )))
        });

        self.mutation.register("polynomial", |ctx| {
            let config = ctx.configuration;
            Ok(Box::new(PolynomialMutation::new(
                mutation_probability(ctx)?,
                config.get_f64("polynomialMutationDistributionIndex")?,
                ctx.problem.bounds(),
            )))
        });
        self.mutation.register("uniform", |ctx| {
            let config = ctx.configuration;
            Ok(Box::new(UniformMutation::new(
                mutation_probability(ctx)?,
                config.get_f64("uniformMutationPerturbation")?,
                ctx.problem.bounds(),
            )))
        });

        self.selection.register("tournament", |ctx| {
            let size = ctx.configuration.get_usize("selectionTournamentSize")?;
            Ok(Box::new(TournamentSelection::new(size)))
        });
        self.selection
            .register("random", |_| Ok(Box::new(RandomSelection)));
    }

    fn register_survival(&mut self) {
        self.ranking
            .register("dominanceRanking", |_| Ok(Box::new(DominanceRanking)));
        self.ranking
            .register("strengthRanking", |_| Ok(Box::new(StrengthRanking)));

        self.density_estimator
            .register("crowdingDistance", |_| Ok(Box::new(CrowdingDistance)));
        self.density_estimator.register("knn", |ctx| {
            let k = ctx.configuration.get_usize("knnNeighbourhoodSize")?;
            Ok(Box::new(KnnDensity::new(k)))
        });

        // ranking and density estimator are specific parameters of the replacement
        self.replacement.register("rankingAndDensityEstimator", |ctx| {
            let ranking = ctx.catalogue.ranking.create_configured(ctx)?;
            let density = ctx.catalogue.density_estimator.create_configured(ctx)?;
            Ok(Box::new(RankingAndDensityReplacement::new(ranking, density)))
        });

        self.external_archive.register("crowdingDistanceArchive", |ctx| {
            Ok(Box::new(CrowdingDistanceArchive::new(ctx.population_size)))
        });
        self.external_archive
            .register("unboundedArchive", |_| Ok(Box::new(UnboundedArchive::new())));
    }
}

impl Default for OperatorCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

fn mutation_probability(ctx: &FactoryContext<'_>) -> Result<f64> {
    let factor = ctx.configuration.get_f64("mutationProbabilityFactor")?;
    Ok(probability_from_factor(
        factor,
        ctx.problem.number_of_variables(),
    ))
}
