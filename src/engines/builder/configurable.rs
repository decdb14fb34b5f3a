use super::catalogue::{FactoryContext, OperatorCatalogue, Slot};
use crate::engines::algorithm::{
    AlgorithmComponents, AsynchronousAlgorithm, BaseAlgorithm, GenerationalAlgorithm,
};
use crate::engines::space::{Configuration, ParameterSpace};
use crate::error::{MetaError, Result};
use crate::problems::Problem;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How built algorithms schedule their evaluations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RunnerKind {
    Generational,
    Asynchronous { workers: usize },
}

impl Default for RunnerKind {
    fn default() -> Self {
        RunnerKind::Generational
    }
}

/// Assembles a runnable base-level algorithm from a decoded configuration.
///
/// Stateless apart from shared read-only settings: every `build` call
/// returns a self-contained instance, so one builder can serve many threads.
#[derive(Clone)]
pub struct ConfigurableAlgorithmBuilder {
    catalogue: Arc<OperatorCatalogue>,
    population_size: usize,
    runner: RunnerKind,
}

impl ConfigurableAlgorithmBuilder {
    pub fn new(catalogue: Arc<OperatorCatalogue>, population_size: usize) -> Self {
        Self {
            catalogue,
            population_size,
            runner: RunnerKind::Generational,
        }
    }

    pub fn with_runner(mut self, runner: RunnerKind) -> Self {
        self.runner = runner;
        self
    }

    pub fn catalogue(&self) -> &OperatorCatalogue {
        &self.catalogue
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Every categorical value of every slot parameter in `space` must have
    /// a catalogue entry.
    pub fn verify(&self, space: &ParameterSpace) -> Result<()> {
        for slot in Slot::ALL {
            let Some(parameter) = space.find(slot.parameter_name()) else {
                continue;
            };
            let Some(keys) = parameter.domain().keys() else {
                return Err(MetaError::Configuration(format!(
                    "slot parameter '{}' must be categorical",
                    slot
                )));
            };
            if let Some(missing) = keys.iter().find(|key| !self.catalogue.contains(slot, key)) {
                return Err(MetaError::UnknownStrategy {
                    slot: slot.to_string(),
                    value: missing.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn build(
        &self,
        configuration: &Configuration,
        problem: Arc<dyn Problem>,
        budget: usize,
        seed: u64,
    ) -> Result<Box<dyn BaseAlgorithm>> {
        let context = FactoryContext {
            configuration,
            problem: problem.as_ref(),
            catalogue: &self.catalogue,
            population_size: self.population_size,
        };

        let with_archive = configuration.contains("algorithmResult")
            && configuration.get_str("algorithmResult")? == "externalArchive";
        let (population_size, archive) = if with_archive {
            (
                configuration.get_usize("populationSizeWithArchive")?,
                Some(self.catalogue.external_archive.create_configured(&context)?),
            )
        } else {
            (self.population_size, None)
        };

        let offspring_population_size = if configuration.contains("offspringPopulationSize") {
            configuration.get_usize("offspringPopulationSize")?
        } else {
            population_size
        };

        let components = AlgorithmComponents {
            initial_solutions: self.catalogue.initial_solutions.create_configured(&context)?,
            crossover: self.catalogue.crossover.create_configured(&context)?,
            mutation: self.catalogue.mutation.create_configured(&context)?,
            selection: self.catalogue.selection.create_configured(&context)?,
            replacement: self.catalogue.replacement.create_configured(&context)?,
            archive,
            population_size,
            offspring_population_size,
        };

        let algorithm: Box<dyn BaseAlgorithm> = match self.runner {
            RunnerKind::Generational => Box::new(GenerationalAlgorithm::new(
                "configurableNSGAII",
                problem,
                components,
                budget,
                seed,
            )),
            RunnerKind::Asynchronous { workers } => Box::new(AsynchronousAlgorithm::new(
                "asynchronousNSGAII",
                problem,
                components,
                budget,
                workers,
                seed,
            )),
        };
        Ok(algorithm)
    }

    /// Decode `vector` through `space`, then build
    pub fn build_from_vector(
        &self,
        space: &mut ParameterSpace,
        vector: &[f64],
        problem: Arc<dyn Problem>,
        budget: usize,
        seed: u64,
    ) -> Result<Box<dyn BaseAlgorithm>> {
        let configuration = space.decode(vector)?;
        self.build(&configuration, problem, budget, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::space::Parameter;
    use crate::problems::Zdt1;

    fn builder() -> ConfigurableAlgorithmBuilder {
        ConfigurableAlgorithmBuilder::new(Arc::new(OperatorCatalogue::new()), 10)
    }

    fn arguments(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_verify_bundled_space() {
        let space = ParameterSpace::nsgaii().unwrap();
        builder().verify(&space).unwrap();
    }

    #[test]
    fn test_verify_detects_catalogue_gap() {
        let mut space = ParameterSpace::new("gap");
        space
            .put(Parameter::categorical("crossover", &["SBX", "PMX"]).unwrap())
            .unwrap();

        match builder().verify(&space) {
            Err(MetaError::UnknownStrategy { slot, value }) => {
                assert_eq!(slot, "crossover");
                assert_eq!(value, "PMX");
            }
            other => panic!("expected UnknownStrategy, got {:?}", other),
        }
    }

    #[test]
    fn test_build_from_parsed_arguments() {
        let mut space = ParameterSpace::nsgaii().unwrap();
        let configuration = space
            .parse(&arguments(
                "--algorithmResult externalArchive --populationSizeWithArchive 20 \
                 --externalArchive unboundedArchive --createInitialSolutions latinHypercube \
                 --latinHypercubeSamples 20 --offspringPopulationSize 5 \
                 --crossover BLX_ALPHA --crossoverProbability 0.9 --blxAlphaCrossoverAlphaValue 0.5 \
                 --mutation uniform --mutationProbabilityFactor 1.0 --uniformMutationPerturbation 0.5 \
                 --selection random \
                 --replacement rankingAndDensityEstimator --ranking strengthRanking \
                 --densityEstimator knn --knnNeighbourhoodSize 3",
            ))
            .unwrap();

        let problem: Arc<dyn Problem> = Arc::new(Zdt1::new(5));
        let mut algorithm = builder().build(&configuration, problem, 100, 1).unwrap();
        let result = algorithm.run().unwrap();

        assert_eq!(algorithm.evaluations(), 100);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_build_from_vector_runs_within_budget() {
        let mut space = ParameterSpace::nsgaii().unwrap();
        let vector = vec![0.3; space.number_of_variables()];
        let problem: Arc<dyn Problem> = Arc::new(Zdt1::new(4));

        let mut algorithm = builder()
            .build_from_vector(&mut space, &vector, problem, 60, 2)
            .unwrap();
        algorithm.run().unwrap();
        assert_eq!(algorithm.evaluations(), 60);
    }

    #[test]
    fn test_missing_operator_parameter() {
        let configuration = Configuration::new(Vec::new());
        let problem: Arc<dyn Problem> = Arc::new(Zdt1::new(4));
        assert!(matches!(
            builder().build(&configuration, problem, 10, 1),
            Err(MetaError::Configuration(_))
        ));
    }
}
