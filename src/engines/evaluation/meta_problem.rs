use super::budget::EvaluationBudgetStrategy;
use super::reference_front::ReferenceFront;
use crate::engines::builder::ConfigurableAlgorithmBuilder;
use crate::engines::metrics::{Aggregation, QualityIndicator};
use crate::engines::space::{Configuration, ParameterSpace};
use crate::error::{MetaError, Result};
use crate::problems::Problem;
use crate::types::{objectives_of, Solution};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A base-level problem paired with the tracker of its best-known front
#[derive(Clone)]
pub struct TrainingProblem {
    pub problem: Arc<dyn Problem>,
    pub reference: Arc<dyn ReferenceFront>,
}

impl TrainingProblem {
    pub fn new(problem: Arc<dyn Problem>, reference: Arc<dyn ReferenceFront>) -> Self {
        Self { problem, reference }
    }
}

/// A base-level run that was contained instead of aborting the candidate
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingFailure {
    pub problem: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct CandidateEvaluation {
    pub configuration: Configuration,
    pub objectives: Vec<f64>,
    pub failures: Vec<TrainingFailure>,
}

/// Scores a configuration vector by running the configured base-level
/// algorithm on every training problem and measuring each result front
/// with the quality indicators. One objective per indicator, minimized.
#[derive(Clone)]
pub struct MetaOptimizationProblem {
    space: ParameterSpace,
    builder: ConfigurableAlgorithmBuilder,
    training: Vec<TrainingProblem>,
    indicators: Vec<Arc<dyn QualityIndicator>>,
    budget: EvaluationBudgetStrategy,
    aggregation: Aggregation,
    seed: u64,
}

impl MetaOptimizationProblem {
    pub fn new(
        space: ParameterSpace,
        builder: ConfigurableAlgorithmBuilder,
        training: Vec<TrainingProblem>,
        indicators: Vec<Arc<dyn QualityIndicator>>,
        budget: EvaluationBudgetStrategy,
        seed: u64,
    ) -> Result<Self> {
        if training.is_empty() {
            return Err(MetaError::Configuration(
                "at least one training problem is required".to_string(),
            ));
        }
        if indicators.is_empty() {
            return Err(MetaError::Configuration(
                "at least one quality indicator is required".to_string(),
            ));
        }
        budget.validate(training.len())?;
        builder.verify(&space)?;

        Ok(Self {
            space,
            builder,
            training,
            indicators,
            budget,
            aggregation: Aggregation::Mean,
            seed,
        })
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn number_of_variables(&self) -> usize {
        self.space.number_of_variables()
    }

    pub fn number_of_objectives(&self) -> usize {
        self.indicators.len()
    }

    pub fn number_of_constraints(&self) -> usize {
        0
    }

    pub fn objective_names(&self) -> Vec<String> {
        self.indicators.iter().map(|i| i.name().to_string()).collect()
    }

    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    pub fn training_problems(&self) -> &[TrainingProblem] {
        &self.training
    }

    pub fn create_candidate<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.space.random_candidate(rng)
    }

    pub fn decode(&mut self, candidate: &[f64]) -> Result<Configuration> {
        self.space.decode(candidate)
    }

    pub fn evaluate(&mut self, candidate: &[f64]) -> Result<Vec<f64>> {
        Ok(self.evaluate_detailed(candidate)?.objectives)
    }

    /// Evaluate and keep the decoded configuration and contained failures
    pub fn evaluate_detailed(&mut self, candidate: &[f64]) -> Result<CandidateEvaluation> {
        let configuration = self.space.decode(candidate)?;
        let mut rng = StdRng::seed_from_u64(self.candidate_seed(candidate));

        let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(self.training.len()); self.indicators.len()];
        let mut failures = Vec::new();

        for (index, training) in self.training.iter().enumerate() {
            let budget = self.budget.budget(index, self.training.len(), &mut rng)?;
            let run_seed: u64 = rng.gen();
            let mut algorithm = self.builder.build(
                &configuration,
                Arc::clone(&training.problem),
                budget,
                run_seed,
            )?;

            let scored = algorithm
                .run()
                .map_err(|e| {
                    MetaError::EvaluationFailure(format!(
                        "{} failed on {}: {:#}",
                        algorithm.name(),
                        training.problem.name(),
                        e
                    ))
                })
                .and_then(|result| self.score(training, &result));

            match scored {
                Ok(scores) => {
                    log::debug!("{} scored {:?}", training.problem.name(), scores);
                    for (slot, score) in values.iter_mut().zip(scores) {
                        slot.push(score);
                    }
                }
                Err(err) => {
                    log::warn!("{}; assigning worst indicator values", err);
                    failures.push(TrainingFailure {
                        problem: training.problem.name().to_string(),
                        message: err.to_string(),
                    });
                    for (slot, indicator) in values.iter_mut().zip(&self.indicators) {
                        slot.push(indicator.worst_value());
                    }
                }
            }
        }

        let objectives = values
            .iter()
            .zip(&self.indicators)
            .map(|(scores, indicator)| indicator.as_objective(self.aggregation.aggregate(scores)))
            .collect();

        Ok(CandidateEvaluation {
            configuration,
            objectives,
            failures,
        })
    }

    /// Raw indicator values of one result front against the tracker
    fn score(&self, training: &TrainingProblem, result: &[Solution]) -> Result<Vec<f64>> {
        let front = objectives_of(result);
        if front.is_empty() {
            return Err(MetaError::EvaluationFailure(format!(
                "empty result front on {}",
                training.problem.name()
            )));
        }

        let snapshot = training.reference.update_and_snapshot(&front)?;
        let normalized_front = snapshot.normalize(&front);
        let normalized_reference = snapshot.normalized_front();

        self.indicators
            .iter()
            .map(|indicator| indicator.compute(&normalized_front, &normalized_reference))
            .collect()
    }

    /// Base seed mixed with the candidate's bit pattern
    fn candidate_seed(&self, candidate: &[f64]) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        for gene in candidate {
            gene.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Evaluator sharing this problem's reference trackers
    pub fn make_evaluator(&self) -> Self {
        self.clone()
    }

    /// Evaluator with private copies of every tracker
    pub fn make_isolated_evaluator(&self) -> Self {
        let mut evaluator = self.clone();
        for training in &mut evaluator.training {
            training.reference = training.reference.fork();
        }
        evaluator
    }
}
