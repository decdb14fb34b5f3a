use super::traits::ConfigSection;
use crate::engines::builder::{ConfigurableAlgorithmBuilder, OperatorCatalogue, RunnerKind};
use crate::engines::evaluation::{
    DynamicReferenceFront, EvaluationBudgetStrategy, FileReferenceFront, MetaOptimizationProblem,
    ReferenceFront, TrainingProblem,
};
use crate::engines::metrics::{indicator_by_name, Aggregation, QualityIndicator};
use crate::engines::space::ParameterSpace;
use crate::error::{MetaError, Result};
use crate::problems::problem_by_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings of the meta-optimization problem
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    /// Declarative space description; the bundled NSGA-II space when absent
    pub parameter_space: Option<PathBuf>,
    pub training_problems: Vec<String>,
    /// Fixed reference fronts keyed by training-problem name
    pub reference_fronts: BTreeMap<String, PathBuf>,
    pub front_separator: char,
    pub indicators: Vec<String>,
    pub aggregation: Aggregation,
    pub budget: EvaluationBudgetStrategy,
    pub base_population_size: usize,
    pub runner: RunnerKind,
    /// Evaluation threads, 0 = all cores
    pub num_threads: usize,
    pub seed: u64,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            parameter_space: None,
            training_problems: vec!["ZDT1".to_string(), "ZDT4".to_string()],
            reference_fronts: BTreeMap::new(),
            front_separator: ',',
            indicators: vec!["EP".to_string(), "NHV".to_string()],
            aggregation: Aggregation::Mean,
            budget: EvaluationBudgetStrategy::Constant { evaluations: 5000 },
            base_population_size: 100,
            runner: RunnerKind::Generational,
            num_threads: 0,
            seed: 1,
        }
    }
}

impl ConfigSection for MetaConfig {
    fn section_name() -> &'static str {
        "meta"
    }

    fn validate(&self) -> Result<()> {
        if self.training_problems.is_empty() {
            return Err(MetaError::Configuration(
                "At least one training problem is required".to_string(),
            ));
        }
        if self.indicators.is_empty() {
            return Err(MetaError::Configuration(
                "At least one quality indicator is required".to_string(),
            ));
        }
        if self.base_population_size < 2 {
            return Err(MetaError::Configuration(
                "Base population size must be at least 2".to_string(),
            ));
        }
        if !self.front_separator.is_ascii() {
            return Err(MetaError::Configuration(
                "Front separator must be a single ASCII character".to_string(),
            ));
        }
        if let Some(name) = self.reference_fronts.keys().find(|name| {
            !self
                .training_problems
                .iter()
                .any(|problem| problem.eq_ignore_ascii_case(name))
        }) {
            return Err(MetaError::Configuration(format!(
                "Reference front given for '{}', which is not a training problem",
                name
            )));
        }
        self.budget.validate(self.training_problems.len())
    }
}

impl MetaConfig {
    pub fn load_space(&self) -> Result<ParameterSpace> {
        match &self.parameter_space {
            Some(path) => ParameterSpace::load(path),
            None => ParameterSpace::nsgaii(),
        }
    }

    pub fn load_indicators(&self) -> Result<Vec<Arc<dyn QualityIndicator>>> {
        self.indicators
            .iter()
            .map(|name| indicator_by_name(name).map(Arc::from))
            .collect()
    }

    fn reference_front_for(&self, problem: &str) -> Option<&PathBuf> {
        self.reference_fronts
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(problem))
            .map(|(_, path)| path)
    }

    pub fn load_training(&self) -> Result<Vec<TrainingProblem>> {
        self.training_problems
            .iter()
            .map(|name| {
                let problem = problem_by_name(name)?;
                let reference: Arc<dyn ReferenceFront> = match self.reference_front_for(name) {
                    Some(path) => Arc::new(FileReferenceFront::load(path, self.front_separator as u8)?),
                    None => Arc::new(DynamicReferenceFront::new()),
                };
                Ok(TrainingProblem::new(problem, reference))
            })
            .collect()
    }

    /// Assemble the meta-optimization problem these settings describe
    pub fn build_problem(&self) -> Result<MetaOptimizationProblem> {
        self.validate()?;

        let builder = ConfigurableAlgorithmBuilder::new(
            Arc::new(OperatorCatalogue::new()),
            self.base_population_size,
        )
        .with_runner(self.runner);

        let problem = MetaOptimizationProblem::new(
            self.load_space()?,
            builder,
            self.load_training()?,
            self.load_indicators()?,
            self.budget.clone(),
            self.seed,
        )?
        .with_aggregation(self.aggregation);

        log::info!(
            "Meta-problem over space '{}': {} variables, {} objectives, {} training problems",
            problem.space().name(),
            problem.number_of_variables(),
            problem.number_of_objectives(),
            problem.training_problems().len()
        );
        Ok(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        MetaConfig::default().validate().unwrap();
    }

    #[test]
    fn test_budget_must_match_training_set() {
        let config = MetaConfig {
            training_problems: vec!["ZDT1".into(), "ZDT2".into(), "ZDT3".into()],
            budget: EvaluationBudgetStrategy::Fixed {
                evaluations: vec![1000, 2000],
            },
            ..MetaConfig::default()
        };
        assert!(matches!(config.validate(), Err(MetaError::Configuration(_))));
    }

    #[test]
    fn test_stray_reference_front() {
        let mut config = MetaConfig::default();
        config
            .reference_fronts
            .insert("DTLZ2".to_string(), PathBuf::from("dtlz2.csv"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_problem() {
        let config = MetaConfig {
            training_problems: vec!["ZDT1:5".into()],
            indicators: vec!["IGD+".into()],
            base_population_size: 10,
            ..MetaConfig::default()
        };
        let problem = config.build_problem().unwrap();
        assert_eq!(problem.number_of_objectives(), 1);
        assert_eq!(problem.training_problems().len(), 1);
    }

    #[test]
    fn test_unknown_indicator() {
        let config = MetaConfig {
            indicators: vec!["R2".into()],
            ..MetaConfig::default()
        };
        assert!(config.build_problem().is_err());
    }
}
