use super::traits::ConfigSection;
use crate::engines::generation::MetaOptimizerSettings;
use crate::error::{MetaError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings of the outer NSGA-II search over configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OuterConfig {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_probability: f64,
    pub crossover_distribution_index: f64,
    pub mutation_probability_factor: f64,
    pub mutation_distribution_index: f64,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

impl Default for OuterConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 10,
            crossover_probability: 0.9,
            crossover_distribution_index: 20.0,
            mutation_probability_factor: 1.0,
            mutation_distribution_index: 20.0,
            seed: None,
            output_dir: PathBuf::from("results"),
        }
    }
}

impl ConfigSection for OuterConfig {
    fn section_name() -> &'static str {
        "outer"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(MetaError::Configuration(
                "Outer population size must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(MetaError::Configuration(
                "Crossover probability must be between 0 and 1".to_string(),
            ));
        }
        if self.mutation_probability_factor < 0.0 {
            return Err(MetaError::Configuration(
                "Mutation probability factor must be non-negative".to_string(),
            ));
        }
        if self.crossover_distribution_index <= 0.0 || self.mutation_distribution_index <= 0.0 {
            return Err(MetaError::Configuration(
                "Distribution indices must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl OuterConfig {
    pub fn settings(&self) -> MetaOptimizerSettings {
        MetaOptimizerSettings {
            population_size: self.population_size,
            generations: self.generations,
            crossover_probability: self.crossover_probability,
            crossover_distribution_index: self.crossover_distribution_index,
            mutation_probability_factor: self.mutation_probability_factor,
            mutation_distribution_index: self.mutation_distribution_index,
            seed: self.seed,
        }
    }
}
