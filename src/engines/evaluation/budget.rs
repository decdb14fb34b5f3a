use crate::error::{MetaError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of base-level evaluations granted per training problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvaluationBudgetStrategy {
    /// Same budget for every problem
    Constant { evaluations: usize },
    /// One budget per training problem, by index
    Fixed { evaluations: Vec<usize> },
    /// Uniform draw in `[min, max]` on every request
    RandomRange { min: usize, max: usize },
}

impl EvaluationBudgetStrategy {
    /// Checked once at setup against the training-set size
    pub fn validate(&self, training_size: usize) -> Result<()> {
        match self {
            EvaluationBudgetStrategy::Constant { evaluations } => {
                if *evaluations == 0 {
                    return Err(MetaError::Configuration(
                        "constant evaluation budget must be positive".to_string(),
                    ));
                }
            }
            EvaluationBudgetStrategy::Fixed { evaluations } => {
                if evaluations.len() != training_size {
                    return Err(MetaError::Configuration(format!(
                        "fixed evaluation budget lists {} entries for {} training problems",
                        evaluations.len(),
                        training_size
                    )));
                }
                if evaluations.contains(&0) {
                    return Err(MetaError::Configuration(
                        "fixed evaluation budget entries must be positive".to_string(),
                    ));
                }
            }
            EvaluationBudgetStrategy::RandomRange { min, max } => {
                if *min == 0 || min > max {
                    return Err(MetaError::Configuration(format!(
                        "random evaluation budget range [{}, {}] is invalid",
                        min, max
                    )));
                }
            }
        }
        Ok(())
    }

    /// Budget for the problem at `index`. The random-range variant ignores
    /// the index beyond bounds-checking it.
    pub fn budget<R: Rng>(&self, index: usize, training_size: usize, rng: &mut R) -> Result<usize> {
        if index >= training_size {
            return Err(MetaError::Configuration(format!(
                "training problem index {} out of range for {} problems",
                index, training_size
            )));
        }
        match self {
            EvaluationBudgetStrategy::Constant { evaluations } => Ok(*evaluations),
            EvaluationBudgetStrategy::Fixed { evaluations } => {
                evaluations.get(index).copied().ok_or_else(|| {
                    MetaError::Configuration(format!(
                        "no fixed evaluation budget for training problem {}",
                        index
                    ))
                })
            }
            EvaluationBudgetStrategy::RandomRange { min, max } => Ok(rng.gen_range(*min..=*max)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_budget_mismatch() {
        let strategy = EvaluationBudgetStrategy::Fixed {
            evaluations: vec![1000, 2000],
        };
        assert!(matches!(
            strategy.validate(3),
            Err(MetaError::Configuration(_))
        ));
        strategy.validate(2).unwrap();
    }

    #[test]
    fn test_fixed_budget_by_index() {
        let strategy = EvaluationBudgetStrategy::Fixed {
            evaluations: vec![1000, 2000],
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(strategy.budget(1, 2, &mut rng).unwrap(), 2000);
        assert!(strategy.budget(2, 2, &mut rng).is_err());
    }

    #[test]
    fn test_random_range() {
        let strategy = EvaluationBudgetStrategy::RandomRange { min: 100, max: 200 };
        strategy.validate(5).unwrap();

        let mut rng = StdRng::seed_from_u64(4);
        for index in 0..5 {
            let budget = strategy.budget(index, 5, &mut rng).unwrap();
            assert!((100..=200).contains(&budget));
        }
        assert!(EvaluationBudgetStrategy::RandomRange { min: 5, max: 1 }
            .validate(1)
            .is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let strategy: EvaluationBudgetStrategy =
            toml::from_str("type = \"fixed\"\nevaluations = [1000, 2000]").unwrap();
        assert_eq!(
            strategy,
            EvaluationBudgetStrategy::Fixed {
                evaluations: vec![1000, 2000]
            }
        );

        let strategy: EvaluationBudgetStrategy =
            toml::from_str("type = \"random_range\"\nmin = 10\nmax = 20").unwrap();
        assert_eq!(strategy, EvaluationBudgetStrategy::RandomRange { min: 10, max: 20 });
    }
}
