use super::meta_problem::MetaOptimizationProblem;
use crate::error::{MetaError, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scores one candidate vector
pub trait Evaluator: Send {
    fn evaluate(&mut self, candidate: &[f64]) -> Result<Vec<f64>>;
}

/// Produces an independent evaluator per candidate
pub trait EvaluatorFactory: Sync {
    type Evaluator: Evaluator;

    fn make_evaluator(&self) -> Self::Evaluator;
}

impl Evaluator for MetaOptimizationProblem {
    fn evaluate(&mut self, candidate: &[f64]) -> Result<Vec<f64>> {
        MetaOptimizationProblem::evaluate(self, candidate)
    }
}

impl EvaluatorFactory for MetaOptimizationProblem {
    type Evaluator = MetaOptimizationProblem;

    fn make_evaluator(&self) -> Self::Evaluator {
        MetaOptimizationProblem::make_evaluator(self)
    }
}

/// Evaluates batches of candidates on a dedicated worker pool
pub struct EvaluationHarness<F: EvaluatorFactory> {
    factory: F,
    pool: ThreadPool,
    evaluations: AtomicUsize,
}

impl<F: EvaluatorFactory> EvaluationHarness<F> {
    /// `num_threads == 0` uses all available hardware parallelism
    pub fn new(factory: F, num_threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("metaevo-eval-{}", i))
            .build()
            .map_err(|e| MetaError::Configuration(format!("failed to build worker pool: {}", e)))?;

        log::info!("Evaluation pool ready with {} threads", pool.current_num_threads());

        Ok(Self {
            factory,
            pool,
            evaluations: AtomicUsize::new(0),
        })
    }

    /// Objectives for every candidate, in input order. The first error
    /// aborts the batch.
    pub fn evaluate_batch(&self, candidates: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.pool.install(|| {
            candidates
                .par_iter()
                .map(|candidate| -> Result<Vec<f64>> {
                    let mut evaluator = self.factory.make_evaluator();
                    let objectives = evaluator.evaluate(candidate)?;
                    self.evaluations.fetch_add(1, Ordering::Relaxed);
                    Ok(objectives)
                })
                .collect()
        })
    }

    /// Candidates that were scored successfully
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
