use super::meta_optimizer::ProgressCallback;

/// Reports outer-search progress through the `log` facade
pub struct LogProgressCallback {
    generations: usize,
}

impl LogProgressCallback {
    pub fn new(generations: usize) -> Self {
        Self { generations }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {}/{} starting", generation + 1, self.generations);
    }

    fn on_generation_complete(&mut self, generation: usize, best_objectives: &[f64], front_size: usize) {
        log::info!(
            "Generation {}/{} complete. Best objectives: {:?}, front size: {}",
            generation + 1,
            self.generations,
            best_objectives,
            front_size
        );
    }

    fn on_batch_evaluated(&mut self, evaluated: usize, total: usize) {
        log::debug!("Evaluated {} candidates ({} total)", evaluated, total);
    }
}
