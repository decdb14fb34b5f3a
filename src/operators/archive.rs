use super::pareto::{crowding_distance, insert_non_dominated};
use super::traits::Archive;
use crate::types::Solution;

/// Keeps every non-dominated solution seen so far
#[derive(Debug, Clone, Default)]
pub struct UnboundedArchive {
    solutions: Vec<Solution>,
}

impl UnboundedArchive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Archive for UnboundedArchive {
    fn name(&self) -> &'static str {
        "unboundedArchive"
    }

    fn add(&mut self, solution: Solution) -> bool {
        insert_non_dominated(&mut self.solutions, solution, |s| s.objectives.as_slice())
    }

    fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}

/// Bounded non-dominated archive; when over capacity the most crowded
/// member is evicted
#[derive(Debug, Clone)]
pub struct CrowdingDistanceArchive {
    solutions: Vec<Solution>,
    capacity: usize,
}

impl CrowdingDistanceArchive {
    pub fn new(capacity: usize) -> Self {
        Self {
            solutions: Vec::new(),
            capacity: capacity.max(1),
        }
    }
}

impl Archive for CrowdingDistanceArchive {
    fn name(&self) -> &'static str {
        "crowdingDistanceArchive"
    }

    fn add(&mut self, solution: Solution) -> bool {
        let incoming = solution.objectives.clone();
        if !insert_non_dominated(&mut self.solutions, solution, |s| s.objectives.as_slice()) {
            return false;
        }

        if self.solutions.len() <= self.capacity {
            return true;
        }

        let points: Vec<&[f64]> = self.solutions.iter().map(|s| s.objectives.as_slice()).collect();
        let distances = crowding_distance(&points);
        let worst = distances
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, _)| index)
            .unwrap_or(0);

        let evicted = self.solutions.remove(worst);
        evicted.objectives != incoming
    }

    fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }
}
