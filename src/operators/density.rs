use super::pareto::crowding_distance;
use super::traits::DensityEstimator;

#[derive(Debug, Clone, Default)]
pub struct CrowdingDistance;

impl DensityEstimator for CrowdingDistance {
    fn name(&self) -> &'static str {
        "crowdingDistance"
    }

    fn estimate(&self, objectives: &[&[f64]]) -> Vec<f64> {
        crowding_distance(objectives)
    }
}

/// Euclidean distance to the k-th nearest neighbour in objective space
#[derive(Debug, Clone)]
pub struct KnnDensity {
    neighbours: usize,
}

impl KnnDensity {
    pub fn new(neighbours: usize) -> Self {
        Self {
            neighbours: neighbours.max(1),
        }
    }
}

impl DensityEstimator for KnnDensity {
    fn name(&self) -> &'static str {
        "knn"
    }

    fn estimate(&self, objectives: &[&[f64]]) -> Vec<f64> {
        let n = objectives.len();
        if n <= self.neighbours {
            return vec![f64::INFINITY; n];
        }

        (0..n)
            .map(|i| {
                let mut distances: Vec<f64> = (0..n)
                    .filter(|&j| j != i)
                    .map(|j| euclidean(objectives[i], objectives[j]))
                    .collect();
                distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                distances[self.neighbours - 1]
            })
            .collect()
    }
}

pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knn_density() {
        let points: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![5.0, 0.0]];
        let refs: Vec<&[f64]> = points.iter().map(|p| p.as_slice()).collect();

        let density = KnnDensity::new(1).estimate(&refs);
        assert_eq!(density, vec![1.0, 1.0, 4.0]);

        let density = KnnDensity::new(2).estimate(&refs);
        assert_eq!(density, vec![5.0, 4.0, 5.0]);
    }

    #[test]
    fn test_knn_small_population_is_unbounded() {
        let points: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        let refs: Vec<&[f64]> = points.iter().map(|p| p.as_slice()).collect();
        assert!(KnnDensity::new(3)
            .estimate(&refs)
            .iter()
            .all(|d| d.is_infinite()));
    }
}
