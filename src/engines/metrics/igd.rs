use super::indicator::{check_fronts, QualityIndicator};
use crate::error::Result;
use crate::operators::density::euclidean;

/// Mean distance from each reference point to its closest front point
#[derive(Debug, Clone, Default)]
pub struct InvertedGenerationalDistance;

impl QualityIndicator for InvertedGenerationalDistance {
    fn name(&self) -> &'static str {
        "IGD"
    }

    fn is_minimization(&self) -> bool {
        true
    }

    fn worst_value(&self) -> f64 {
        f64::MAX
    }

    fn compute(&self, front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<f64> {
        check_fronts(self.name(), front, reference)?;
        Ok(mean_min_distance(front, reference, euclidean))
    }
}

/// IGD+ counts only the components in which a front point is worse than
/// the reference point, which makes it weakly Pareto compliant
#[derive(Debug, Clone, Default)]
pub struct InvertedGenerationalDistancePlus;

impl QualityIndicator for InvertedGenerationalDistancePlus {
    fn name(&self) -> &'static str {
        "IGD+"
    }

    fn is_minimization(&self) -> bool {
        true
    }

    fn worst_value(&self) -> f64 {
        f64::MAX
    }

    fn compute(&self, front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<f64> {
        check_fronts(self.name(), front, reference)?;
        Ok(mean_min_distance(front, reference, dominance_distance))
    }
}

fn dominance_distance(a: &[f64], r: &[f64]) -> f64 {
    a.iter()
        .zip(r)
        .map(|(ak, rk)| (ak - rk).max(0.0).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn mean_min_distance<F>(front: &[Vec<f64>], reference: &[Vec<f64>], distance: F) -> f64
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    let total: f64 = reference
        .iter()
        .map(|r| {
            front
                .iter()
                .map(|a| distance(a, r))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / reference.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_igd_of_reference_is_zero() {
        let front = vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]];
        assert_eq!(InvertedGenerationalDistance.compute(&front, &front).unwrap(), 0.0);
    }

    #[test]
    fn test_igd_single_point() {
        let reference = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let front = vec![vec![0.0, 0.0]];
        let igd = InvertedGenerationalDistance.compute(&front, &reference).unwrap();
        assert!((igd - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_igd_plus_ignores_better_components() {
        let reference = vec![vec![0.5, 0.5]];
        let dominating = vec![vec![0.2, 0.4]];
        assert_eq!(
            InvertedGenerationalDistancePlus
                .compute(&dominating, &reference)
                .unwrap(),
            0.0
        );

        let worse = vec![vec![0.8, 0.5]];
        let value = InvertedGenerationalDistancePlus.compute(&worse, &reference).unwrap();
        assert!((value - 0.3).abs() < 1e-12);
    }
}
