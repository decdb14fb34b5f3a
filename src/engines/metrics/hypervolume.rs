use super::indicator::{check_fronts, QualityIndicator};
use crate::error::{MetaError, Result};
use crate::operators::pareto::insert_non_dominated;

/// Hypervolume in normalized objective space, reference point at
/// `offset` in every objective. Computed by slicing objectives (HSO) down
/// to a two-dimensional sweep.
#[derive(Debug, Clone)]
pub struct Hypervolume {
    offset: f64,
}

impl Hypervolume {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    pub fn volume(&self, front: &[Vec<f64>], dimensions: usize) -> f64 {
        let reference = vec![self.offset; dimensions];
        volume(front.to_vec(), &reference)
    }
}

impl Default for Hypervolume {
    fn default() -> Self {
        Self::new(1.1)
    }
}

impl QualityIndicator for Hypervolume {
    fn name(&self) -> &'static str {
        "HV"
    }

    fn is_minimization(&self) -> bool {
        false
    }

    fn worst_value(&self) -> f64 {
        0.0
    }

    fn compute(&self, front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<f64> {
        let dimensions = check_fronts(self.name(), front, reference)?;
        Ok(self.volume(front, dimensions))
    }
}

/// `1 - HV(front) / HV(reference)`; zero when the front matches the reference
#[derive(Debug, Clone, Default)]
pub struct NormalizedHypervolume {
    hypervolume: Hypervolume,
}

impl QualityIndicator for NormalizedHypervolume {
    fn name(&self) -> &'static str {
        "NHV"
    }

    fn is_minimization(&self) -> bool {
        true
    }

    fn worst_value(&self) -> f64 {
        1.0
    }

    fn compute(&self, front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<f64> {
        let dimensions = check_fronts(self.name(), front, reference)?;
        let reference_volume = self.hypervolume.volume(reference, dimensions);
        if reference_volume <= 0.0 {
            return Err(MetaError::Computation(
                "reference front has zero hypervolume".to_string(),
            ));
        }
        Ok(1.0 - self.hypervolume.volume(front, dimensions) / reference_volume)
    }
}

fn volume(points: Vec<Vec<f64>>, reference: &[f64]) -> f64 {
    let mut front: Vec<Vec<f64>> = Vec::new();
    for point in points {
        if point.iter().zip(reference).all(|(p, r)| p < r) {
            insert_non_dominated(&mut front, point, |p| p.as_slice());
        }
    }
    if front.is_empty() {
        return 0.0;
    }

    let last = reference.len() - 1;
    match reference.len() {
        1 => reference[0] - front[0][0],
        2 => sweep(front, reference),
        _ => {
            front.sort_by(|a, b| {
                a[last]
                    .partial_cmp(&b[last])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut total = 0.0;
            for i in 0..front.len() {
                let upper = front.get(i + 1).map_or(reference[last], |p| p[last]);
                let depth = upper - front[i][last];
                if depth <= 0.0 {
                    continue;
                }
                let slice: Vec<Vec<f64>> = front[..=i].iter().map(|p| p[..last].to_vec()).collect();
                total += depth * volume(slice, &reference[..last]);
            }
            total
        }
    }
}

/// Area dominated by a mutually non-dominated 2-D set
fn sweep(mut front: Vec<Vec<f64>>, reference: &[f64]) -> f64 {
    front.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal));

    let mut area = 0.0;
    for (i, point) in front.iter().enumerate() {
        let next_x = front.get(i + 1).map_or(reference[0], |p| p[0]);
        area += (next_x - point[0]) * (reference[1] - point[1]);
    }
    area
}
