use super::indicator::{check_fronts, QualityIndicator};
use crate::error::Result;

/// Additive epsilon: smallest shift that makes the front weakly dominate
/// every reference point
#[derive(Debug, Clone, Default)]
pub struct AdditiveEpsilon;

impl QualityIndicator for AdditiveEpsilon {
    fn name(&self) -> &'static str {
        "EP"
    }

    fn is_minimization(&self) -> bool {
        true
    }

    fn worst_value(&self) -> f64 {
        f64::MAX
    }

    fn compute(&self, front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<f64> {
        check_fronts(self.name(), front, reference)?;

        let epsilon = reference
            .iter()
            .map(|r| {
                front
                    .iter()
                    .map(|a| {
                        a.iter()
                            .zip(r)
                            .map(|(ak, rk)| ak - rk)
                            .fold(f64::NEG_INFINITY, f64::max)
                    })
                    .fold(f64::INFINITY, f64::min)
            })
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(epsilon)
    }
}
