use super::epsilon::AdditiveEpsilon;
use super::hypervolume::{Hypervolume, NormalizedHypervolume};
use super::igd::{InvertedGenerationalDistance, InvertedGenerationalDistancePlus};
use crate::error::{MetaError, Result};
use serde::{Deserialize, Serialize};

/// Quality of an approximation front measured against a reference front.
/// Both fronts are expected in the same (normalized) objective space.
pub trait QualityIndicator: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_minimization(&self) -> bool;

    /// Worst value the indicator can report, in its own orientation
    fn worst_value(&self) -> f64;

    fn compute(&self, front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<f64>;

    /// Orient `value` for minimization: larger-is-better indicators are negated
    fn as_objective(&self, value: f64) -> f64 {
        if self.is_minimization() {
            value
        } else {
            -value
        }
    }
}

/// Resolve an indicator by its short name (`EP`, `IGD`, `IGD+`, `HV`, `NHV`)
pub fn indicator_by_name(name: &str) -> Result<Box<dyn QualityIndicator>> {
    let indicator: Box<dyn QualityIndicator> = match name.trim().to_ascii_uppercase().as_str() {
        "EP" | "EPSILON" => Box::new(AdditiveEpsilon),
        "IGD" => Box::new(InvertedGenerationalDistance),
        "IGD+" | "IGDPLUS" => Box::new(InvertedGenerationalDistancePlus),
        "HV" | "HYPERVOLUME" => Box::new(Hypervolume::default()),
        "NHV" => Box::new(NormalizedHypervolume::default()),
        _ => {
            return Err(MetaError::Configuration(format!(
                "unknown quality indicator '{}'",
                name
            )))
        }
    };
    Ok(indicator)
}

pub(crate) fn check_fronts(name: &str, front: &[Vec<f64>], reference: &[Vec<f64>]) -> Result<usize> {
    if front.is_empty() || reference.is_empty() {
        return Err(MetaError::Computation(format!(
            "{} needs non-empty fronts ({} points vs {} reference points)",
            name,
            front.len(),
            reference.len()
        )));
    }

    let dimensions = reference[0].len();
    if dimensions == 0 {
        return Err(MetaError::Computation(format!(
            "{} received zero-dimensional points",
            name
        )));
    }
    if front
        .iter()
        .chain(reference)
        .any(|point| point.len() != dimensions)
    {
        return Err(MetaError::Computation(format!(
            "{} received points of mixed dimension",
            name
        )));
    }
    Ok(dimensions)
}

/// How per-problem indicator values are combined into one objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Median,
    Sum,
}

impl Aggregation {
    pub fn aggregate(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        match self {
            // incremental form stays finite when values are f64::MAX
            Aggregation::Mean => values
                .iter()
                .enumerate()
                .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64),
            Aggregation::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
                } else {
                    sorted[mid]
                }
            }
            Aggregation::Sum => values.iter().sum::<f64>().clamp(f64::MIN, f64::MAX),
        }
    }
}
