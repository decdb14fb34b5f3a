use crate::error::{MetaError, Result};

/// Deterministically consumes normalized genes from a candidate vector.
///
/// Genes are read strictly in traversal order; every categorical decision
/// made on an earlier gene decides which parameters consume the following
/// ones. Genes are clamped into `[0, 1]` before being mapped to a domain.
pub struct GeneConsumer<'a> {
    genes: &'a [f64],
    position: usize,
}

impl<'a> GeneConsumer<'a> {
    pub fn new(genes: &'a [f64]) -> Self {
        Self { genes, position: 0 }
    }

    /// Consume next gene on behalf of `parameter`
    pub fn consume(&mut self, parameter: &str) -> Result<f64> {
        let gene = *self.genes.get(self.position).ok_or_else(|| MetaError::Parsing {
            parameter: parameter.to_string(),
            message: format!(
                "candidate vector exhausted after {} genes",
                self.genes.len()
            ),
        })?;

        if gene.is_nan() {
            return Err(MetaError::Parsing {
                parameter: parameter.to_string(),
                message: format!("gene at position {} is NaN", self.position),
            });
        }

        self.position += 1;
        Ok(gene.clamp(0.0, 1.0))
    }

    /// Number of genes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }
}

pub(crate) fn choice_index(gene: f64, num_choices: usize) -> usize {
    if num_choices == 0 {
        return 0;
    }
    let index = (gene * num_choices as f64).floor();
    (index.max(0.0) as usize).min(num_choices - 1)
}

pub(crate) fn integer_value(gene: f64, min: i64, max: i64) -> i64 {
    if min >= max {
        return min;
    }
    let value = (min as f64 + gene * (max - min) as f64).round() as i64;
    value.clamp(min, max)
}
