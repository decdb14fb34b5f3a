use super::configuration::Configuration;
use super::gene_consumer::GeneConsumer;
use super::parameter::Parameter;
use crate::error::{MetaError, Result};
use rand::Rng;

/// Named, ordered collection of top-level parameters for one algorithm family.
///
/// The structure is fixed once built; decoding only rewrites parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpace {
    name: String,
    parameters: Vec<Parameter>,
}

impl ParameterSpace {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a root parameter. Names must be unique across the whole space so
    /// that decoded configurations and raw arguments can address them by name.
    pub fn put(&mut self, parameter: Parameter) -> Result<()> {
        let mut existing = self.parameter_names();
        let mut incoming = Vec::new();
        parameter.names_into(&mut incoming);

        for name in incoming {
            if existing.contains(&name) {
                return Err(MetaError::Configuration(format!(
                    "parameter space '{}' already contains a parameter named '{}'",
                    self.name, name
                )));
            }
            existing.push(name);
        }

        self.parameters.push(parameter);
        Ok(())
    }

    /// Top-level parameter by name
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Parameter anywhere in the tree by name
    pub fn find(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find_map(|p| p.find(name))
    }

    pub fn top_level_parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for parameter in &self.parameters {
            parameter.names_into(&mut names);
        }
        names
    }

    /// Length of the candidate vector: the largest number of genes any
    /// combination of categorical choices can consume
    pub fn number_of_variables(&self) -> usize {
        self.parameters.iter().map(|p| p.max_genes()).sum()
    }

    /// Decode a candidate vector in traversal order and return the resulting
    /// configuration. Genes past the last reachable parameter are ignored.
    pub fn decode(&mut self, genes: &[f64]) -> Result<Configuration> {
        let expected = self.number_of_variables();
        if genes.len() != expected {
            return Err(MetaError::Parsing {
                parameter: self.name.clone(),
                message: format!(
                    "candidate vector has {} genes, expected {}",
                    genes.len(),
                    expected
                ),
            });
        }

        self.clear();
        let mut consumer = GeneConsumer::new(genes);
        for parameter in &mut self.parameters {
            parameter.decode(&mut consumer)?;
        }
        log::trace!(
            "Decoded '{}' from {} of {} genes",
            self.name,
            consumer.position(),
            expected
        );
        self.check()?;
        self.configuration()
    }

    /// Parse `--name value` tokens into the tree
    pub fn parse(&mut self, args: &[String]) -> Result<Configuration> {
        self.clear();
        for parameter in &mut self.parameters {
            parameter.parse(args)?;
        }
        self.check()?;
        self.configuration()
    }

    pub fn check(&self) -> Result<()> {
        for parameter in &self.parameters {
            parameter.check()?;
        }
        Ok(())
    }

    /// Reachable `(name, gene)` pairs under the currently decoded values
    pub fn flatten(&self) -> Vec<(String, f64)> {
        let mut out = Vec::new();
        for parameter in &self.parameters {
            parameter.flatten_into(&mut out);
        }
        out
    }

    /// Plain-data view of the current decode
    pub fn configuration(&self) -> Result<Configuration> {
        let mut entries = Vec::new();
        for parameter in &self.parameters {
            if parameter.value().is_none() {
                return Err(MetaError::Configuration(format!(
                    "parameter space '{}' has not been decoded",
                    self.name
                )));
            }
            parameter.values_into(&mut entries);
        }
        Ok(Configuration::new(entries))
    }

    /// Random candidate vector, uniform over `[0, 1)` per gene
    pub fn random_candidate<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.number_of_variables())
            .map(|_| rng.gen::<f64>())
            .collect()
    }

    pub fn clear(&mut self) {
        for parameter in &mut self.parameters {
            parameter.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn initial_solutions_space() -> ParameterSpace {
        let mut space = ParameterSpace::new("test");
        space
            .put(
                Parameter::categorical("createInitialSolutions", &["random", "latinHypercube"])
                    .unwrap()
                    .with_specific(
                        "latinHypercube",
                        Parameter::integer("latinHypercubeSamples", 10, 1000).unwrap(),
                    )
                    .unwrap(),
            )
            .unwrap();
        space
            .put(Parameter::real("mutationProbabilityFactor", 0.0, 2.0).unwrap())
            .unwrap();
        space
    }

    fn flattened_names(space: &ParameterSpace) -> Vec<String> {
        space.flatten().into_iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn test_latin_hypercube_selected_by_high_gene() {
        let mut space = initial_solutions_space();
        assert_eq!(space.number_of_variables(), 3);

        let config = space.decode(&[0.8, 0.5, 0.25]).unwrap();
        assert_eq!(config.get_str("createInitialSolutions").unwrap(), "latinHypercube");
        assert_eq!(config.get_i64("latinHypercubeSamples").unwrap(), 505);
        assert_eq!(
            flattened_names(&space),
            vec!["createInitialSolutions", "latinHypercubeSamples", "mutationProbabilityFactor"]
        );
    }

    #[test]
    fn test_random_selected_by_low_gene() {
        let mut space = initial_solutions_space();
        let config = space.decode(&[0.1, 0.25, 0.9]).unwrap();
        assert_eq!(config.get_str("createInitialSolutions").unwrap(), "random");
        assert!(!config.contains("latinHypercubeSamples"));
        assert_eq!(
            flattened_names(&space),
            vec!["createInitialSolutions", "mutationProbabilityFactor"]
        );
        // second gene is consumed by the next root when the branch is inactive
        assert_eq!(config.get_f64("mutationProbabilityFactor").unwrap(), 0.5);
    }

    #[test]
    fn test_wrong_length_vector_rejected() {
        let mut space = initial_solutions_space();
        assert!(matches!(space.decode(&[0.1, 0.2]), Err(MetaError::Parsing { .. })));
    }

    #[test]
    fn test_duplicate_names_across_roots_rejected() {
        let mut space = initial_solutions_space();
        let result = space.put(
            Parameter::categorical("selection", &["tournament"])
                .unwrap()
                .with_global(Parameter::integer("latinHypercubeSamples", 1, 2).unwrap())
                .unwrap(),
        );
        assert!(matches!(result, Err(MetaError::Configuration(_))));
    }

    #[test]
    fn test_parse_accepts_exported_arguments() {
        let mut space = initial_solutions_space();
        let decoded = space.decode(&[0.9, 0.0, 1.0]).unwrap();
        let mut other = initial_solutions_space();
        let parsed = other.parse(&decoded.to_arguments()).unwrap();
        assert_eq!(decoded, parsed);
        assert_eq!(parsed.get("latinHypercubeSamples"), Some(&ParameterValue::Integer(10)));
    }

    #[test]
    fn test_configuration_requires_decode() {
        let space = initial_solutions_space();
        assert!(space.configuration().is_err());
    }

    #[test]
    fn test_random_candidate_length_and_range() {
        let space = initial_solutions_space();
        let mut rng = StdRng::seed_from_u64(7);
        let candidate = space.random_candidate(&mut rng);
        assert_eq!(candidate.len(), 3);
        assert!(candidate.iter().all(|g| (0.0..1.0).contains(g)));
    }
}
