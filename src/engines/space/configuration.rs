use crate::error::{MetaError, Result};
use crate::types::ParameterValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully decoded parameter tree, carried as plain data.
///
/// Holds the reachable `(name, value)` pairs in traversal order. Built once
/// per decode; everything downstream reads typed values from here instead
/// of walking the parameter tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    entries: Vec<(String, ParameterValue)>,
}

impl Configuration {
    pub fn new(entries: Vec<(String, ParameterValue)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, ParameterValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn require(&self, name: &str) -> Result<&ParameterValue> {
        self.get(name).ok_or_else(|| {
            MetaError::Configuration(format!(
                "required parameter '{}' is absent from the decoded configuration",
                name
            ))
        })
    }

    fn type_error(name: &str, value: &ParameterValue, expected: &str) -> MetaError {
        MetaError::Configuration(format!(
            "parameter '{}' has value '{}', expected {}",
            name, value, expected
        ))
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        let value = self.require(name)?;
        value
            .as_str()
            .ok_or_else(|| Self::type_error(name, value, "a categorical value"))
    }

    pub fn get_f64(&self, name: &str) -> Result<f64> {
        let value = self.require(name)?;
        value
            .as_f64()
            .ok_or_else(|| Self::type_error(name, value, "a number"))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        let value = self.require(name)?;
        value
            .as_i64()
            .ok_or_else(|| Self::type_error(name, value, "an integer"))
    }

    pub fn get_usize(&self, name: &str) -> Result<usize> {
        let value = self.get_i64(name)?;
        usize::try_from(value).map_err(|_| {
            MetaError::Configuration(format!("parameter '{}' must be non-negative, got {}", name, value))
        })
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let value = self.require(name)?;
        value
            .as_bool()
            .ok_or_else(|| Self::type_error(name, value, "a boolean"))
    }

    /// `--name value` tokens, accepted back by `ParameterSpace::parse`
    pub fn to_arguments(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(name, value)| [format!("--{}", name), value.to_string()])
            .collect()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_arguments().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Configuration {
        Configuration::new(vec![
            ("crossover".to_string(), ParameterValue::Categorical("SBX".into())),
            ("crossoverProbability".to_string(), ParameterValue::Real(0.9)),
            ("offspringPopulationSize".to_string(), ParameterValue::Integer(100)),
            ("normalize".to_string(), ParameterValue::Bool(true)),
        ])
    }

    #[test]
    fn test_typed_getters() {
        let config = sample();
        assert_eq!(config.get_str("crossover").unwrap(), "SBX");
        assert_eq!(config.get_f64("crossoverProbability").unwrap(), 0.9);
        assert_eq!(config.get_f64("offspringPopulationSize").unwrap(), 100.0);
        assert_eq!(config.get_usize("offspringPopulationSize").unwrap(), 100);
        assert!(config.get_bool("normalize").unwrap());
    }

    #[test]
    fn test_missing_and_mistyped_values() {
        let config = sample();
        assert!(matches!(config.get_str("mutation"), Err(MetaError::Configuration(_))));
        assert!(config.get_i64("crossover").is_err());
    }

    #[test]
    fn test_display_as_arguments() {
        assert_eq!(
            sample().to_string(),
            "--crossover SBX --crossoverProbability 0.9 --offspringPopulationSize 100 --normalize true"
        );
    }
}
