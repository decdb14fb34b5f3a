use super::gene_consumer::{choice_index, integer_value, GeneConsumer};
use crate::error::{MetaError, Result};
use crate::types::ParameterValue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Boolean,
    Integer,
    Real,
    Categorical,
}

/// Valid values of a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Domain {
    Boolean,
    Integer { min: i64, max: i64 },
    Real { min: f64, max: f64 },
    Categorical { values: Vec<String> },
}

const BOOLEAN_VALUES: [&str; 2] = ["false", "true"];

impl Domain {
    pub fn kind(&self) -> ParameterKind {
        match self {
            Domain::Boolean => ParameterKind::Boolean,
            Domain::Integer { .. } => ParameterKind::Integer,
            Domain::Real { .. } => ParameterKind::Real,
            Domain::Categorical { .. } => ParameterKind::Categorical,
        }
    }

    /// Check the domain itself is well formed
    pub fn validate(&self, parameter: &str) -> Result<()> {
        match self {
            Domain::Integer { min, max } if min > max => Err(MetaError::Configuration(format!(
                "parameter '{}' has empty integer domain [{}, {}]",
                parameter, min, max
            ))),
            Domain::Real { min, max } if !(min <= max) || !min.is_finite() || !max.is_finite() => {
                Err(MetaError::Configuration(format!(
                    "parameter '{}' has invalid real domain [{}, {}]",
                    parameter, min, max
                )))
            }
            Domain::Categorical { values } => {
                if values.is_empty() {
                    return Err(MetaError::Configuration(format!(
                        "categorical parameter '{}' has no valid values",
                        parameter
                    )));
                }
                for (i, value) in values.iter().enumerate() {
                    if values[..i].contains(value) {
                        return Err(MetaError::Configuration(format!(
                            "categorical parameter '{}' lists '{}' twice",
                            parameter, value
                        )));
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Keys under which specific sub-parameters may be attached
    pub fn keys(&self) -> Option<Vec<String>> {
        match self {
            Domain::Boolean => Some(BOOLEAN_VALUES.iter().map(|s| s.to_string()).collect()),
            Domain::Categorical { values } => Some(values.clone()),
            _ => None,
        }
    }

    pub fn contains(&self, value: &ParameterValue) -> bool {
        match (self, value) {
            (Domain::Boolean, ParameterValue::Bool(_)) => true,
            (Domain::Integer { min, max }, ParameterValue::Integer(v)) => v >= min && v <= max,
            (Domain::Real { min, max }, ParameterValue::Real(v)) => v >= min && v <= max,
            (Domain::Categorical { values }, ParameterValue::Categorical(v)) => values.contains(v),
            _ => false,
        }
    }

    /// Type-specific parser for raw argument values
    pub fn parse_value(&self, raw: &str) -> std::result::Result<ParameterValue, String> {
        match self {
            Domain::Boolean => raw
                .parse::<bool>()
                .map(ParameterValue::Bool)
                .map_err(|_| format!("'{}' is not a boolean", raw)),
            Domain::Integer { .. } => raw
                .parse::<i64>()
                .map(ParameterValue::Integer)
                .map_err(|_| format!("'{}' is not an integer", raw)),
            Domain::Real { .. } => raw
                .parse::<f64>()
                .map(ParameterValue::Real)
                .map_err(|_| format!("'{}' is not a real number", raw)),
            Domain::Categorical { .. } => Ok(ParameterValue::Categorical(raw.to_string())),
        }
    }

    /// Map a normalized gene onto this domain
    pub fn decode(&self, gene: f64) -> ParameterValue {
        let gene = if gene.is_nan() { 0.0 } else { gene.clamp(0.0, 1.0) };
        match self {
            Domain::Boolean => ParameterValue::Bool(choice_index(gene, 2) == 1),
            Domain::Integer { min, max } => ParameterValue::Integer(integer_value(gene, *min, *max)),
            Domain::Real { min, max } => ParameterValue::Real(real_value(gene, *min, *max)),
            Domain::Categorical { values } => {
                ParameterValue::Categorical(values[choice_index(gene, values.len())].clone())
            }
        }
    }

    /// Inverse of [`Domain::decode`]. Categorical values encode to the middle
    /// of their gene interval so that decoding recovers the exact index.
    pub fn encode(&self, value: &ParameterValue) -> Option<f64> {
        match (self, value) {
            (Domain::Boolean, ParameterValue::Bool(v)) => Some(if *v { 0.75 } else { 0.25 }),
            (Domain::Integer { min, max }, ParameterValue::Integer(v)) => {
                Some(normalize(*v as f64, *min as f64, *max as f64))
            }
            (Domain::Real { min, max }, ParameterValue::Real(v)) => Some(normalize(*v, *min, *max)),
            (Domain::Categorical { values }, ParameterValue::Categorical(v)) => {
                let index = values.iter().position(|candidate| candidate == v)?;
                Some((index as f64 + 0.5) / values.len() as f64)
            }
            _ => None,
        }
    }
}

/// Linear map onto `[min, max]`. Rounding can step one ulp past `max`
/// near the top of the gene range, so the result is clamped.
fn real_value(gene: f64, min: f64, max: f64) -> f64 {
    (min + gene * (max - min)).clamp(min, max)
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        0.0
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Boolean => write!(f, "{{false, true}}"),
            Domain::Integer { min, max } => write!(f, "integer in [{}, {}]", min, max),
            Domain::Real { min, max } => write!(f, "real in [{}, {}]", min, max),
            Domain::Categorical { values } => write!(f, "one of {{{}}}", values.join(", ")),
        }
    }
}

/// A named, typed configuration value together with its sub-parameters.
///
/// Global sub-parameters are active whenever this parameter is; specific
/// sub-parameters are active only while this parameter's value equals their
/// key. The tree owns all of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    domain: Domain,
    value: Option<ParameterValue>,
    global: Vec<Parameter>,
    specific: Vec<(String, Parameter)>,
}

impl Parameter {
    pub fn new(name: &str, domain: Domain) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(MetaError::Configuration(
                "parameter name must not be empty".to_string(),
            ));
        }
        domain.validate(name)?;
        Ok(Self {
            name: name.to_string(),
            domain,
            value: None,
            global: Vec::new(),
            specific: Vec::new(),
        })
    }

    pub fn boolean(name: &str) -> Result<Self> {
        Self::new(name, Domain::Boolean)
    }

    pub fn integer(name: &str, min: i64, max: i64) -> Result<Self> {
        Self::new(name, Domain::Integer { min, max })
    }

    pub fn real(name: &str, min: f64, max: f64) -> Result<Self> {
        Self::new(name, Domain::Real { min, max })
    }

    pub fn categorical(name: &str, values: &[&str]) -> Result<Self> {
        Self::new(
            name,
            Domain::Categorical {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn kind(&self) -> ParameterKind {
        self.domain.kind()
    }

    pub fn value(&self) -> Option<&ParameterValue> {
        self.value.as_ref()
    }

    pub fn global_parameters(&self) -> &[Parameter] {
        &self.global
    }

    pub fn specific_parameters(&self) -> &[(String, Parameter)] {
        &self.specific
    }

    /// Set the value, rejecting anything outside the domain
    pub fn set_value(&mut self, value: ParameterValue) -> Result<()> {
        if !self.domain.contains(&value) {
            return Err(self.validation_error(&value));
        }
        self.value = Some(value);
        Ok(())
    }

    pub fn attach_global(&mut self, child: Parameter) -> Result<()> {
        self.ensure_unique_child(&child.name)?;
        self.global.push(child);
        Ok(())
    }

    pub fn attach_specific(&mut self, key: &str, child: Parameter) -> Result<()> {
        let keys = self.domain.keys().ok_or_else(|| {
            MetaError::Configuration(format!(
                "parameter '{}' is not categorical and cannot have specific sub-parameters",
                self.name
            ))
        })?;
        if !keys.iter().any(|k| k == key) {
            return Err(MetaError::Configuration(format!(
                "cannot attach '{}' to '{}' under key '{}': expected {}",
                child.name, self.name, key, self.domain
            )));
        }
        self.ensure_unique_child(&child.name)?;
        self.specific.push((key.to_string(), child));
        Ok(())
    }

    /// Builder-style variant of [`Parameter::attach_global`]
    pub fn with_global(mut self, child: Parameter) -> Result<Self> {
        self.attach_global(child)?;
        Ok(self)
    }

    /// Builder-style variant of [`Parameter::attach_specific`]
    pub fn with_specific(mut self, key: &str, child: Parameter) -> Result<Self> {
        self.attach_specific(key, child)?;
        Ok(self)
    }

    fn ensure_unique_child(&self, name: &str) -> Result<()> {
        let clash = self.global.iter().any(|p| p.name == name)
            || self.specific.iter().any(|(_, p)| p.name == name);
        if clash || name == self.name {
            return Err(MetaError::Configuration(format!(
                "parameter '{}' already has a sub-parameter named '{}'",
                self.name, name
            )));
        }
        Ok(())
    }

    /// Specific sub-parameters whose key matches the current value
    pub fn active_specific(&self) -> impl Iterator<Item = &Parameter> {
        let current = self.value.as_ref().map(|v| v.to_string());
        self.specific
            .iter()
            .filter(move |(key, _)| current.as_deref() == Some(key.as_str()))
            .map(|(_, p)| p)
    }

    fn active_specific_mut(&mut self) -> impl Iterator<Item = &mut Parameter> {
        let current = self.value.as_ref().map(|v| v.to_string());
        self.specific
            .iter_mut()
            .filter(move |(key, _)| current.as_deref() == Some(key.as_str()))
            .map(|(_, p)| p)
    }

    /// Validate the value against the domain, recursing into reachable children
    pub fn check(&self) -> Result<()> {
        match &self.value {
            None => {
                return Err(MetaError::Validation {
                    parameter: self.name.clone(),
                    value: "<unset>".to_string(),
                    domain: self.domain.to_string(),
                })
            }
            Some(value) if !self.domain.contains(value) => return Err(self.validation_error(value)),
            Some(_) => {}
        }
        for child in &self.global {
            child.check()?;
        }
        for child in self.active_specific() {
            child.check()?;
        }
        Ok(())
    }

    fn validation_error(&self, value: &ParameterValue) -> MetaError {
        MetaError::Validation {
            parameter: self.name.clone(),
            value: value.to_string(),
            domain: self.domain.to_string(),
        }
    }

    /// Locate `--name value` among the raw arguments, parse and validate it,
    /// then parse the reachable children
    pub fn parse(&mut self, args: &[String]) -> Result<()> {
        let flag = format!("--{}", self.name);
        let raw = args
            .windows(2)
            .find(|pair| pair[0] == flag)
            .map(|pair| pair[1].as_str())
            .ok_or_else(|| MetaError::Parsing {
                parameter: self.name.clone(),
                message: format!("missing value for {}", flag),
            })?;

        let value = self.domain.parse_value(raw).map_err(|message| MetaError::Parsing {
            parameter: self.name.clone(),
            message,
        })?;
        self.set_value(value)?;

        for child in &mut self.global {
            child.parse(args)?;
        }
        for child in self.active_specific_mut() {
            child.parse(args)?;
        }
        Ok(())
    }

    /// Consume genes for this parameter and its reachable children
    pub fn decode(&mut self, consumer: &mut GeneConsumer) -> Result<()> {
        let gene = consumer.consume(&self.name)?;
        let value = self.domain.decode(gene);
        self.set_value(value)?;

        for child in &mut self.global {
            child.decode(consumer)?;
        }
        for child in self.active_specific_mut() {
            child.decode(consumer)?;
        }
        Ok(())
    }

    /// Append `(name, gene)` pairs of every reachable parameter in traversal order
    pub fn flatten_into(&self, out: &mut Vec<(String, f64)>) {
        let Some(value) = &self.value else {
            return;
        };
        if let Some(gene) = self.domain.encode(value) {
            out.push((self.name.clone(), gene));
        }
        for child in &self.global {
            child.flatten_into(out);
        }
        for child in self.active_specific() {
            child.flatten_into(out);
        }
    }

    /// Append `(name, value)` pairs of every reachable parameter in traversal order
    pub fn values_into(&self, out: &mut Vec<(String, ParameterValue)>) {
        let Some(value) = &self.value else {
            return;
        };
        out.push((self.name.clone(), value.clone()));
        for child in &self.global {
            child.values_into(out);
        }
        for child in self.active_specific() {
            child.values_into(out);
        }
    }

    /// Largest number of genes this subtree can consume under any choice
    pub fn max_genes(&self) -> usize {
        let globals: usize = self.global.iter().map(|p| p.max_genes()).sum();
        let specific = self
            .domain
            .keys()
            .unwrap_or_default()
            .iter()
            .map(|key| {
                self.specific
                    .iter()
                    .filter(|(k, _)| k == key)
                    .map(|(_, p)| p.max_genes())
                    .sum::<usize>()
            })
            .max()
            .unwrap_or(0);
        1 + globals + specific
    }

    pub fn clear(&mut self) {
        self.value = None;
        for child in &mut self.global {
            child.clear();
        }
        for (_, child) in &mut self.specific {
            child.clear();
        }
    }

    /// Depth-first search over the whole subtree, reachable or not
    pub fn find(&self, name: &str) -> Option<&Parameter> {
        if self.name == name {
            return Some(self);
        }
        self.global
            .iter()
            .chain(self.specific.iter().map(|(_, p)| p))
            .find_map(|p| p.find(name))
    }

    /// Every parameter name in the subtree, reachable or not
    pub fn names_into(&self, out: &mut Vec<String>) {
        out.push(self.name.clone());
        for child in &self.global {
            child.names_into(out);
        }
        for (_, child) in &self.specific {
            child.names_into(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossover() -> Parameter {
        Parameter::categorical("crossover", &["SBX", "BLX_ALPHA"])
            .unwrap()
            .with_global(Parameter::real("crossoverProbability", 0.0, 1.0).unwrap())
            .unwrap()
            .with_specific("SBX", Parameter::real("sbxDistributionIndex", 5.0, 400.0).unwrap())
            .unwrap()
            .with_specific("BLX_ALPHA", Parameter::real("blxAlpha", 0.0, 1.0).unwrap())
            .unwrap()
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_attach_specific_rejects_unknown_key() {
        let mut parameter = Parameter::categorical("selection", &["tournament", "random"]).unwrap();
        let result = parameter.attach_specific("roulette", Parameter::integer("size", 2, 10).unwrap());
        assert!(matches!(result, Err(MetaError::Configuration(_))));
    }

    #[test]
    fn test_attach_specific_requires_categorical_parent() {
        let mut parameter = Parameter::real("probability", 0.0, 1.0).unwrap();
        assert!(parameter
            .attach_specific("0.5", Parameter::boolean("flag").unwrap())
            .is_err());
    }

    #[test]
    fn test_duplicate_child_names_rejected() {
        let mut parameter = crossover();
        assert!(parameter
            .attach_global(Parameter::real("crossoverProbability", 0.0, 1.0).unwrap())
            .is_err());
    }

    #[test]
    fn test_invalid_domains_rejected() {
        assert!(Parameter::integer("n", 5, 1).is_err());
        assert!(Parameter::real("x", f64::NAN, 1.0).is_err());
        assert!(Parameter::categorical("c", &[]).is_err());
        assert!(Parameter::categorical("c", &["a", "a"]).is_err());
    }

    #[test]
    fn test_check_reports_parameter_and_domain() {
        let mut parameter = Parameter::integer("tournamentSize", 2, 10).unwrap();
        parameter.value = Some(ParameterValue::Integer(42));
        match parameter.check() {
            Err(MetaError::Validation { parameter, value, domain }) => {
                assert_eq!(parameter, "tournamentSize");
                assert_eq!(value, "42");
                assert!(domain.contains("[2, 10]"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_follows_active_branch_only() {
        let mut parameter = crossover();
        parameter
            .parse(&args(&["--crossover", "SBX", "--crossoverProbability", "0.9", "--sbxDistributionIndex", "20.0"]))
            .unwrap();
        let mut values = Vec::new();
        parameter.values_into(&mut values);
        let names: Vec<_> = values.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["crossover", "crossoverProbability", "sbxDistributionIndex"]);
    }

    #[test]
    fn test_parse_missing_value_fails() {
        let mut parameter = crossover();
        let result = parameter.parse(&args(&["--crossover", "BLX_ALPHA", "--crossoverProbability", "0.9"]));
        match result {
            Err(MetaError::Parsing { parameter, .. }) => assert_eq!(parameter, "blxAlpha"),
            other => panic!("expected parsing error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_wrong_type_fails() {
        let mut parameter = Parameter::integer("offspring", 1, 100).unwrap();
        let result = parameter.parse(&args(&["--offspring", "many"]));
        assert!(matches!(result, Err(MetaError::Parsing { .. })));
    }

    #[test]
    fn test_parse_out_of_domain_fails_validation() {
        let mut parameter = Parameter::categorical("selection", &["tournament", "random"]).unwrap();
        let result = parameter.parse(&args(&["--selection", "roulette"]));
        assert!(matches!(result, Err(MetaError::Validation { .. })));
    }

    #[test]
    fn test_decode_and_flatten_in_traversal_order() {
        let mut parameter = crossover();
        let genes = [0.9, 0.3, 0.5, 0.77];
        let mut consumer = GeneConsumer::new(&genes);
        parameter.decode(&mut consumer).unwrap();
        // BLX_ALPHA branch consumes one specific gene, leaving one unused
        assert_eq!(consumer.position(), 3);
        assert_eq!(parameter.value(), Some(&ParameterValue::Categorical("BLX_ALPHA".into())));

        let mut flat = Vec::new();
        parameter.flatten_into(&mut flat);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0], ("crossover".to_string(), 0.75));
        assert_eq!(flat[1].0, "crossoverProbability");
        assert!((flat[1].1 - 0.3).abs() < 1e-12);
        assert_eq!(flat[2].0, "blxAlpha");
    }

    #[test]
    fn test_max_genes_takes_largest_branch() {
        let parameter = Parameter::categorical("c", &["a", "b"])
            .unwrap()
            .with_specific("a", Parameter::boolean("x").unwrap())
            .unwrap()
            .with_specific("b", Parameter::boolean("y").unwrap())
            .unwrap()
            .with_specific("b", Parameter::boolean("z").unwrap())
            .unwrap();
        assert_eq!(parameter.max_genes(), 3);
        assert_eq!(crossover().max_genes(), 3);
    }

    #[test]
    fn test_boolean_specific_keys() {
        let mut parameter = Parameter::boolean("useArchive")
            .unwrap()
            .with_specific("true", Parameter::integer("archiveSize", 10, 100).unwrap())
            .unwrap();
        let genes = [0.9, 0.0];
        parameter.decode(&mut GeneConsumer::new(&genes)).unwrap();
        let mut values = Vec::new();
        parameter.values_into(&mut values);
        assert_eq!(values[1], ("archiveSize".to_string(), ParameterValue::Integer(10)));
    }

    #[test]
    fn test_encode_inverts_decode() {
        let domain = Domain::Categorical {
            values: vec!["a".into(), "b".into(), "c".into()],
        };
        for index in 0..3 {
            let value = ParameterValue::Categorical(["a", "b", "c"][index].to_string());
            let gene = domain.encode(&value).unwrap();
            assert_eq!(domain.decode(gene), value);
        }
        let integers = Domain::Integer { min: 10, max: 1000 };
        let value = integers.decode(0.3337);
        assert_eq!(integers.decode(integers.encode(&value).unwrap()), value);
    }

    #[test]
    fn test_real_upper_gene_stays_in_domain() {
        for (min, max) in [(0.3, 0.9), (-0.1, 0.3), (5.0, 400.0)] {
            let domain = Domain::Real { min, max };
            assert_eq!(domain.decode(1.0), ParameterValue::Real(max));
            assert_eq!(domain.decode(0.0), ParameterValue::Real(min));
            for step in 0..=1000 {
                let value = domain.decode(step as f64 / 1000.0);
                assert!(domain.contains(&value), "{:?} outside [{}, {}]", value, min, max);
            }
        }
    }

    #[test]
    fn test_real_parameter_decodes_top_gene() {
        let mut parameter = Parameter::real("rate", 0.3, 0.9).unwrap();
        parameter.decode(&mut GeneConsumer::new(&[1.0])).unwrap();
        assert_eq!(parameter.value(), Some(&ParameterValue::Real(0.9)));
    }
}
