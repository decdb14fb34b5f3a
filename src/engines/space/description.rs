//! Declarative parameter-space descriptions.
//!
//! A description lists the root parameters of a space, each with a `type`
//! (`boolean`, `integer`, `real` or `categorical`), its domain, and optional
//! `global` and `specific` sub-parameters. Specific sub-parameters name the
//! parent value that activates them with `when`. TOML and JSON are accepted,
//! chosen by file extension.

use super::parameter::{Domain, Parameter};
use super::parameter_space::ParameterSpace;
use crate::error::{MetaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const NSGAII_SPACE: &str = include_str!("../../../resources/nsgaii.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceDescription {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDescription {
    pub name: String,
    #[serde(flatten)]
    pub domain: Domain,
    /// Parent value activating this parameter; only valid for specific entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global: Vec<ParameterDescription>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific: Vec<ParameterDescription>,
}

impl ParameterDescription {
    fn into_parameter(self) -> Result<Parameter> {
        let mut parameter = Parameter::new(&self.name, self.domain)?;

        for child in self.global {
            if let Some(key) = &child.when {
                return Err(MetaError::Configuration(format!(
                    "global sub-parameter '{}' of '{}' must not declare when = '{}'",
                    child.name, self.name, key
                )));
            }
            parameter.attach_global(child.into_parameter()?)?;
        }

        for mut child in self.specific {
            let key = child.when.take().ok_or_else(|| {
                MetaError::Configuration(format!(
                    "specific sub-parameter '{}' of '{}' is missing its 'when' key",
                    child.name, self.name
                ))
            })?;
            parameter.attach_specific(&key, child.into_parameter()?)?;
        }

        Ok(parameter)
    }
}

impl SpaceDescription {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| {
            MetaError::Configuration(format!("Failed to parse parameter space: {}", e))
        })
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| {
            MetaError::Configuration(format!("Failed to parse parameter space: {}", e))
        })
    }

    pub fn into_space(self) -> Result<ParameterSpace> {
        if self.parameters.is_empty() {
            return Err(MetaError::Configuration(format!(
                "parameter space '{}' declares no parameters",
                self.name
            )));
        }
        let mut space = ParameterSpace::new(&self.name);
        for description in self.parameters {
            space.put(description.into_parameter()?)?;
        }
        Ok(space)
    }
}

impl ParameterSpace {
    /// Load a description file, failing immediately on missing or malformed input
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MetaError::Configuration(format!(
                "Failed to read parameter space {}: {}",
                path.display(),
                e
            ))
        })?;

        let description = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SpaceDescription::from_json(&contents)?,
            _ => SpaceDescription::from_toml(&contents)?,
        };

        let space = description.into_space()?;
        log::info!(
            "Loaded parameter space '{}' from {} ({} variables)",
            space.name(),
            path.display(),
            space.number_of_variables()
        );
        Ok(space)
    }

    /// Bundled NSGA-II family space
    pub fn nsgaii() -> Result<Self> {
        SpaceDescription::from_toml(NSGAII_SPACE)?.into_space()
    }
}
