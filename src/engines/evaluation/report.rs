use crate::engines::space::Configuration;
use crate::error::Result;
use crate::types::ParameterValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exported description of one evaluated configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationReport {
    pub space: String,
    pub timestamp: DateTime<Utc>,
    pub candidate: Vec<f64>,
    pub objectives: Vec<NamedObjective>,
    pub parameters: Vec<(String, ParameterValue)>,
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedObjective {
    pub indicator: String,
    pub value: f64,
}

impl ConfigurationReport {
    pub fn new(
        space: &str,
        candidate: &[f64],
        configuration: &Configuration,
        names: &[String],
        objectives: &[f64],
    ) -> Self {
        Self {
            space: space.to_string(),
            timestamp: Utc::now(),
            candidate: candidate.to_vec(),
            objectives: names
                .iter()
                .zip(objectives)
                .map(|(indicator, value)| NamedObjective {
                    indicator: indicator.clone(),
                    value: *value,
                })
                .collect(),
            parameters: configuration.entries().to_vec(),
            arguments: configuration.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
