use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded value of a single parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Categorical(String),
}

impl ParameterValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Integer(v) => Some(*v as f64),
            ParameterValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Categorical(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(v) => write!(f, "{}", v),
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Real(v) => write!(f, "{}", v),
            ParameterValue::Categorical(v) => write!(f, "{}", v),
        }
    }
}

/// A point in decision space together with its objective vector.
/// All objectives are minimized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub variables: Vec<f64>,
    pub objectives: Vec<f64>,
}

impl Solution {
    pub fn new(variables: Vec<f64>) -> Self {
        Self {
            variables,
            objectives: Vec::new(),
        }
    }

    pub fn is_evaluated(&self) -> bool {
        !self.objectives.is_empty()
    }
}

/// Objective vectors of a front, one row per point
pub type Front = Vec<Vec<f64>>;

/// Project a population onto its objective vectors
pub fn objectives_of(solutions: &[Solution]) -> Front {
    solutions.iter().map(|s| s.objectives.clone()).collect()
}
