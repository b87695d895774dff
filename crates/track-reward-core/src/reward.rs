//! Reward types and the reward function trait

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// Scalar reward with optional decomposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    /// Total scalar reward
    pub value: f64,
    /// Decomposed components for analysis
    #[serde(default)]
    pub components: RewardComponents,
}

impl Reward {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            components: RewardComponents::new(),
        }
    }

    /// Attach a named component
    pub fn with_component(mut self, name: &str, value: f64) -> Self {
        self.components.insert(name.to_string(), value);
        self
    }

    pub fn component(&self, name: &str) -> Option<f64> {
        self.components.get(name).copied()
    }
}

/// Decomposed reward components
pub type RewardComponents = HashMap<String, f64>;

/// Definition of a reward component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardComponentDef {
    /// Component name
    pub name: String,
    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl RewardComponentDef {
    pub fn new(name: &str, description: &str, range: Option<[f64; 2]>) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            range,
        }
    }
}

/// Trait for computing a per-step reward from an observation
pub trait RewardFunction: Send + Sync {
    /// Observation type for this reward function
    type Observation;

    /// Compute the reward for one step
    fn compute(&self, observation: &Self::Observation) -> Result<Reward>;

    /// List available reward components
    fn components(&self) -> Vec<RewardComponentDef>;
}
