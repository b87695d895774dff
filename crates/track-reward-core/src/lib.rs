//! # track-reward-core
//!
//! Core types for per-step track reward evaluation.
//!
//! This crate provides the contract shared between a training host and a reward evaluator:
//! - Step observations and waypoints
//! - Reward values and their decomposition
//! - Evaluator configuration
//! - Error taxonomy

pub mod config;
pub mod error;
pub mod observation;
pub mod reward;

pub use config::{CurvaturePolicy, RewardConfig};
pub use error::{Result, RewardError};
pub use observation::{REQUIRED_KEYS, StepObservation, Waypoint};
pub use reward::{Reward, RewardComponentDef, RewardComponents, RewardFunction};
