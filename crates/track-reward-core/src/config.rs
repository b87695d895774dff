//! Evaluator configuration
//!
//! The constants below are the process-wide reward settings. A [`RewardConfig`] is fixed when an
//! evaluator is built; nothing about it can be changed per call.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewardError};

/// Floor of every reward, and the off-track reward
pub const REWARD_MIN: f64 = 0.01;
/// Ceiling of every reward
pub const REWARD_MAX: f64 = 100_000.0;
/// Step count at which a completed lap earns exactly `REWARD_MAX`
pub const TARGET_STEPS: u64 = 150;
/// Reference speed for straight-segment shaping
pub const SPEED_MAX: f64 = 5.0;
/// Reference speed for the curve bonus
pub const CURVING_SPEED_MAX: f64 = 3.0;
/// Reserved, not used when scoring
pub const ABS_STEERING_THRESHOLD: f64 = 0.85;
/// Reserved, not used when scoring. Lane half-width as a fraction of track width.
pub const CENTER_LANE_RATIO: f64 = 0.3;
/// Heading change (degrees) above which the local segment is a curve
pub const CURVE_THRESHOLD_DEG: f64 = 3.0;
/// Scale of the speed bonus paid inside a curve
pub const CURVE_SPEED_BONUS: f64 = 10_000.0;

/// How the heading of the segment after the vehicle is obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvaturePolicy {
    /// Next heading equals the current heading: every segment scores as straight
    #[default]
    AlwaysStraight,
    /// Next heading is the current heading (already degrees) converted to degrees again.
    /// Reproduces the legacy reward script bit for bit.
    DoubleConverted,
    /// Next heading is the true heading of the following segment
    Geometric,
}

/// Reward evaluator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub reward_min: f64,
    pub reward_max: f64,
    pub target_steps: u64,
    pub speed_max: f64,
    pub curving_speed_max: f64,
    /// Reserved
    pub abs_steering_threshold: f64,
    /// Reserved
    pub center_lane_ratio: f64,
    pub curve_threshold_deg: f64,
    pub curve_speed_bonus: f64,
    pub curvature_policy: CurvaturePolicy,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            reward_min: REWARD_MIN,
            reward_max: REWARD_MAX,
            target_steps: TARGET_STEPS,
            speed_max: SPEED_MAX,
            curving_speed_max: CURVING_SPEED_MAX,
            abs_steering_threshold: ABS_STEERING_THRESHOLD,
            center_lane_ratio: CENTER_LANE_RATIO,
            curve_threshold_deg: CURVE_THRESHOLD_DEG,
            curve_speed_bonus: CURVE_SPEED_BONUS,
            curvature_policy: CurvaturePolicy::default(),
        }
    }
}

impl RewardConfig {
    /// Default constants with a different curvature policy
    pub fn with_policy(curvature_policy: CurvaturePolicy) -> Self {
        Self {
            curvature_policy,
            ..Default::default()
        }
    }

    /// Width of the reserved center lane for a given track width
    pub fn center_lane(&self, track_width: f64) -> f64 {
        track_width * self.center_lane_ratio
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("reward_min", self.reward_min),
            ("reward_max", self.reward_max),
            ("speed_max", self.speed_max),
            ("curving_speed_max", self.curving_speed_max),
            ("curve_threshold_deg", self.curve_threshold_deg),
            ("curve_speed_bonus", self.curve_speed_bonus),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RewardError::InvalidConfig(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.reward_min >= self.reward_max {
            return Err(RewardError::InvalidConfig(format!(
                "reward_min must be < reward_max, got {} >= {}",
                self.reward_min, self.reward_max
            )));
        }
        if self.target_steps == 0 {
            return Err(RewardError::InvalidConfig(
                "target_steps must be > 0".to_string(),
            ));
        }
        if self.speed_max <= 0.0 {
            return Err(RewardError::InvalidConfig(format!(
                "speed_max must be > 0, got {}",
                self.speed_max
            )));
        }
        if self.curving_speed_max <= 0.0 {
            return Err(RewardError::InvalidConfig(format!(
                "curving_speed_max must be > 0, got {}",
                self.curving_speed_max
            )));
        }
        if self.curve_threshold_deg < 0.0 {
            return Err(RewardError::InvalidConfig(format!(
                "curve_threshold_deg must be >= 0, got {}",
                self.curve_threshold_deg
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing keys take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RewardError::InvalidConfig(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RewardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reward_max, 100_000.0);
        assert_eq!(config.target_steps, 150);
        assert_eq!(config.curvature_policy, CurvaturePolicy::AlwaysStraight);
    }

    #[test]
    fn test_center_lane() {
        let config = RewardConfig::default();
        assert!((config.center_lane(2.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let config = RewardConfig {
            reward_min: 10.0,
            reward_max: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RewardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_speed_max() {
        let config = RewardConfig {
            speed_max: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let config = RewardConfig {
            curve_speed_bonus: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = RewardConfig::from_json(r#"{"curvature_policy": "geometric"}"#).unwrap();
        assert_eq!(config.curvature_policy, CurvaturePolicy::Geometric);
        assert_eq!(config.reward_min, REWARD_MIN);

        let config =
            RewardConfig::from_json(r#"{"curvature_policy": "double_converted"}"#).unwrap();
        assert_eq!(config.curvature_policy, CurvaturePolicy::DoubleConverted);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(RewardConfig::from_json(r#"{"target_steps": 0}"#).is_err());
        assert!(RewardConfig::from_json("not json").is_err());
    }
}
