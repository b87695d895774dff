//! Reward evaluator

use serde_json::Value;
use track_reward_core::{
    Result, Reward, RewardComponentDef, RewardConfig, RewardFunction, StepObservation,
};
use tracing::{Level, debug, enabled, trace};

use crate::curvature::{SegmentShape, TrackHeading};
use crate::phase::{BaseReward, Phase};
use crate::shaping::{self, Shaped};

/// Stateless per-step reward evaluator
///
/// Evaluation order for one step:
/// 1. Off-track scores `reward_min`, whatever else the observation holds.
/// 2. The observation is validated; bad geometry is returned as an error for the host to skip.
/// 3. The phase picks a base reward; terminal phases go straight to clamping.
/// 4. The straight or curve pipeline shapes the base, then the result is clamped.
#[derive(Debug, Clone, Default)]
pub struct TrackRewardEvaluator {
    config: RewardConfig,
}

impl TrackRewardEvaluator {
    /// Create an evaluator with the default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with a validated configuration
    pub fn with_config(config: RewardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Scalar reward for one step
    pub fn evaluate(&self, observation: &StepObservation) -> Result<f64> {
        Ok(self.compute(observation)?.value)
    }

    /// Scalar reward for the host's parameter mapping
    pub fn evaluate_params(&self, params: &Value) -> Result<f64> {
        let observation = StepObservation::from_params(params)?;
        self.evaluate(&observation)
    }

    /// Segment shape at the vehicle under the configured curvature policy
    pub fn segment_shape(&self, observation: &StepObservation) -> Result<SegmentShape> {
        let heading = TrackHeading::measure(observation, self.config.curvature_policy)?;
        Ok(heading.shape(self.config.curve_threshold_deg))
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.config.reward_min, self.config.reward_max)
    }

    fn finish(&self, observation: &StepObservation, reward: Reward) -> Reward {
        if enabled!(Level::TRACE) {
            match observation.state_hash() {
                Ok(hash) => trace!("Observation {} scored {}", hash, reward.value),
                Err(e) => trace!(
                    "Observation scored {} (state hash unavailable: {})",
                    reward.value,
                    e
                ),
            }
        }
        reward
    }
}

impl RewardFunction for TrackRewardEvaluator {
    type Observation = StepObservation;

    fn compute(&self, observation: &StepObservation) -> Result<Reward> {
        let phase = Phase::classify(observation);
        if phase != Phase::OffTrack {
            observation.validate()?;
        }

        let base = match phase.base_reward(&self.config) {
            BaseReward::Terminal(value) => {
                let clamped = self.clamp(value);
                debug!("Phase {} scored {} (unclamped {})", phase.name(), clamped, value);
                let reward = Reward::new(clamped)
                    .with_component("base", value)
                    .with_component("unclamped", value);
                return Ok(self.finish(observation, reward));
            }
            BaseReward::Shaped(base) => base,
        };

        let shape = self.segment_shape(observation)?;
        let Shaped {
            value,
            speed_multiplier,
            position_multiplier,
            curve_bonus,
        } = match shape {
            SegmentShape::Straight => shaping::shape_straight(base, observation, &self.config),
            SegmentShape::Curve => shaping::shape_curve(base, observation, &self.config),
        };
        let clamped = self.clamp(value);

        debug!(
            "Phase {} on {} scored {} (base {}, unclamped {})",
            phase.name(),
            shape.name(),
            clamped,
            base,
            value
        );

        let reward = Reward::new(clamped)
            .with_component("base", base)
            .with_component("speed_multiplier", speed_multiplier)
            .with_component("position_multiplier", position_multiplier)
            .with_component("curve_bonus", curve_bonus)
            .with_component("unclamped", value);
        Ok(self.finish(observation, reward))
    }

    fn components(&self) -> Vec<RewardComponentDef> {
        vec![
            RewardComponentDef::new(
                "base",
                "Phase base reward before segment shaping",
                Some([self.config.reward_min, f64::INFINITY]),
            ),
            RewardComponentDef::new(
                "speed_multiplier",
                "Straight-segment speed factor",
                Some([0.0, f64::INFINITY]),
            ),
            RewardComponentDef::new(
                "position_multiplier",
                "Distance-from-center factor",
                Some([0.01, 1.3]),
            ),
            RewardComponentDef::new(
                "curve_bonus",
                "Speed bonus held inside the curve band",
                Some([0.0, f64::INFINITY]),
            ),
            RewardComponentDef::new("unclamped", "Reward before clamping", None),
        ]
    }
}
