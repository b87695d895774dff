//! # track-reward
//!
//! Per-step reward evaluator for an autonomous vehicle lapping a track.
//!
//! Each call classifies the episode phase, picks a base reward, shapes it for the local track
//! geometry (straight or curve) and clamps the result. The evaluator is stateless: identical
//! observations always score identically, and one instance can be shared across rollout workers.
//!
//! ```no_run
//! use track_reward::TrackRewardEvaluator;
//!
//! let evaluator = TrackRewardEvaluator::new();
//! let params = serde_json::json!({ "all_wheels_on_track": false });
//! // Missing keys are rejected before anything is scored.
//! assert!(evaluator.evaluate_params(&params).is_err());
//! ```

pub mod curvature;
pub mod evaluator;
pub mod phase;
pub mod shaping;

pub use curvature::{SegmentShape, TrackHeading};
pub use evaluator::TrackRewardEvaluator;
pub use phase::{BaseReward, Phase};
pub use shaping::Shaped;
pub use track_reward_core::{
    CurvaturePolicy, Result, Reward, RewardConfig, RewardError, RewardFunction, StepObservation,
    Waypoint,
};
