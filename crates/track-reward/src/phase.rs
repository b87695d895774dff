//! Episode phase classification

use track_reward_core::{RewardConfig, StepObservation};
use tracing::warn;

/// Below this fraction of the lap the base reward is flat
const EARLY_PROGRESS: f64 = 0.1;
/// Floor on the progress fraction used for the mid-lap base reward
const PROGRESS_FLOOR: f64 = 0.4;

/// Where the episode stands at this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// At least one wheel off the track
    OffTrack,
    /// Lap finished at this step
    LapComplete { steps: u64 },
    /// Less than a tenth of the lap done
    EarlyEpisode,
    /// Mid-lap with at least one step taken
    Progressing { progress: f64 },
    /// Mid-lap progress reported at step zero
    Stalled,
}

/// Base reward chosen by the phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaseReward {
    /// Final value, only clamped
    Terminal(f64),
    /// Starting value for segment shaping
    Shaped(f64),
}

impl Phase {
    /// Classify a step, first match wins
    pub fn classify(observation: &StepObservation) -> Self {
        let progress = observation.normalized_progress();

        if !observation.on_track {
            Phase::OffTrack
        } else if progress == 1.0 {
            // Exact: the host reports 100 once the lap is done
            Phase::LapComplete {
                steps: observation.steps,
            }
        } else if progress < EARLY_PROGRESS {
            Phase::EarlyEpisode
        } else if observation.steps > 0 {
            Phase::Progressing { progress }
        } else {
            Phase::Stalled
        }
    }

    pub fn base_reward(&self, config: &RewardConfig) -> BaseReward {
        match *self {
            Phase::OffTrack => BaseReward::Terminal(config.reward_min),
            Phase::LapComplete { steps: 0 } => {
                warn!("Lap completed at step 0, scoring as reward_max");
                BaseReward::Terminal(config.reward_max)
            }
            Phase::LapComplete { steps } => BaseReward::Terminal(
                config.reward_max * config.target_steps as f64 / steps as f64,
            ),
            Phase::EarlyEpisode => BaseReward::Shaped(config.reward_max),
            Phase::Progressing { progress } => {
                BaseReward::Shaped(config.reward_max * progress.max(PROGRESS_FLOOR))
            }
            Phase::Stalled => {
                warn!("Mid-lap progress at step 0, scoring as reward_min");
                BaseReward::Terminal(config.reward_min)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::OffTrack => "off_track",
            Phase::LapComplete { .. } => "lap_complete",
            Phase::EarlyEpisode => "early_episode",
            Phase::Progressing { .. } => "progressing",
            Phase::Stalled => "stalled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use track_reward_core::Waypoint;

    fn observation(on_track: bool, progress: f64, steps: u64) -> StepObservation {
        StepObservation {
            on_track,
            x: 0.5,
            y: 0.5,
            distance_from_center: 0.0,
            heading: 0.0,
            progress,
            steps,
            speed: 1.0,
            steering_angle: 0.0,
            track_width: 1.0,
            waypoints: vec![Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 0.0)],
            is_left_of_center: false,
            closest_waypoints: (0, 1),
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(Phase::classify(&observation(false, 100.0, 10)), Phase::OffTrack);
        assert_eq!(
            Phase::classify(&observation(true, 100.0, 10)),
            Phase::LapComplete { steps: 10 }
        );
        assert_eq!(Phase::classify(&observation(true, 5.0, 0)), Phase::EarlyEpisode);
        assert_eq!(Phase::classify(&observation(true, 9.99, 40)), Phase::EarlyEpisode);
        assert_eq!(
            Phase::classify(&observation(true, 50.0, 40)),
            Phase::Progressing { progress: 0.5 }
        );
        assert_eq!(Phase::classify(&observation(true, 10.0, 0)), Phase::Stalled);
    }

    #[test]
    fn test_lap_completion_scaling() {
        let config = RewardConfig::default();
        assert_eq!(
            Phase::LapComplete { steps: 75 }.base_reward(&config),
            BaseReward::Terminal(200_000.0)
        );
        assert_eq!(
            Phase::LapComplete { steps: 300 }.base_reward(&config),
            BaseReward::Terminal(50_000.0)
        );
    }

    #[test]
    fn test_zero_step_guards() {
        let config = RewardConfig::default();
        assert_eq!(
            Phase::LapComplete { steps: 0 }.base_reward(&config),
            BaseReward::Terminal(config.reward_max)
        );
        assert_eq!(
            Phase::Stalled.base_reward(&config),
            BaseReward::Terminal(config.reward_min)
        );
    }

    #[test]
    fn test_progress_floor() {
        let config = RewardConfig::default();
        assert_eq!(
            Phase::Progressing { progress: 0.2 }.base_reward(&config),
            BaseReward::Shaped(40_000.0)
        );
        assert_eq!(
            Phase::Progressing { progress: 0.75 }.base_reward(&config),
            BaseReward::Shaped(75_000.0)
        );
        assert_eq!(
            Phase::EarlyEpisode.base_reward(&config),
            BaseReward::Shaped(config.reward_max)
        );
    }
}
