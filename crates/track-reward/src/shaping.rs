//! Straight and curve shaping pipelines

use track_reward_core::{RewardConfig, StepObservation};

/// Multiplier applied far outside the acceptable band
const EDGE_PENALTY: f64 = 0.01;
/// Multiplier for holding the racing band in a curve
const CURVE_POSITION_BOOST: f64 = 1.10;
/// Curve band half-width as a divisor of track width
const CURVE_BAND_DIVISOR: f64 = 2.25;

/// Outcome of a shaping pipeline, before clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaped {
    pub value: f64,
    pub speed_multiplier: f64,
    pub position_multiplier: f64,
    pub curve_bonus: f64,
}

/// Speed factor on a straight.
///
/// Linear from 0.25 to 0.5 below half of `speed_max`, then exponential (0.8 at half speed,
/// 1.2 at `speed_max`, unbounded above it).
pub fn straight_speed_multiplier(speed: f64, config: &RewardConfig) -> f64 {
    if speed < config.speed_max * 0.5 {
        0.5 * (0.5 + speed / config.speed_max)
    } else {
        16.0 * 4f64.powf(0.585 * speed / config.speed_max) / 30.0
    }
}

/// Position factor on a straight, by distance band from the centerline
pub fn straight_position_multiplier(distance_from_center: f64, track_width: f64) -> f64 {
    if distance_from_center < track_width / 4.0 {
        1.3
    } else if distance_from_center < track_width / 3.0 {
        1.10
    } else if distance_from_center < track_width / 2.0 {
        0.9
    } else {
        EDGE_PENALTY
    }
}

pub fn shape_straight(base: f64, observation: &StepObservation, config: &RewardConfig) -> Shaped {
    let speed_multiplier = straight_speed_multiplier(observation.speed, config);
    let position_multiplier = straight_position_multiplier(
        observation.distance_from_center,
        observation.track_width,
    );

    Shaped {
        value: base * speed_multiplier * position_multiplier,
        speed_multiplier,
        position_multiplier,
        curve_bonus: 0.0,
    }
}

/// Inside the curve band: small boost plus a quadratic speed bonus. Outside: edge penalty.
pub fn shape_curve(base: f64, observation: &StepObservation, config: &RewardConfig) -> Shaped {
    if observation.distance_from_center < observation.track_width / CURVE_BAND_DIVISOR {
        let curve_bonus =
            config.curve_speed_bonus * (observation.speed / config.curving_speed_max).powi(2);
        Shaped {
            value: base * CURVE_POSITION_BOOST + curve_bonus,
            speed_multiplier: 1.0,
            position_multiplier: CURVE_POSITION_BOOST,
            curve_bonus,
        }
    } else {
        Shaped {
            value: base * EDGE_PENALTY,
            speed_multiplier: 1.0,
            position_multiplier: EDGE_PENALTY,
            curve_bonus: 0.0,
        }
    }
}
