//! Local track geometry: is the vehicle on a straight or in a curve?
//!
//! The heading of the segment the vehicle is on (previous to next waypoint) is compared with the
//! heading that follows it. How the following heading is obtained is set by [`CurvaturePolicy`].

use track_reward_core::{CurvaturePolicy, Result, RewardError, StepObservation, Waypoint};

/// Shaping pipeline selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentShape {
    Straight,
    Curve,
}

impl SegmentShape {
    pub fn name(&self) -> &'static str {
        match self {
            SegmentShape::Straight => "straight",
            SegmentShape::Curve => "curve",
        }
    }
}

/// Track headings around the vehicle, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackHeading {
    /// Heading of the previous -> next segment
    pub current: f64,
    /// Heading compared against `current`
    pub next: f64,
    policy: CurvaturePolicy,
}

impl TrackHeading {
    /// Measure headings at the vehicle's closest waypoints
    pub fn measure(observation: &StepObservation, policy: CurvaturePolicy) -> Result<Self> {
        let (prev_idx, next_idx) = observation.closest_waypoints;
        let last = observation.waypoints.len().saturating_sub(1);
        let next_next_idx = next_idx.saturating_add(1).min(last);

        let prev = waypoint(observation, prev_idx)?;
        let next = waypoint(observation, next_idx)?;
        let next_next = waypoint(observation, next_next_idx)?;

        let current = segment_heading(prev, next);
        let following = match policy {
            CurvaturePolicy::AlwaysStraight => current,
            CurvaturePolicy::DoubleConverted => current.to_degrees(),
            // A zero-length segment has no heading of its own
            CurvaturePolicy::Geometric if same_point(next, next_next) => current,
            CurvaturePolicy::Geometric => segment_heading(next, next_next),
        };

        Ok(Self {
            current,
            next: following,
            policy,
        })
    }

    /// Absolute heading change in degrees
    pub fn change(&self) -> f64 {
        let diff = (self.current - self.next).abs();
        match self.policy {
            CurvaturePolicy::Geometric => {
                let diff = diff % 360.0;
                if diff > 180.0 { 360.0 - diff } else { diff }
            }
            _ => diff,
        }
    }

    pub fn shape(&self, threshold_deg: f64) -> SegmentShape {
        if self.change() > threshold_deg {
            SegmentShape::Curve
        } else {
            SegmentShape::Straight
        }
    }
}

fn waypoint(observation: &StepObservation, index: usize) -> Result<&Waypoint> {
    observation.waypoints.get(index).ok_or_else(|| {
        RewardError::InvalidGeometry(format!(
            "waypoint index {} out of range for {} waypoints",
            index,
            observation.waypoints.len()
        ))
    })
}

fn same_point(a: &Waypoint, b: &Waypoint) -> bool {
    a.x == b.x && a.y == b.y
}

fn segment_heading(from: &Waypoint, to: &Waypoint) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}
