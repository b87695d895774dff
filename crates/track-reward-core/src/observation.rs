//! Step observation types
//!
//! A [`StepObservation`] is supplied by the host once per simulation step. On the wire it is a
//! flat JSON object keyed by [`REQUIRED_KEYS`]; every key must be present.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{Result, RewardError};

/// Keys the host must supply for every step
pub const REQUIRED_KEYS: &[&str] = &[
    "all_wheels_on_track",
    "x",
    "y",
    "distance_from_center",
    "heading",
    "progress",
    "steps",
    "speed",
    "steering_angle",
    "track_width",
    "waypoints",
    "is_left_of_center",
    "closest_waypoints",
];

/// Vehicle and track state for one simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObservation {
    /// Vehicle footprint fully inside the track boundaries
    #[serde(rename = "all_wheels_on_track")]
    pub on_track: bool,

    /// Normalized x position. Not used when scoring.
    pub x: f64,

    /// Normalized y position. Not used when scoring.
    pub y: f64,

    /// Displacement from the centerline
    pub distance_from_center: f64,

    /// Vehicle yaw in degrees. Not used when scoring.
    pub heading: f64,

    /// Raw percent of lap complete, 0 to 100
    pub progress: f64,

    /// Steps elapsed in the episode
    pub steps: u64,

    /// Vehicle speed
    pub speed: f64,

    /// Steering angle in degrees, -30 (right) to 30 (left). Reserved.
    pub steering_angle: f64,

    /// Track width
    pub track_width: f64,

    /// Centerline waypoints, fixed per track
    pub waypoints: Vec<Waypoint>,

    /// Vehicle left of the centerline. Reserved.
    pub is_left_of_center: bool,

    /// Indices of the (previous, next) waypoints bracketing the vehicle
    pub closest_waypoints: (usize, usize),
}

/// A centerline reference point, `[x, y]` or `[x, y, heading]` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub heading: Option<f64>,
}

impl Waypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, heading: None }
    }
}

impl TryFrom<Vec<f64>> for Waypoint {
    type Error = String;

    fn try_from(values: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match values.as_slice() {
            [x, y] => Ok(Self::new(*x, *y)),
            [x, y, heading] => Ok(Self {
                x: *x,
                y: *y,
                heading: Some(*heading),
            }),
            other => Err(format!(
                "waypoint must have 2 or 3 coordinates, got {}",
                other.len()
            )),
        }
    }
}

impl From<Waypoint> for Vec<f64> {
    fn from(waypoint: Waypoint) -> Self {
        match waypoint.heading {
            Some(heading) => vec![waypoint.x, waypoint.y, heading],
            None => vec![waypoint.x, waypoint.y],
        }
    }
}

impl StepObservation {
    /// Parse the host's parameter mapping.
    ///
    /// An absent or null key is a [`RewardError::MissingField`]; a value of the wrong shape is a
    /// [`RewardError::SerializationError`]. Extra keys are ignored.
    pub fn from_params(params: &Value) -> Result<Self> {
        let map = params.as_object().ok_or_else(|| {
            RewardError::SerializationError("observation must be a JSON object".to_string())
        })?;

        for key in REQUIRED_KEYS {
            match map.get(*key) {
                None | Some(Value::Null) => return Err(RewardError::MissingField(key.to_string())),
                Some(_) => {}
            }
        }

        Ok(Self::deserialize(params)?)
    }

    /// Parse a JSON-encoded parameter mapping
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Value = serde_json::from_str(json)?;
        Self::from_params(&params)
    }

    /// Progress rescaled to a fraction of the lap
    pub fn normalized_progress(&self) -> f64 {
        self.progress / 100.0
    }

    /// Check everything scoring depends on
    pub fn validate(&self) -> Result<()> {
        self.validate_scalars()?;
        self.validate_geometry()
    }

    /// Reject non-finite kinematic values
    pub fn validate_scalars(&self) -> Result<()> {
        let scalars = [
            ("x", self.x),
            ("y", self.y),
            ("distance_from_center", self.distance_from_center),
            ("heading", self.heading),
            ("progress", self.progress),
            ("speed", self.speed),
            ("steering_angle", self.steering_angle),
        ];
        match scalars.iter().find(|(_, v)| !v.is_finite()) {
            Some((name, value)) => Err(RewardError::InvalidObservation(format!(
                "{} must be finite, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }

    /// Reject track geometry that cannot be scored
    pub fn validate_geometry(&self) -> Result<()> {
        if !(self.track_width.is_finite() && self.track_width > 0.0) {
            return Err(RewardError::InvalidGeometry(format!(
                "track_width must be > 0, got {}",
                self.track_width
            )));
        }
        if self.waypoints.len() < 2 {
            return Err(RewardError::InvalidGeometry(format!(
                "at least 2 waypoints required, got {}",
                self.waypoints.len()
            )));
        }
        if let Some(i) = self
            .waypoints
            .iter()
            .position(|w| !(w.x.is_finite() && w.y.is_finite()))
        {
            return Err(RewardError::InvalidGeometry(format!(
                "waypoint {} has a non-finite coordinate",
                i
            )));
        }
        let (prev, next) = self.closest_waypoints;
        let len = self.waypoints.len();
        if prev >= len || next >= len {
            return Err(RewardError::InvalidGeometry(format!(
                "closest_waypoints ({}, {}) out of range for {} waypoints",
                prev, next, len
            )));
        }
        Ok(())
    }

    /// Hex SHA-256 of the canonical JSON form, for replay verification
    pub fn state_hash(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(hex::encode(Sha256::digest(json.as_bytes())))
    }
}
