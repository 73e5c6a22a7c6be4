use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// Upstream query paths, one per dataset shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MissDistance,
    RelativeVelocity,
    MaxMinDiameter,
}

impl Endpoint {
    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::MissDistance,
            Endpoint::RelativeVelocity,
            Endpoint::MaxMinDiameter,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::MissDistance => "listMissDistanceJson",
            Endpoint::RelativeVelocity => "listRelativeVelocityJson",
            Endpoint::MaxMinDiameter => "listMaxMinDiameterJson",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Closest-approach distance of one asteroid, in kilometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissDistanceSample {
    pub name: String,
    pub distance: f64,
}

/// Relative velocity of one asteroid at closest approach, in km/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocitySample {
    pub name: String,
    pub velocity: f64,
}

/// Smallest and largest estimated diameter across the range, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiameterEstimate {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// A decoded endpoint response together with the value it degrades to when
/// the upstream answers with anything other than 200.
pub trait Dataset: DeserializeOwned + Send + 'static {
    fn empty() -> Self;
}

impl<T: DeserializeOwned + Send + 'static> Dataset for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl Dataset for Option<DiameterEstimate> {
    fn empty() -> Self {
        None
    }
}

/// Everything one composite plot is drawn from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub miss_distances: Vec<MissDistanceSample>,
    pub velocities: Vec<VelocitySample>,
    pub diameter: Option<DiameterEstimate>,
}
