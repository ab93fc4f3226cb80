//! Travel mode enum carried by "vehicle enters traffic" events.
//!
//! Occupancy analyzers track a configured subset of modes; vehicles in any
//! other mode are ignored for the rest of their trip.

use std::str::FromStr;

use crate::CoreError;

/// The network mode a vehicle travels in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// Private vehicle.
    Car,
    /// Car passenger.
    Ride,
    /// Bicycle.
    Bike,
    /// On foot.
    Walk,
    /// Scheduled public transit (bus, rail, ferry…).
    Transit,
}

impl TransportMode {
    /// Human-readable label, also the accepted `FromStr` spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car     => "car",
            TransportMode::Ride    => "ride",
            TransportMode::Bike    => "bike",
            TransportMode::Walk    => "walk",
            TransportMode::Transit => "transit",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "car"          => Ok(TransportMode::Car),
            "ride"         => Ok(TransportMode::Ride),
            "bike"         => Ok(TransportMode::Bike),
            "walk"         => Ok(TransportMode::Walk),
            "transit" | "pt" => Ok(TransportMode::Transit),
            other          => Err(CoreError::UnknownMode(other.to_owned())),
        }
    }
}
