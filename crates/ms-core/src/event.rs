//! Vehicle movement events delivered by the host engine.
//!
//! The host guarantees non-decreasing timestamps within one iteration.  A
//! vehicle's trip is bracketed by `EntersTraffic` and either `LeavesTraffic`
//! or `Aborts`; in between it produces `LinkLeave`/`LinkEnter` pairs as it
//! moves from link to link.

use crate::{LinkId, TransportMode, VehicleId};

/// One event on the host's event bus.  `time_s` is simulated seconds.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleEvent {
    /// The vehicle starts traveling on `link` in `mode`.
    EntersTraffic {
        time_s:  f64,
        vehicle: VehicleId,
        link:    LinkId,
        mode:    TransportMode,
    },
    /// Mid-trip: the vehicle moves onto `link`.
    LinkEnter { time_s: f64, vehicle: VehicleId, link: LinkId },
    /// Mid-trip: the vehicle moves off `link`.
    LinkLeave { time_s: f64, vehicle: VehicleId, link: LinkId },
    /// The vehicle stops traveling on `link`.
    LeavesTraffic { time_s: f64, vehicle: VehicleId, link: LinkId },
    /// The vehicle is removed from the network while on `link`.
    Aborts { time_s: f64, vehicle: VehicleId, link: LinkId },
}

impl VehicleEvent {
    #[inline]
    pub fn time_s(&self) -> f64 {
        match *self {
            VehicleEvent::EntersTraffic { time_s, .. }
            | VehicleEvent::LinkEnter { time_s, .. }
            | VehicleEvent::LinkLeave { time_s, .. }
            | VehicleEvent::LeavesTraffic { time_s, .. }
            | VehicleEvent::Aborts { time_s, .. } => time_s,
        }
    }

    #[inline]
    pub fn vehicle(&self) -> VehicleId {
        match *self {
            VehicleEvent::EntersTraffic { vehicle, .. }
            | VehicleEvent::LinkEnter { vehicle, .. }
            | VehicleEvent::LinkLeave { vehicle, .. }
            | VehicleEvent::LeavesTraffic { vehicle, .. }
            | VehicleEvent::Aborts { vehicle, .. } => vehicle,
        }
    }

    #[inline]
    pub fn link(&self) -> LinkId {
        match *self {
            VehicleEvent::EntersTraffic { link, .. }
            | VehicleEvent::LinkEnter { link, .. }
            | VehicleEvent::LinkLeave { link, .. }
            | VehicleEvent::LeavesTraffic { link, .. }
            | VehicleEvent::Aborts { link, .. } => link,
        }
    }

    /// Short label for logs and CSV output.
    pub fn kind(&self) -> &'static str {
        match self {
            VehicleEvent::EntersTraffic { .. } => "enters_traffic",
            VehicleEvent::LinkEnter { .. }     => "link_enter",
            VehicleEvent::LinkLeave { .. }     => "link_leave",
            VehicleEvent::LeavesTraffic { .. } => "leaves_traffic",
            VehicleEvent::Aborts { .. }        => "aborts",
        }
    }
}
