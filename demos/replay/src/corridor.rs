//! Synthetic corridor demand.
//!
//! Commuters depart between 06:00 and 09:00 and traverse links 1 → 2 → 3.
//! The share choosing `ride` over `car` grows with the toll.  Each
//! iteration draws from its own seeded stream, so runs are reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ms_core::{LinkId, TransportMode, VehicleEvent, VehicleId};

pub const CORRIDOR: [LinkId; 3] = [LinkId(1), LinkId(2), LinkId(3)];

const COMMUTERS:       u32 = 120;
const SEED:            u64 = 42;
const FIRST_DEPARTURE: f64 = 6.0 * 3600.0;
const DEPARTURE_SPAN:  f64 = 3.0 * 3600.0;
/// Free-flow traversal time of one link, seconds.
const LINK_TIME:       f64 = 420.0;
/// Share of commuters walking; walkers are not tracked.
const WALK_SHARE:      f64 = 0.1;

/// The scenario a toll decision is implemented into.
#[derive(Clone, Debug, Default)]
pub struct Corridor {
    pub toll: u32,
}

impl Corridor {
    fn ride_share(&self) -> f64 {
        (0.1 + 0.08 * self.toll as f64).min(0.9)
    }
}

/// One simulated day of corridor events, in time order.
pub fn corridor_day(scenario: &Corridor, iteration: u32) -> Vec<VehicleEvent> {
    let mut rng = SmallRng::seed_from_u64(SEED ^ u64::from(iteration).wrapping_mul(0x9E37_79B9));
    let mut events = Vec::with_capacity(COMMUTERS as usize * 2 * CORRIDOR.len());

    for v in 0..COMMUTERS {
        let vehicle = VehicleId(v);
        let mode = if rng.gen_bool(WALK_SHARE) {
            TransportMode::Walk
        } else if rng.gen_bool(scenario.ride_share()) {
            TransportMode::Ride
        } else {
            TransportMode::Car
        };
        let mut t = FIRST_DEPARTURE + rng.gen_range(0.0..DEPARTURE_SPAN);
        events.push(VehicleEvent::EntersTraffic { time_s: t, vehicle, link: CORRIDOR[0], mode });

        for pair in CORRIDOR.windows(2) {
            t += LINK_TIME * rng.gen_range(0.8..1.5);
            events.push(VehicleEvent::LinkLeave { time_s: t, vehicle, link: pair[0] });
            events.push(VehicleEvent::LinkEnter { time_s: t, vehicle, link: pair[1] });
        }
        t += LINK_TIME * rng.gen_range(0.8..1.5);
        events.push(VehicleEvent::LeavesTraffic { time_s: t, vehicle, link: CORRIDOR[2] });
    }

    events.sort_by(|a, b| a.time_s().total_cmp(&b.time_s()));
    events
}
