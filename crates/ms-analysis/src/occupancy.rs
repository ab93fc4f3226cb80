//! Link occupancy per time bin, differentiated by network mode.
//!
//! One [`OccupancyCounter`] per tracked mode.  A vehicle is bound to its
//! mode's counter when it enters traffic and unbound when it leaves traffic
//! or aborts; the movement events in between carry no mode and are routed
//! through that binding.
//!
//! Aborts are accounted exactly like a normal trip end (the vehicle stops
//! occupying its current link).

use rustc_hash::{FxHashMap, FxHashSet};

use ms_core::{LinkId, StateVector, TimeDiscretization, TransportMode, VehicleEvent, VehicleId};

use crate::{AnalysisResult, MacroStateAnalyzer, OccupancyCounter};

/// Default [`MacroStateAnalyzer::id`].
pub const LINK_OCCUPANCY_ID: &str = "networkModes";

/// Occupancy of network links, one counter per tracked mode.
///
/// # Vector layout
///
/// `modes × links × bins`, modes outer, then links, then bins, each in
/// declaration order.  The link set is fixed at construction, so the
/// dimension never changes; to track every link, pass the whole network.
#[derive(Clone, Debug)]
pub struct LinkOccupancyAnalyzer {
    id:             String,
    discretization: TimeDiscretization,
    modes:          Vec<TransportMode>,
    /// Parallel to `modes`.
    counters:       Vec<OccupancyCounter<LinkId>>,
    /// Declared link order.
    links:          Vec<LinkId>,
    link_filter:    FxHashSet<LinkId>,
    /// Traveling vehicle → index into `counters`.  Cleared, not reallocated,
    /// between iterations.
    vehicles:       FxHashMap<VehicleId, usize>,
}

impl LinkOccupancyAnalyzer {
    /// Track `modes` on `links`, each in the given order.  Duplicates are
    /// dropped (first occurrence wins); events on other links are ignored.
    pub fn new<M, L>(discretization: TimeDiscretization, modes: M, links: L) -> Self
    where
        M: IntoIterator<Item = TransportMode>,
        L: IntoIterator<Item = LinkId>,
    {
        let mut declared_modes: Vec<TransportMode> = Vec::new();
        for mode in modes {
            if !declared_modes.contains(&mode) {
                declared_modes.push(mode);
            }
        }
        let mut declared_links = Vec::new();
        let mut link_filter = FxHashSet::default();
        for link in links {
            if link_filter.insert(link) {
                declared_links.push(link);
            }
        }
        let counters =
            declared_modes.iter().map(|_| OccupancyCounter::new(discretization)).collect();
        Self {
            id: LINK_OCCUPANCY_ID.to_owned(),
            discretization,
            modes: declared_modes,
            counters,
            links: declared_links,
            link_filter,
            vehicles: FxHashMap::default(),
        }
    }

    /// Override the default id (needed to register two of these in one set).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn modes(&self) -> &[TransportMode] {
        &self.modes
    }

    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    pub fn discretization(&self) -> &TimeDiscretization {
        &self.discretization
    }

    /// Counter for `mode`, if tracked.
    pub fn counter(&self, mode: TransportMode) -> Option<&OccupancyCounter<LinkId>> {
        self.modes.iter().position(|&m| m == mode).map(|i| &self.counters[i])
    }

    /// Number of vehicles currently bound to a counter.
    pub fn traveling_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    fn tracks(&self, link: LinkId) -> bool {
        self.link_filter.contains(&link)
    }
}

impl MacroStateAnalyzer for LinkOccupancyAnalyzer {
    fn id(&self) -> &str {
        &self.id
    }

    fn clear(&mut self) {
        for counter in &mut self.counters {
            counter.reset();
        }
        self.vehicles.clear();
    }

    fn handle_event(&mut self, event: &VehicleEvent) -> AnalysisResult<()> {
        match *event {
            VehicleEvent::EntersTraffic { time_s, vehicle, link, mode } => {
                if let Some(slot) = self.modes.iter().position(|&m| m == mode) {
                    self.vehicles.insert(vehicle, slot);
                    if self.tracks(link) {
                        self.counters[slot].increase(link, time_s);
                    }
                }
            }
            VehicleEvent::LinkEnter { time_s, vehicle, link } => {
                if let Some(&slot) = self.vehicles.get(&vehicle) {
                    if self.tracks(link) {
                        self.counters[slot].increase(link, time_s);
                    }
                }
            }
            VehicleEvent::LinkLeave { time_s, vehicle, link } => {
                if let Some(&slot) = self.vehicles.get(&vehicle) {
                    if self.tracks(link) {
                        self.counters[slot].decrease(link, time_s)?;
                    }
                }
            }
            VehicleEvent::LeavesTraffic { time_s, vehicle, link }
            | VehicleEvent::Aborts { time_s, vehicle, link } => {
                if let Some(slot) = self.vehicles.remove(&vehicle) {
                    if self.tracks(link) {
                        self.counters[slot].decrease(link, time_s)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn dimension(&self) -> usize {
        self.modes.len() * self.links.len() * self.discretization.bin_count()
    }

    fn new_state_vector(&self) -> StateVector {
        let bins = self.discretization.bin_count();
        let mut values = Vec::with_capacity(self.dimension());
        for counter in &self.counters {
            for link in &self.links {
                for bin in 0..bins {
                    // `bin < bins` by construction.
                    values.push(counter.count(link, bin).unwrap_or(0) as f64);
                }
            }
        }
        StateVector::from(values)
    }
}
