//! Link entry counts per time bin.

use rustc_hash::{FxHashMap, FxHashSet};

use ms_core::{LinkId, StateVector, TimeDiscretization, VehicleEvent, VehicleId};

use crate::{AnalysisResult, MacroStateAnalyzer};

/// Default [`MacroStateAnalyzer::id`].
pub const LINK_ENTRY_ID: &str = "linkEntries";

/// Counts `LinkEnter` events on a fixed set of links, optionally only for a
/// subset of vehicles.
///
/// Vector layout: links outer (declaration order), bins inner.
#[derive(Clone, Debug)]
pub struct LinkEntryAnalyzer {
    id:             String,
    discretization: TimeDiscretization,
    links:          Vec<LinkId>,
    link_index:     FxHashMap<LinkId, usize>,
    vehicles:       Option<FxHashSet<VehicleId>>,
    /// `links.len() * bin_count`, link-major.
    counts:         Vec<u32>,
}

impl LinkEntryAnalyzer {
    pub fn new<I>(discretization: TimeDiscretization, links: I) -> Self
    where
        I: IntoIterator<Item = LinkId>,
    {
        let mut declared = Vec::new();
        let mut link_index = FxHashMap::default();
        for link in links {
            if !link_index.contains_key(&link) {
                link_index.insert(link, declared.len());
                declared.push(link);
            }
        }
        let counts = vec![0; declared.len() * discretization.bin_count()];
        Self {
            id: LINK_ENTRY_ID.to_owned(),
            discretization,
            links: declared,
            link_index,
            vehicles: None,
            counts,
        }
    }

    /// Only count entries by these vehicles.
    pub fn with_vehicles<I>(mut self, vehicles: I) -> Self
    where
        I: IntoIterator<Item = VehicleId>,
    {
        self.vehicles = Some(vehicles.into_iter().collect());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    /// Entries on `link` during `bin`; zero for untracked links or bins out
    /// of range.
    pub fn entries(&self, link: LinkId, bin: usize) -> u32 {
        let bins = self.discretization.bin_count();
        match self.link_index.get(&link) {
            Some(&i) if bin < bins => self.counts[i * bins + bin],
            _ => 0,
        }
    }
}

impl MacroStateAnalyzer for LinkEntryAnalyzer {
    fn id(&self) -> &str {
        &self.id
    }

    fn clear(&mut self) {
        self.counts.fill(0);
    }

    fn handle_event(&mut self, event: &VehicleEvent) -> AnalysisResult<()> {
        if let VehicleEvent::LinkEnter { time_s, vehicle, link } = *event {
            let vehicle_ok = self.vehicles.as_ref().is_none_or(|v| v.contains(&vehicle));
            if let (true, Some(&i)) = (vehicle_ok, self.link_index.get(&link)) {
                let bin = self.discretization.bin(time_s);
                self.counts[i * self.discretization.bin_count() + bin] += 1;
            }
        }
        Ok(())
    }

    fn dimension(&self) -> usize {
        self.counts.len()
    }

    fn new_state_vector(&self) -> StateVector {
        StateVector::from(self.counts.iter().map(|&c| c as f64).collect::<Vec<_>>())
    }
}
