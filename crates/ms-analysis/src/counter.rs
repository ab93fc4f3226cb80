//! Interval occupancy counting over a time discretization.
//!
//! # Accounting policy
//!
//! Each `increase(key, t)` opens an occupancy interval on `key`; the matching
//! `decrease(key, t')` closes it.  The count of a bin is the number of
//! intervals that overlap it:
//!
//! ```text
//! count[bin] = occupancy at the start of bin + increases inside bin
//! ```
//!
//! Open intervals are carried forward bin by bin until they are closed, so a
//! single vehicle that stays on a link from bin 2 into bin 5 contributes 1 to
//! each of bins 2, 3, 4, 5.  Intervals are half-open: a decrease landing
//! exactly on the start of a bin that has not been reached yet does not touch
//! that bin.
//!
//! Summed over all bins, a key's counts equal the total overlap, in bins, of
//! its intervals.  Two intervals touching the same bin both count there, even
//! when they follow each other without overlapping in time.  Counts are
//! integers and never negative.
//!
//! A decrease at the exact start of the key's current bin closes an interval
//! that was carried into that bin, and takes it back out of the bin.  The
//! outcome does not depend on whether another interval opened at the same
//! instant.
//!
//! # Out-of-range timestamps
//!
//! Timestamps outside the discretization are clamped to the first or last
//! bin (and counted in [`OccupancyCounter::clamped_events`]).  Timestamps
//! that would move a key backwards in time are treated as occurring in the
//! key's most recent bin; the host engine guarantees ordered delivery, so
//! this only absorbs ties and rounding.

use std::fmt::Debug;
use std::hash::Hash;

use log::warn;
use rustc_hash::FxHashMap;

use ms_core::TimeDiscretization;

use crate::{AnalysisError, AnalysisResult};

// ── Per-key state ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct KeyState {
    counts:   Vec<u32>,
    /// Intervals currently open on this key.
    active:   u32,
    /// Bins `0..=last_bin` already include the open intervals.
    last_bin: usize,
    /// Open intervals that were carried into `last_bin` rather than opened
    /// in it.
    carried:  u32,
}

impl KeyState {
    fn new(bin_count: usize) -> Self {
        Self { counts: vec![0; bin_count], active: 0, last_bin: 0, carried: 0 }
    }

    /// Fold the open intervals into every bin up to and including `target`.
    fn advance(&mut self, target: usize) {
        while self.last_bin < target {
            self.last_bin += 1;
            self.counts[self.last_bin] += self.active;
            self.carried = self.active;
        }
    }

    fn reset(&mut self) {
        self.counts.fill(0);
        self.active = 0;
        self.last_bin = 0;
        self.carried = 0;
    }
}

// ── OccupancyCounter ──────────────────────────────────────────────────────────

/// Per-key, per-bin occupancy tallies for one iteration.
///
/// Keys are created implicitly on first use.  [`reset`][Self::reset] zeroes
/// every count but keeps the key universe, so the per-key bin arrays are
/// allocated once per run rather than once per iteration.
#[derive(Clone, Debug)]
pub struct OccupancyCounter<K> {
    discretization: TimeDiscretization,
    keys:           FxHashMap<K, KeyState>,
    clamped:        u64,
}

impl<K> OccupancyCounter<K>
where
    K: Copy + Eq + Hash + Debug,
{
    pub fn new(discretization: TimeDiscretization) -> Self {
        Self {
            discretization,
            keys: FxHashMap::default(),
            clamped: 0,
        }
    }

    #[inline]
    pub fn discretization(&self) -> &TimeDiscretization {
        &self.discretization
    }

    /// Open an occupancy interval on `key` at `time_s`.
    pub fn increase(&mut self, key: K, time_s: f64) {
        let bin = self.bin_for(time_s);
        let bin_count = self.discretization.bin_count();
        let state = self.keys.entry(key).or_insert_with(|| KeyState::new(bin_count));

        let bin = bin.max(state.last_bin);
        state.advance(bin);
        state.counts[bin] += 1;
        state.active += 1;
    }

    /// Close an occupancy interval on `key` at `time_s`.
    ///
    /// Fails if `key` has no open interval in the current iteration.
    pub fn decrease(&mut self, key: K, time_s: f64) -> AnalysisResult<()> {
        let raw_bin = self.bin_for(time_s);
        let on_boundary = self.discretization.is_bin_start(time_s);

        let state = match self.keys.get_mut(&key) {
            Some(s) if s.active > 0 => s,
            _ => {
                return Err(AnalysisError::NegativeOccupancy {
                    key: format!("{key:?}"),
                    time_s,
                });
            }
        };

        if on_boundary && raw_bin == state.last_bin && state.carried > 0 {
            // Another event at this instant already carried the interval
            // into this bin; [start, t) ends before it.
            state.counts[raw_bin] -= 1;
        } else {
            let bin = raw_bin.max(state.last_bin);
            let last_occupied = if on_boundary && bin > state.last_bin { bin - 1 } else { bin };
            state.advance(last_occupied);
        }
        state.carried = state.carried.saturating_sub(1);
        state.active -= 1;
        Ok(())
    }

    /// Number of occupancy intervals on `key` that overlap `bin`.
    ///
    /// Intervals still open at the time of the call count in every bin from
    /// their start to the end of the discretization.  Unknown keys count
    /// zero.
    pub fn count(&self, key: &K, bin: usize) -> AnalysisResult<u32> {
        let bin_count = self.discretization.bin_count();
        if bin >= bin_count {
            return Err(AnalysisError::BinOutOfRange { bin, bin_count });
        }
        Ok(match self.keys.get(key) {
            None => 0,
            Some(s) if bin > s.last_bin => s.counts[bin] + s.active,
            Some(s) => s.counts[bin],
        })
    }

    /// Sum of [`count`][Self::count] over all bins of `key`.
    pub fn total(&self, key: &K) -> u64 {
        (0..self.discretization.bin_count())
            .map(|bin| self.count(key, bin).unwrap_or(0) as u64)
            .sum()
    }

    /// Intervals currently open on `key`.
    pub fn occupancy(&self, key: &K) -> u32 {
        self.keys.get(key).map_or(0, |s| s.active)
    }

    /// Every key seen since construction (in no particular order).
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.keys()
    }

    /// Events whose timestamp fell outside the discretization since the last
    /// reset.
    #[inline]
    pub fn clamped_events(&self) -> u64 {
        self.clamped
    }

    /// Zero all counts and open intervals, keeping the key universe.
    pub fn reset(&mut self) {
        for state in self.keys.values_mut() {
            state.reset();
        }
        if self.clamped > 0 {
            warn!(
                "{} event timestamps fell outside the time discretization and were clamped",
                self.clamped
            );
        }
        self.clamped = 0;
    }

    fn bin_for(&mut self, time_s: f64) -> usize {
        match self.discretization.bin_checked(time_s) {
            Some(bin) => bin,
            None => {
                self.clamped += 1;
                self.discretization.bin(time_s)
            }
        }
    }
}
