//! Unit tests for ms-analysis.

use ms_core::{LinkId, StateVector, TimeDiscretization, TransportMode, VehicleEvent, VehicleId};

use crate::{
    AnalysisError, AnalyzerSet, LinkEntryAnalyzer, LinkOccupancyAnalyzer, MacroStateAnalyzer,
    OccupancyCounter,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const L: LinkId = LinkId(1);
const M: LinkId = LinkId(2);

fn hourly_day() -> TimeDiscretization {
    TimeDiscretization::new(0, 3600, 24).unwrap()
}

fn enters(t: f64, v: u32, link: LinkId, mode: TransportMode) -> VehicleEvent {
    VehicleEvent::EntersTraffic { time_s: t, vehicle: VehicleId(v), link, mode }
}

fn link_enter(t: f64, v: u32, link: LinkId) -> VehicleEvent {
    VehicleEvent::LinkEnter { time_s: t, vehicle: VehicleId(v), link }
}

fn link_leave(t: f64, v: u32, link: LinkId) -> VehicleEvent {
    VehicleEvent::LinkLeave { time_s: t, vehicle: VehicleId(v), link }
}

fn leaves(t: f64, v: u32, link: LinkId) -> VehicleEvent {
    VehicleEvent::LeavesTraffic { time_s: t, vehicle: VehicleId(v), link }
}

fn counts(counter: &OccupancyCounter<LinkId>, key: LinkId) -> Vec<u32> {
    (0..counter.discretization().bin_count())
        .map(|b| counter.count(&key, b).unwrap())
        .collect()
}

// ── OccupancyCounter ──────────────────────────────────────────────────────────

#[cfg(test)]
mod counter {
    use super::*;

    #[test]
    fn short_stay_counts_in_one_bin() {
        let mut c = OccupancyCounter::new(hourly_day());
        c.increase(L, 0.0);
        c.decrease(L, 1800.0).unwrap();
        let got = counts(&c, L);
        assert_eq!(got[0], 1);
        assert_eq!(got.iter().sum::<u32>(), 1);
    }

    #[test]
    fn long_stay_is_carried_forward() {
        let mut c = OccupancyCounter::new(hourly_day());
        c.increase(L, 2.0 * 3600.0 + 10.0);
        c.decrease(L, 5.0 * 3600.0 + 10.0).unwrap();
        let got = counts(&c, L);
        assert_eq!(&got[1..7], &[0, 1, 1, 1, 1, 0]);
        assert_eq!(c.total(&L), 4);
    }

    #[test]
    fn leaving_on_boundary_does_not_touch_next_bin() {
        let mut c = OccupancyCounter::new(hourly_day());
        c.increase(L, 100.0);
        c.decrease(L, 3600.0).unwrap();
        assert_eq!(c.count(&L, 0).unwrap(), 1);
        assert_eq!(c.count(&L, 1).unwrap(), 0);
    }

    #[test]
    fn open_interval_counts_to_the_end() {
        let mut c = OccupancyCounter::new(hourly_day());
        c.increase(L, 22.0 * 3600.0);
        assert_eq!(c.count(&L, 21).unwrap(), 0);
        assert_eq!(c.count(&L, 22).unwrap(), 1);
        assert_eq!(c.count(&L, 23).unwrap(), 1);
        assert_eq!(c.occupancy(&L), 1);
    }

    #[test]
    fn totals_match_bin_overlap_for_many_intervals() {
        // (enter, leave) pairs, non-overlapping for one key.
        let intervals = [(0.0, 10.0), (3599.0, 7300.0), (36_000.0, 36_000.0), (40_000.0, 50_400.0)];
        let mut c = OccupancyCounter::new(hourly_day());
        let mut expected = 0u64;
        for &(a, b) in &intervals {
            c.increase(L, a);
            c.decrease(L, b).unwrap();
            let td = hourly_day();
            let first = td.bin(a);
            let last = if td.is_bin_start(b) && b > a { td.bin(b) - 1 } else { td.bin(b) };
            expected += (last - first + 1) as u64;
        }
        assert_eq!(c.total(&L), expected);
        // (0, 10) and (3599, 7300) never overlap in time but both touch bin 0.
        assert_eq!(c.count(&L, 0).unwrap(), 2);
        assert_eq!(&counts(&c, L)[1..3], &[1, 1]);
    }

    #[test]
    fn leaving_on_boundary_ignores_simultaneous_entry() {
        let mut alone = OccupancyCounter::new(hourly_day());
        alone.increase(L, 100.0);
        alone.decrease(L, 3600.0).unwrap();

        let mut tie = OccupancyCounter::new(hourly_day());
        tie.increase(L, 100.0);
        tie.increase(L, 3600.0);
        tie.decrease(L, 3600.0).unwrap();
        assert_eq!(tie.count(&L, 0).unwrap(), 1);
        assert_eq!(tie.count(&L, 1).unwrap(), 1);
        tie.decrease(L, 4000.0).unwrap();

        assert_eq!(alone.count(&L, 1).unwrap(), 0);
        assert_eq!(&counts(&tie, L)[..3], &[1, 1, 0]);
        assert_eq!(tie.total(&L), 2);
        assert_eq!(tie.occupancy(&L), 0);
    }

    #[test]
    fn decrease_without_increase_is_an_error() {
        let mut c: OccupancyCounter<LinkId> = OccupancyCounter::new(hourly_day());
        let err = c.decrease(L, 10.0).unwrap_err();
        assert!(matches!(err, AnalysisError::NegativeOccupancy { .. }));

        c.increase(L, 0.0);
        c.decrease(L, 5.0).unwrap();
        assert!(c.decrease(L, 6.0).is_err());
    }

    #[test]
    fn count_rejects_out_of_range_bin() {
        let c: OccupancyCounter<LinkId> = OccupancyCounter::new(hourly_day());
        assert!(matches!(c.count(&L, 24), Err(AnalysisError::BinOutOfRange { bin: 24, .. })));
        assert_eq!(c.count(&M, 0).unwrap(), 0);
    }

    #[test]
    fn out_of_range_times_are_clamped() {
        let mut c = OccupancyCounter::new(hourly_day());
        c.increase(L, -50.0);
        c.decrease(L, 200_000.0).unwrap();
        assert_eq!(c.clamped_events(), 2);
        assert_eq!(c.total(&L), 24);
    }

    #[test]
    fn reset_zeroes_counts_but_keeps_keys() {
        let mut c = OccupancyCounter::new(hourly_day());
        c.increase(L, 0.0);
        c.increase(M, 10.0);
        c.reset();
        assert_eq!(c.keys().count(), 2);
        assert_eq!(c.total(&L), 0);
        assert_eq!(c.occupancy(&M), 0);
        assert!(c.decrease(L, 20.0).is_err());
    }
}

// ── LinkOccupancyAnalyzer ─────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::*;

    fn car_on_l() -> LinkOccupancyAnalyzer {
        LinkOccupancyAnalyzer::new(hourly_day(), [TransportMode::Car], [L])
    }

    #[test]
    fn scenario_single_vehicle_first_bin() {
        let mut a = car_on_l();
        a.clear();
        a.handle_event(&link_enter(0.0, 1, L)).unwrap(); // not yet traveling: ignored
        a.handle_event(&enters(0.0, 1, L, TransportMode::Car)).unwrap();
        a.handle_event(&link_leave(1800.0, 1, L)).unwrap();
        a.handle_event(&link_enter(1800.0, 1, M)).unwrap();
        a.handle_event(&leaves(1900.0, 1, M)).unwrap();

        let v = a.new_state_vector();
        assert_eq!(v.len(), 24);
        assert_eq!(v[0], 1.0);
        assert!(v.as_slice()[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn scenario_overlapping_vehicles() {
        let mut a = car_on_l();
        a.clear();
        a.handle_event(&enters(7200.0, 1, L, TransportMode::Car)).unwrap();
        a.handle_event(&enters(10_900.0, 2, L, TransportMode::Car)).unwrap();
        a.handle_event(&link_leave(11_000.0, 1, L)).unwrap();
        a.handle_event(&leaves(12_000.0, 2, L)).unwrap();

        let counter = a.counter(TransportMode::Car).unwrap();
        assert!(counter.count(&L, 3).unwrap() >= 1);
        assert_eq!(counter.count(&L, 3).unwrap(), 2);
        assert_eq!(counter.occupancy(&L), 0);
        assert!(counts(counter, L).iter().all(|&n| n <= 2));
    }

    #[test]
    fn untracked_mode_is_ignored() {
        let mut a = car_on_l();
        a.clear();
        a.handle_event(&enters(0.0, 5, L, TransportMode::Bike)).unwrap();
        a.handle_event(&link_leave(100.0, 5, L)).unwrap();
        a.handle_event(&leaves(200.0, 5, L)).unwrap();
        assert_eq!(a.traveling_vehicles(), 0);
        assert!(a.new_state_vector().as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn aborts_end_the_trip() {
        let mut a = car_on_l();
        a.clear();
        a.handle_event(&enters(0.0, 1, L, TransportMode::Car)).unwrap();
        a.handle_event(&VehicleEvent::Aborts { time_s: 4000.0, vehicle: VehicleId(1), link: L })
            .unwrap();
        assert_eq!(a.traveling_vehicles(), 0);
        let c = a.counter(TransportMode::Car).unwrap();
        assert_eq!(c.occupancy(&L), 0);
        assert_eq!(c.total(&L), 2);
        // A later stray leave is not matched to any counter.
        a.handle_event(&link_leave(5000.0, 1, L)).unwrap();
    }

    #[test]
    fn fresh_vector_is_zero_with_declared_dimension() {
        let mut a = LinkOccupancyAnalyzer::new(
            hourly_day(),
            [TransportMode::Car, TransportMode::Transit],
            [L, M, LinkId(3), M],
        );
        a.clear();
        let v = a.new_state_vector();
        assert_eq!(a.dimension(), 2 * 3 * 24);
        assert_eq!(v.len(), a.dimension());
        assert!(v.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn layout_is_modes_then_links_then_bins() {
        let mut a = LinkOccupancyAnalyzer::new(
            hourly_day(),
            [TransportMode::Car, TransportMode::Transit],
            [L, M],
        );
        a.clear();
        a.handle_event(&enters(3600.0, 1, M, TransportMode::Transit)).unwrap();
        a.handle_event(&leaves(3700.0, 1, M)).unwrap();
        let v = a.new_state_vector();
        // transit block starts at 1 * 2 * 24; link M is the second link.
        assert_eq!(v[2 * 24 + 24 + 1], 1.0);
        assert_eq!(v.as_slice().iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn dimension_is_stable_across_iterations() {
        let mut a = car_on_l();
        let mut dims = Vec::new();
        for day in 0..5 {
            a.clear();
            for v in 0..day {
                a.handle_event(&enters(v as f64 * 100.0, v, L, TransportMode::Car)).unwrap();
                a.handle_event(&leaves(v as f64 * 100.0 + 50.0, v, L)).unwrap();
            }
            dims.push(a.new_state_vector().len());
        }
        assert!(dims.iter().all(|&d| d == 24));
    }

    #[test]
    fn clear_forgets_traveling_vehicles() {
        let mut a = car_on_l();
        a.handle_event(&enters(0.0, 1, L, TransportMode::Car)).unwrap();
        a.clear();
        assert_eq!(a.traveling_vehicles(), 0);
        // The vehicle's leave in the next iteration is ignored, not an underflow.
        a.handle_event(&link_leave(10.0, 1, L)).unwrap();
    }

    #[test]
    fn dimension_is_fixed_before_any_link_is_used() {
        let mut a = LinkOccupancyAnalyzer::new(hourly_day(), [TransportMode::Car], [M, L]);
        assert_eq!(a.links(), &[M, L]);
        assert_eq!(a.dimension(), 2 * 24);

        // Day 1 uses only M, day 2 only L; the layout stays declared order.
        a.clear();
        a.handle_event(&enters(0.0, 1, M, TransportMode::Car)).unwrap();
        a.handle_event(&leaves(20.0, 1, M)).unwrap();
        let day1 = a.new_state_vector();
        a.clear();
        a.handle_event(&enters(0.0, 1, L, TransportMode::Car)).unwrap();
        a.handle_event(&link_leave(10.0, 1, L)).unwrap();
        a.handle_event(&link_enter(10.0, 1, LinkId(9))).unwrap();
        a.handle_event(&leaves(20.0, 1, LinkId(9))).unwrap();
        let day2 = a.new_state_vector();

        assert_eq!(day1.len(), day2.len());
        assert_eq!((day1[0], day1[24]), (1.0, 0.0));
        assert_eq!((day2[0], day2[24]), (0.0, 1.0));
        assert_eq!(day2.as_slice().iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn no_modes_means_empty_contribution() {
        let mut a = LinkOccupancyAnalyzer::new(hourly_day(), [], [L]);
        a.handle_event(&enters(0.0, 1, L, TransportMode::Car)).unwrap();
        assert_eq!(a.dimension(), 0);
        assert!(a.new_state_vector().is_empty());
    }
}

// ── LinkEntryAnalyzer ─────────────────────────────────────────────────────────

#[cfg(test)]
mod entry {
    use super::*;

    #[test]
    fn counts_entries_per_bin() {
        let mut a = LinkEntryAnalyzer::new(hourly_day(), [L, M]);
        a.handle_event(&link_enter(10.0, 1, L)).unwrap();
        a.handle_event(&link_enter(20.0, 2, L)).unwrap();
        a.handle_event(&link_enter(3700.0, 3, M)).unwrap();
        a.handle_event(&link_enter(3700.0, 3, LinkId(99))).unwrap();
        assert_eq!(a.entries(L, 0), 2);
        assert_eq!(a.entries(M, 1), 1);
        let v = a.new_state_vector();
        assert_eq!(v.len(), 48);
        assert_eq!(v[0], 2.0);
        assert_eq!(v[24 + 1], 1.0);
    }

    #[test]
    fn vehicle_filter_applies() {
        let mut a = LinkEntryAnalyzer::new(hourly_day(), [L]).with_vehicles([VehicleId(7)]);
        a.handle_event(&link_enter(10.0, 1, L)).unwrap();
        a.handle_event(&link_enter(10.0, 7, L)).unwrap();
        assert_eq!(a.entries(L, 0), 1);
        a.clear();
        assert_eq!(a.entries(L, 0), 0);
    }
}

// ── AnalyzerSet ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod analyzer_set {
    use super::*;

    #[test]
    fn rejects_duplicate_ids() {
        let mut set = AnalyzerSet::new();
        set.add(Box::new(LinkEntryAnalyzer::new(hourly_day(), [L]))).unwrap();
        let err = set.add(Box::new(LinkEntryAnalyzer::new(hourly_day(), [M]))).unwrap_err();
        assert!(matches!(err, AnalysisError::AlreadyRegistered(id) if id == "linkEntries"));
        set.add(Box::new(LinkEntryAnalyzer::new(hourly_day(), [M]).with_id("other"))).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn extract_concatenates_in_registration_order() {
        let mut set = AnalyzerSet::new();
        set.add(Box::new(LinkEntryAnalyzer::new(hourly_day(), [L]))).unwrap();
        set.add(Box::new(LinkOccupancyAnalyzer::new(hourly_day(), [TransportMode::Car], [L])))
            .unwrap();
        assert_eq!(set.ids().collect::<Vec<_>>(), ["linkEntries", "networkModes"]);

        set.clear_all();
        set.dispatch(&enters(0.0, 1, L, TransportMode::Car)).unwrap();
        set.dispatch(&link_leave(10.0, 1, L)).unwrap();
        set.dispatch(&link_enter(10.0, 1, M)).unwrap();
        set.dispatch(&link_enter(7300.0, 2, L)).unwrap();

        let v: StateVector = set.extract();
        assert_eq!(v.len(), set.dimension());
        assert_eq!(v.len(), 48);
        assert_eq!(v[2], 1.0); // entry in bin 2 from the entry analyzer
        assert_eq!(v[24], 1.0); // occupancy in bin 0 from the second analyzer
    }

    #[test]
    fn dispatch_propagates_errors() {
        let mut set = AnalyzerSet::new();
        set.add(Box::new(LinkOccupancyAnalyzer::new(hourly_day(), [TransportMode::Car], [L])))
            .unwrap();
        set.dispatch(&enters(0.0, 1, M, TransportMode::Car)).unwrap();
        // Vehicle entered on M (untracked) then "leaves" L without entering it.
        assert!(set.dispatch(&link_leave(10.0, 1, L)).is_err());
    }
}
