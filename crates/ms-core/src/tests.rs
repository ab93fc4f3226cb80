//! Unit tests for ms-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LinkId, VehicleId};

    #[test]
    fn index_and_from() {
        let id = VehicleId::from(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id, VehicleId(42));
    }

    #[test]
    fn ordering() {
        assert!(LinkId(0) < LinkId(1));
        assert!(VehicleId(100) > VehicleId(99));
    }

    #[test]
    fn display() {
        assert_eq!(LinkId(7).to_string(), "LinkId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::TimeDiscretization;

    fn hourly_day() -> TimeDiscretization {
        TimeDiscretization::new(0, 3600, 24).unwrap()
    }

    #[test]
    fn rejects_degenerate_discretizations() {
        assert!(TimeDiscretization::new(0, 0, 24).is_err());
        assert!(TimeDiscretization::new(0, 3600, 0).is_err());
    }

    #[test]
    fn default_is_hourly_day() {
        assert_eq!(TimeDiscretization::default(), hourly_day());
        assert_eq!(hourly_day().end_time_s(), 86_400);
    }

    #[test]
    fn bins_are_half_open() {
        let td = hourly_day();
        assert_eq!(td.bin_checked(0.0), Some(0));
        assert_eq!(td.bin_checked(3599.9), Some(0));
        assert_eq!(td.bin_checked(3600.0), Some(1));
        assert_eq!(td.bin_checked(86_399.0), Some(23));
        assert_eq!(td.bin_checked(86_400.0), None);
        assert_eq!(td.bin_checked(-1.0), None);
        assert_eq!(td.bin_checked(f64::NAN), None);
    }

    #[test]
    fn bin_clamps_out_of_range() {
        let td = TimeDiscretization::new(3600, 1800, 4).unwrap();
        assert_eq!(td.bin(0.0), 0);
        assert_eq!(td.bin(3600.0 + 1800.0), 1);
        assert_eq!(td.bin(1e9), 3);
    }

    #[test]
    fn bin_start_detection() {
        let td = hourly_day();
        assert!(td.is_bin_start(7200.0));
        assert!(!td.is_bin_start(7200.5));
        assert!(!td.is_bin_start(86_400.0));
        assert_eq!(td.bin_start_s(3), 10_800);
    }
}

#[cfg(test)]
mod transport {
    use crate::TransportMode;

    #[test]
    fn display() {
        assert_eq!(TransportMode::Car.to_string(), "car");
        assert_eq!(TransportMode::Transit.to_string(), "transit");
    }

    #[test]
    fn parse() {
        assert_eq!("car".parse::<TransportMode>().unwrap(), TransportMode::Car);
        assert_eq!(" pt ".parse::<TransportMode>().unwrap(), TransportMode::Transit);
        assert!("hovercraft".parse::<TransportMode>().is_err());
    }
}

#[cfg(test)]
mod event {
    use crate::{LinkId, TransportMode, VehicleEvent, VehicleId};

    #[test]
    fn accessors() {
        let ev = VehicleEvent::EntersTraffic {
            time_s:  12.5,
            vehicle: VehicleId(3),
            link:    LinkId(9),
            mode:    TransportMode::Car,
        };
        assert_eq!(ev.time_s(), 12.5);
        assert_eq!(ev.vehicle(), VehicleId(3));
        assert_eq!(ev.link(), LinkId(9));
        assert_eq!(ev.kind(), "enters_traffic");
    }
}

#[cfg(test)]
mod vector {
    use crate::StateVector;

    #[test]
    fn concat_preserves_order() {
        let a = StateVector::from(vec![1.0, 2.0]);
        let b = StateVector::from(vec![3.0]);
        let c = StateVector::concat([&a, &b]);
        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn average_is_elementwise() {
        let parts = vec![
            StateVector::from(vec![1.0, 4.0]),
            StateVector::from(vec![3.0, 0.0]),
        ];
        let avg = StateVector::average(&parts).unwrap();
        assert_eq!(avg.as_slice(), &[2.0, 2.0]);
    }

    #[test]
    fn average_rejects_mismatched_dimensions() {
        let parts = vec![StateVector::zeros(2), StateVector::zeros(3)];
        assert!(StateVector::average(&parts).is_err());
    }

    #[test]
    fn zeros() {
        let z = StateVector::zeros(4);
        assert_eq!(z.len(), 4);
        assert!(z.as_slice().iter().all(|&x| x == 0.0));
    }
}
