//! Time discretization of simulated seconds into equal-width bins.
//!
//! # Design
//!
//! A `TimeDiscretization` partitions `[start, start + bin_size * bin_count)`
//! into consecutive, half-open bins:
//!
//!   bin(t) = floor((t - start) / bin_size)
//!
//! Event timestamps are `f64` seconds, as delivered by the host engine.  The
//! discretization itself is integral so that bin boundaries are exact.
//!
//! The default is one day at hourly resolution: start 0, 3,600 s bins, 24
//! bins.

use crate::{CoreError, CoreResult};

/// Immutable `(start, bin size, bin count)` triple.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeDiscretization {
    start_time_s: i64,
    bin_size_s:   u32,
    bin_count:    usize,
}

impl TimeDiscretization {
    /// Create a discretization.  `bin_size_s` and `bin_count` must be positive.
    pub fn new(start_time_s: i64, bin_size_s: u32, bin_count: usize) -> CoreResult<Self> {
        if bin_size_s == 0 {
            return Err(CoreError::Config("bin size must be positive".into()));
        }
        if bin_count == 0 {
            return Err(CoreError::Config("bin count must be positive".into()));
        }
        Ok(Self { start_time_s, bin_size_s, bin_count })
    }

    #[inline]
    pub fn start_time_s(&self) -> i64 {
        self.start_time_s
    }

    #[inline]
    pub fn bin_size_s(&self) -> u32 {
        self.bin_size_s
    }

    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Exclusive upper bound of the last bin.
    #[inline]
    pub fn end_time_s(&self) -> i64 {
        self.start_time_s + self.bin_size_s as i64 * self.bin_count as i64
    }

    /// Start time of `bin` in seconds.
    #[inline]
    pub fn bin_start_s(&self, bin: usize) -> i64 {
        self.start_time_s + self.bin_size_s as i64 * bin as i64
    }

    /// Bin containing `time_s`, or `None` if it falls outside the
    /// discretized range.
    pub fn bin_checked(&self, time_s: f64) -> Option<usize> {
        let offset = time_s - self.start_time_s as f64;
        if offset.is_nan() || offset < 0.0 {
            return None;
        }
        let bin = (offset / self.bin_size_s as f64).floor();
        if bin < self.bin_count as f64 {
            Some(bin as usize)
        } else {
            None
        }
    }

    /// Bin containing `time_s`, clamped to `[0, bin_count)`.
    ///
    /// Times before the start map to bin 0; times at or after the end map to
    /// the last bin.
    pub fn bin(&self, time_s: f64) -> usize {
        match self.bin_checked(time_s) {
            Some(bin) => bin,
            None if time_s >= self.end_time_s() as f64 => self.bin_count - 1,
            None => 0,
        }
    }

    /// `true` if `time_s` lies inside the range and exactly on the start of
    /// a bin.
    pub fn is_bin_start(&self, time_s: f64) -> bool {
        match self.bin_checked(time_s) {
            Some(bin) => time_s == self.bin_start_s(bin) as f64,
            None => false,
        }
    }
}

impl Default for TimeDiscretization {
    fn default() -> Self {
        Self { start_time_s: 0, bin_size_s: 3_600, bin_count: 24 }
    }
}
