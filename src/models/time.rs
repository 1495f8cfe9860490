//! Discrete time value used for durations, start/finish times, and makespan.
//!
//! All times are integer units relative to the project start (t=0).
//! [`Time::inf`] is the sentinel makespan of an infeasible chromosome and
//! compares greater than every finite time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A point in time or a duration, in abstract integer units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Time(i64);

impl Time {
    /// t = 0.
    pub const ZERO: Time = Time(0);

    /// Creates a time value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The maximal representable time.
    pub const fn inf() -> Self {
        Self(i64::MAX)
    }

    /// Whether this is the infinity sentinel.
    pub fn is_inf(self) -> bool {
        self.0 == i64::MAX
    }

    /// Raw value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl Add for Time {
    type Output = Time;

    /// Saturates at [`Time::inf`].
    fn add(self, rhs: Time) -> Time {
        Time(self.0.saturating_add(rhs.0))
    }
}

impl From<i64> for Time {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inf() {
            f.write_str("inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
