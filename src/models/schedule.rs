//! Schedule (solution) model.
//!
//! A schedule records, for every work, its time interval, the contractor
//! performing it, and the number of workers of each kind assigned.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::Time;

/// A work placed in time with its resource assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledWork {
    /// Work ID.
    pub work_id: String,
    /// Start time.
    pub start_time: Time,
    /// Finish time.
    pub finish_time: Time,
    /// Performing contractor ID.
    pub contractor_id: String,
    /// Assigned workers as `(kind, count)`.
    pub workers: Vec<(String, u32)>,
}

impl ScheduledWork {
    /// Creates a scheduled work with no workers.
    pub fn new(
        work_id: impl Into<String>,
        contractor_id: impl Into<String>,
        start_time: Time,
        finish_time: Time,
    ) -> Self {
        Self {
            work_id: work_id.into(),
            start_time,
            finish_time,
            contractor_id: contractor_id.into(),
            workers: Vec::new(),
        }
    }

    /// Adds an assigned worker count.
    pub fn with_workers(mut self, kind: impl Into<String>, count: u32) -> Self {
        self.workers.push((kind.into(), count));
        self
    }

    /// Assigned count of a worker kind (0 if none).
    pub fn worker_count(&self, kind: &str) -> u32 {
        self.workers
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

/// A complete schedule.
///
/// Works are kept in placement order, which is always a valid topological
/// order for schedules produced by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Scheduled works in placement order.
    pub works: Vec<ScheduledWork>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scheduled work.
    pub fn add_work(&mut self, work: ScheduledWork) {
        self.works.push(work);
    }

    /// Finds the scheduled work for a work ID.
    pub fn work(&self, work_id: &str) -> Option<&ScheduledWork> {
        self.works.iter().find(|w| w.work_id == work_id)
    }

    /// Latest finish time over all works ([`Time::ZERO`] when empty).
    pub fn makespan(&self) -> Time {
        self.works
            .iter()
            .map(|w| w.finish_time)
            .max()
            .unwrap_or(Time::ZERO)
    }

    /// Number of scheduled works.
    pub fn len(&self) -> usize {
        self.works.len()
    }

    /// Whether no work is scheduled.
    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }
}
