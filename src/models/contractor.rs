//! Contractor and worker model.
//!
//! A contractor supplies a finite, renewable pool of typed workers. The
//! worker count is the capacity a single work can draw from that contractor
//! at any instant.

use serde::{Deserialize, Serialize};

/// A typed worker pool owned by one contractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Worker kind.
    pub name: String,
    /// Number of workers available.
    pub count: u32,
    /// Owning contractor ID.
    pub contractor_id: String,
}

impl Worker {
    /// Creates a worker pool entry.
    pub fn new(name: impl Into<String>, count: u32, contractor_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count,
            contractor_id: contractor_id.into(),
        }
    }
}

/// A supplier of workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contractor {
    /// Unique contractor identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Worker pools, at most one per kind.
    pub workers: Vec<Worker>,
}

impl Contractor {
    /// Creates a contractor with no workers.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            workers: Vec::new(),
        }
    }

    /// Sets the contractor name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds (or replaces) the pool of `kind` workers.
    pub fn with_workers(mut self, kind: impl Into<String>, count: u32) -> Self {
        let worker = Worker::new(kind, count, self.id.clone());
        match self.workers.iter_mut().find(|w| w.name == worker.name) {
            Some(existing) => *existing = worker,
            None => self.workers.push(worker),
        }
        self
    }

    /// Worker pool of a kind, if supplied.
    pub fn worker(&self, kind: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.name == kind)
    }

    /// Number of `kind` workers supplied (0 if none).
    pub fn capacity(&self, kind: &str) -> u32 {
        self.worker(kind).map(|w| w.count).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contractor_builder() {
        let c = Contractor::new("C1")
            .with_name("Acme")
            .with_workers("driver", 3)
            .with_workers("fitter", 5);

        assert_eq!(c.name, "Acme");
        assert_eq!(c.capacity("driver"), 3);
        assert_eq!(c.capacity("fitter"), 5);
        assert_eq!(c.capacity("welder"), 0);
        assert_eq!(c.worker("driver").map(|w| w.contractor_id.as_str()), Some("C1"));
    }

    #[test]
    fn test_with_workers_replaces() {
        let c = Contractor::new("C1")
            .with_workers("driver", 3)
            .with_workers("driver", 7);
        assert_eq!(c.workers.len(), 1);
        assert_eq!(c.capacity("driver"), 7);
    }
}
