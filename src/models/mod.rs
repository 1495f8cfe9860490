//! Project scheduling domain models.
//!
//! Provides the data types describing an RCPSP instance and its solutions.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `WorkGraph` / `GraphNode` | Precedence DAG of works |
//! | `WorkerReq` | Per-work `[min, max]` demand for a worker kind |
//! | `Contractor` / `Worker` | Supplier and its finite typed worker pools |
//! | `Schedule` / `ScheduledWork` | Decoded solution |
//! | `Time` | Integer time with an infinity sentinel |

mod contractor;
mod graph;
mod schedule;
mod time;

pub use contractor::{Contractor, Worker};
pub use graph::{GraphNode, WorkGraph, WorkerReq};
pub use schedule::{Schedule, ScheduledWork};
pub use time::Time;
