//! Serial schedule-generation scheme.
//!
//! # Algorithm
//!
//! 1. Walk works in chromosome order.
//! 2. Earliest start = latest finish among the work's parents.
//! 3. Delay the start to the first instant at which the chosen contractor
//!    has enough free workers of every kind for the whole duration.
//! 4. Record the work's interval and worker usage on that contractor.
//!
//! Workers are renewable: they return to the contractor's pool when the
//! work finishes.
//!
//! # Complexity
//! O(n² · w) where n = works, w = worker kinds.
//!
//! # Reference
//! Kolisch (1996), "Serial and parallel resource-constrained project
//! scheduling methods revisited"

use crate::error::{GaError, Result};
use crate::ga::Chromosome;
use crate::index::IndexTables;
use crate::models::{Schedule, ScheduledWork, Time};

use super::{Decoder, ScheduleContext};

/// Decoder based on the serial schedule-generation scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialDecoder;

/// Worker usage of one placed work on a contractor.
#[derive(Debug, Clone)]
struct Usage {
    start: Time,
    finish: Time,
    demand: Vec<u32>,
}

impl SerialDecoder {
    /// Creates a decoder.
    pub fn new() -> Self {
        Self
    }

    /// First start `>= earliest` at which `demand` fits next to `placed`
    /// for `duration` time units.
    fn earliest_fit(
        placed: &[Usage],
        earliest: Time,
        duration: Time,
        demand: &[u32],
        capacity: &[u32],
    ) -> Time {
        if duration == Time::ZERO {
            return earliest;
        }

        let mut candidates: Vec<Time> = std::iter::once(earliest)
            .chain(placed.iter().map(|u| u.finish).filter(|&f| f > earliest))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let fits_at = |start: Time| {
            let end = start + duration;
            // Usage only grows at interval starts, so these points suffice.
            std::iter::once(start)
                .chain(
                    placed
                        .iter()
                        .map(|u| u.start)
                        .filter(|&s| s > start && s < end),
                )
                .all(|point| {
                    capacity.iter().enumerate().all(|(w, &cap)| {
                        let busy: u64 = placed
                            .iter()
                            .filter(|u| u.start <= point && point < u.finish)
                            .map(|u| u64::from(u.demand[w]))
                            .sum();
                        busy + u64::from(demand[w]) <= u64::from(cap)
                    })
                })
        };

        let fallback = candidates.last().copied().unwrap_or(earliest);
        candidates.into_iter().find(|&t| fits_at(t)).unwrap_or(fallback)
    }
}

impl Decoder for SerialDecoder {
    fn decode(&self, chromosome: &Chromosome, ctx: &ScheduleContext<'_>) -> Result<Schedule> {
        let tables = ctx.tables;
        chromosome.check_shape(tables)?;

        let nodes = ctx.graph.nodes();
        let worker_types = tables.worker_type_count();
        let mut finish: Vec<Option<Time>> = vec![None; tables.task_count()];
        let mut placed: Vec<Vec<Usage>> = vec![Vec::new(); tables.contractor_count()];
        let mut schedule = Schedule::new();

        for &task in &chromosome.order {
            let node = nodes.get(task).ok_or(GaError::TaskIndexOutOfRange {
                index: task,
                count: nodes.len(),
            })?;

            let mut earliest = Time::ZERO;
            for &parent in tables.parents(task)? {
                let parent_finish =
                    finish[parent].ok_or(GaError::UnscheduledParent { task, parent })?;
                earliest = earliest.max(parent_finish);
            }

            let contractor = chromosome.contractors[task];
            if contractor >= tables.contractor_count() {
                return Err(GaError::ContractorIndexOutOfRange {
                    index: contractor,
                    count: tables.contractor_count(),
                });
            }
            let mut demand = Vec::with_capacity(worker_types);
            let mut capacity = Vec::with_capacity(worker_types);
            for w in 0..worker_types {
                let cap = tables.capacity(w, contractor)?;
                let need = chromosome.quantities[w][task];
                if need > cap {
                    return Err(GaError::DemandExceedsCapacity {
                        task,
                        worker: tables.worker_name(w).unwrap_or_default().to_string(),
                        contractor,
                        demand: need,
                        capacity: cap,
                    });
                }
                demand.push(need);
                capacity.push(cap);
            }

            let start =
                Self::earliest_fit(&placed[contractor], earliest, node.duration, &demand, &capacity);
            let end = start + node.duration;

            let contractor_id = tables.contractor_id(contractor).unwrap_or_default();
            let mut work = ScheduledWork::new(node.id.clone(), contractor_id, start, end);
            for (w, &count) in demand.iter().enumerate() {
                if count > 0 {
                    work = work.with_workers(tables.worker_name(w).unwrap_or_default(), count);
                }
            }
            schedule.add_work(work);

            placed[contractor].push(Usage {
                start,
                finish: end,
                demand,
            });
            finish[task] = Some(end);
        }

        Ok(schedule)
    }

    fn encode(&self, schedule: &Schedule, tables: &IndexTables) -> Result<Chromosome> {
        let tasks = tables.task_count();
        if schedule.len() != tasks {
            return Err(GaError::IncompleteSchedule {
                expected: tasks,
                actual: schedule.len(),
            });
        }

        let mut seen = vec![false; tasks];
        let mut placed = Vec::with_capacity(tasks);
        for work in &schedule.works {
            let task = tables
                .work_index(&work.work_id)
                .ok_or_else(|| GaError::UnknownWork(work.work_id.clone()))?;
            if std::mem::replace(&mut seen[task], true) {
                return Err(GaError::IncompleteSchedule {
                    expected: tasks,
                    actual: seen.iter().filter(|&&s| s).count(),
                });
            }
            placed.push((task, work));
        }

        // Equal starts only occur behind zero-duration parents; precedence
        // rank orders those.
        let rank = tables.topological_rank();
        placed.sort_by_key(|&(task, work)| (work.start_time, rank[task]));

        let mut order = Vec::with_capacity(tasks);
        let mut quantities = vec![vec![0u32; tasks]; tables.worker_type_count()];
        let mut contractors = vec![0usize; tasks];

        for (task, work) in placed {
            contractors[task] = tables
                .contractor_index(&work.contractor_id)
                .ok_or_else(|| GaError::UnknownContractor(work.contractor_id.clone()))?;
            for (kind, count) in &work.workers {
                let w = tables
                    .worker_index(kind)
                    .ok_or_else(|| GaError::UnknownWorker(kind.clone()))?;
                quantities[w][task] = *count;
            }
            order.push(task);
        }

        Ok(Chromosome::new(order, quantities, contractors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contractor, GraphNode, WorkGraph, WorkerReq};

    /// A(3) → C(2), B(4) independent; one contractor with 3 drivers.
    fn sample() -> (WorkGraph, Vec<Contractor>) {
        let graph = WorkGraph::new()
            .with_node(
                GraphNode::new("A")
                    .with_duration(3)
                    .with_worker_req(WorkerReq::new("driver", 1, 3)),
            )
            .with_node(
                GraphNode::new("B")
                    .with_duration(4)
                    .with_worker_req(WorkerReq::new("driver", 1, 3)),
            )
            .with_node(
                GraphNode::new("C")
                    .with_duration(2)
                    .with_parent("A")
                    .with_worker_req(WorkerReq::new("driver", 1, 3)),
            );
        let contractors = vec![Contractor::new("C1").with_workers("driver", 3)];
        (graph, contractors)
    }

    #[test]
    fn test_parallel_when_capacity_allows() {
        let (graph, contractors) = sample();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        let ch = Chromosome::new(vec![0, 1, 2], vec![vec![1, 2, 1]], vec![0, 0, 0]);

        let schedule = SerialDecoder::new().decode(&ch, &ctx).unwrap();
        let a = schedule.work("A").unwrap();
        let b = schedule.work("B").unwrap();
        let c = schedule.work("C").unwrap();
        assert_eq!((a.start_time, a.finish_time), (Time::new(0), Time::new(3)));
        assert_eq!(b.start_time, Time::new(0));
        assert_eq!(c.start_time, Time::new(3));
        assert_eq!(schedule.makespan(), Time::new(5));
        assert_eq!(b.worker_count("driver"), 2);
    }

    #[test]
    fn test_resource_conflict_delays_start() {
        let (graph, contractors) = sample();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        // A takes 2 drivers, B takes 2: B must wait for A
        let ch = Chromosome::new(vec![0, 1, 2], vec![vec![2, 2, 1]], vec![0, 0, 0]);

        let schedule = SerialDecoder::new().decode(&ch, &ctx).unwrap();
        assert_eq!(schedule.work("B").unwrap().start_time, Time::new(3));
        // C fits beside B (2 + 1 <= 3)
        assert_eq!(schedule.work("C").unwrap().start_time, Time::new(3));
        assert_eq!(schedule.makespan(), Time::new(7));
    }

    #[test]
    fn test_full_pool_blocks_until_release() {
        let (graph, contractors) = sample();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        // B occupies all drivers on [0,4); A must wait, then C after A
        let ch = Chromosome::new(vec![1, 0, 2], vec![vec![3, 3, 3]], vec![0, 0, 0]);

        let schedule = SerialDecoder::new().decode(&ch, &ctx).unwrap();
        assert_eq!(schedule.work("A").unwrap().start_time, Time::new(4));
        assert_eq!(schedule.work("C").unwrap().start_time, Time::new(7));
    }

    #[test]
    fn test_decode_rejects_unscheduled_parent() {
        let (graph, contractors) = sample();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        let ch = Chromosome::new(vec![2, 0, 1], vec![vec![1, 1, 1]], vec![0, 0, 0]);

        assert_eq!(
            SerialDecoder::new().decode(&ch, &ctx),
            Err(GaError::UnscheduledParent { task: 2, parent: 0 })
        );
    }

    #[test]
    fn test_decode_rejects_over_capacity() {
        let (graph, contractors) = sample();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        let ch = Chromosome::new(vec![0, 1, 2], vec![vec![4, 1, 1]], vec![0, 0, 0]);

        assert!(matches!(
            SerialDecoder::new().decode(&ch, &ctx),
            Err(GaError::DemandExceedsCapacity { task: 0, demand: 4, capacity: 3, .. })
        ));
    }

    #[test]
    fn test_encode_decode_consistency() {
        let (graph, contractors) = sample();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        let decoder = SerialDecoder::new();
        let ch = Chromosome::new(vec![1, 0, 2], vec![vec![2, 1, 3]], vec![0, 0, 0]);

        let schedule = decoder.decode(&ch, &ctx).unwrap();
        let encoded = decoder.encode(&schedule, &tables).unwrap();
        assert_eq!(encoded.quantities, ch.quantities);
        assert_eq!(encoded.contractors, ch.contractors);
        assert_eq!(decoder.decode(&encoded, &ctx).unwrap().makespan(), schedule.makespan());
    }

    #[test]
    fn test_encode_keeps_zero_duration_parent_first() {
        let graph = WorkGraph::new()
            .with_node(GraphNode::new("M"))
            .with_node(GraphNode::new("N").with_parent("M").with_duration(1));
        let contractors = vec![Contractor::new("C1")];
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        let decoder = SerialDecoder::new();

        let schedule = decoder
            .decode(&Chromosome::new(vec![0, 1], vec![], vec![0, 0]), &ctx)
            .unwrap();
        assert_eq!(decoder.encode(&schedule, &tables).unwrap().order, vec![0, 1]);
    }

    #[test]
    fn test_encode_breaks_start_ties_by_precedence() {
        // X → Y → Z all zero-duration, Z → W; listed child-first
        let graph = WorkGraph::new()
            .with_node(GraphNode::new("X"))
            .with_node(GraphNode::new("Y").with_parent("X"))
            .with_node(GraphNode::new("Z").with_parent("Y"))
            .with_node(GraphNode::new("W").with_parent("Z").with_duration(1));
        let contractors = vec![Contractor::new("C1")];
        let tables = IndexTables::new(&graph, &contractors).unwrap();

        let mut schedule = Schedule::new();
        schedule.add_work(ScheduledWork::new("W", "C1", Time::new(0), Time::new(1)));
        schedule.add_work(ScheduledWork::new("Z", "C1", Time::new(0), Time::new(0)));
        schedule.add_work(ScheduledWork::new("Y", "C1", Time::new(0), Time::new(0)));
        schedule.add_work(ScheduledWork::new("X", "C1", Time::new(0), Time::new(0)));

        let ch = SerialDecoder::new().encode(&schedule, &tables).unwrap();
        assert_eq!(ch.order, vec![0, 1, 2, 3]);
        assert!(crate::ga::validator::is_order_correct(&ch, &tables).unwrap());
    }

    #[test]
    fn test_encode_rejects_repeated_work() {
        let graph = WorkGraph::new()
            .with_node(GraphNode::new("M"))
            .with_node(GraphNode::new("N"));
        let contractors = vec![Contractor::new("C1")];
        let tables = IndexTables::new(&graph, &contractors).unwrap();

        let mut schedule = Schedule::new();
        schedule.add_work(ScheduledWork::new("M", "C1", Time::new(0), Time::new(0)));
        schedule.add_work(ScheduledWork::new("M", "C1", Time::new(0), Time::new(0)));
        assert_eq!(
            SerialDecoder::new().encode(&schedule, &tables),
            Err(GaError::IncompleteSchedule { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_large_capacity_does_not_overflow() {
        let graph = WorkGraph::new()
            .with_node(
                GraphNode::new("A")
                    .with_duration(2)
                    .with_worker_req(WorkerReq::new("driver", 1, u32::MAX)),
            )
            .with_node(
                GraphNode::new("B")
                    .with_duration(2)
                    .with_worker_req(WorkerReq::new("driver", 1, u32::MAX)),
            );
        let contractors = vec![Contractor::new("C1").with_workers("driver", u32::MAX)];
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let ctx = ScheduleContext::new(&graph, &contractors, &tables);
        let ch = Chromosome::new(vec![0, 1], vec![vec![u32::MAX - 1, 2]], vec![0, 0]);

        let schedule = SerialDecoder::new().decode(&ch, &ctx).unwrap();
        assert_eq!(schedule.work("B").unwrap().start_time, Time::new(2));
    }

    #[test]
    fn test_encode_rejects_incomplete_schedule() {
        let (graph, contractors) = sample();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let err = SerialDecoder::new().encode(&Schedule::new(), &tables).unwrap_err();
        assert_eq!(err, GaError::IncompleteSchedule { expected: 3, actual: 0 });
    }
}
