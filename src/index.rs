//! Stable integer index tables.
//!
//! Maps work IDs, worker kinds, and contractor IDs to dense indices (and
//! back), and flattens the contractor catalog into the
//! `worker_pool[worker_type][contractor]` capacity matrix the genetic
//! operators read. Built once per problem; read-only afterwards.
//!
//! Work indices follow graph insertion order, contractor indices follow the
//! catalog order, and worker kinds are sorted by name.

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::error::{GaError, Result};
use crate::models::{Contractor, WorkGraph, Worker};
use crate::validation::validate_input;

/// Index tables for one problem instance.
#[derive(Debug, Clone)]
pub struct IndexTables {
    work_id2index: HashMap<String, usize>,
    index2work_id: Vec<String>,
    worker_name2index: HashMap<String, usize>,
    index2worker_name: Vec<String>,
    contractor2index: HashMap<String, usize>,
    index2contractor: Vec<String>,
    /// Parent work indices per work index.
    parents: Vec<Vec<usize>>,
    /// `worker_pool[worker_type][contractor]`.
    worker_pool: Vec<Vec<Worker>>,
    /// Position of each work in a fixed topological order.
    topological_rank: Vec<usize>,
}

impl IndexTables {
    /// Builds the tables after validating the input.
    ///
    /// # Errors
    /// [`GaError::InvalidInput`] if [`validate_input`] reports any issue.
    pub fn new(graph: &WorkGraph, contractors: &[Contractor]) -> Result<Self> {
        validate_input(graph, contractors).map_err(GaError::InvalidInput)?;

        let index2work_id: Vec<String> = graph.nodes().iter().map(|n| n.id.clone()).collect();
        let work_id2index: HashMap<String, usize> = index2work_id
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let worker_names: BTreeSet<&str> = graph
            .nodes()
            .iter()
            .flat_map(|n| n.worker_reqs.iter().map(|r| r.kind.as_str()))
            .chain(
                contractors
                    .iter()
                    .flat_map(|c| c.workers.iter().map(|w| w.name.as_str())),
            )
            .collect();
        let index2worker_name: Vec<String> = worker_names.into_iter().map(String::from).collect();
        let worker_name2index: HashMap<String, usize> = index2worker_name
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let index2contractor: Vec<String> = contractors.iter().map(|c| c.id.clone()).collect();
        let contractor2index: HashMap<String, usize> = index2contractor
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let parents = graph
            .nodes()
            .iter()
            .map(|node| {
                node.parents
                    .iter()
                    .map(|p| {
                        work_id2index
                            .get(p)
                            .copied()
                            .ok_or_else(|| GaError::UnknownWork(p.clone()))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        // Kinds a contractor does not supply are present with count 0.
        let worker_pool = index2worker_name
            .iter()
            .map(|name| {
                contractors
                    .iter()
                    .map(|c| {
                        c.worker(name)
                            .cloned()
                            .unwrap_or_else(|| Worker::new(name.clone(), 0, c.id.clone()))
                    })
                    .collect()
            })
            .collect();

        let topological_rank = topological_rank(&parents);

        Ok(Self {
            work_id2index,
            index2work_id,
            worker_name2index,
            index2worker_name,
            contractor2index,
            index2contractor,
            parents,
            worker_pool,
            topological_rank,
        })
    }

    /// Number of works.
    pub fn task_count(&self) -> usize {
        self.index2work_id.len()
    }

    /// Number of worker kinds.
    pub fn worker_type_count(&self) -> usize {
        self.index2worker_name.len()
    }

    /// Number of contractors.
    pub fn contractor_count(&self) -> usize {
        self.index2contractor.len()
    }

    pub fn work_index(&self, work_id: &str) -> Option<usize> {
        self.work_id2index.get(work_id).copied()
    }

    pub fn work_id(&self, index: usize) -> Option<&str> {
        self.index2work_id.get(index).map(String::as_str)
    }

    pub fn worker_index(&self, name: &str) -> Option<usize> {
        self.worker_name2index.get(name).copied()
    }

    pub fn worker_name(&self, index: usize) -> Option<&str> {
        self.index2worker_name.get(index).map(String::as_str)
    }

    pub fn contractor_index(&self, contractor_id: &str) -> Option<usize> {
        self.contractor2index.get(contractor_id).copied()
    }

    pub fn contractor_id(&self, index: usize) -> Option<&str> {
        self.index2contractor.get(index).map(String::as_str)
    }

    /// Parent indices of a work.
    pub fn parents(&self, task: usize) -> Result<&[usize]> {
        self.parents
            .get(task)
            .map(Vec::as_slice)
            .ok_or(GaError::TaskIndexOutOfRange {
                index: task,
                count: self.task_count(),
            })
    }

    /// `worker_pool[worker_type][contractor]`.
    pub fn worker(&self, worker_type: usize, contractor: usize) -> Result<&Worker> {
        let row = self
            .worker_pool
            .get(worker_type)
            .ok_or(GaError::WorkerTypeOutOfRange {
                index: worker_type,
                count: self.worker_type_count(),
            })?;
        row.get(contractor).ok_or(GaError::ContractorIndexOutOfRange {
            index: contractor,
            count: self.contractor_count(),
        })
    }

    /// Worker count supplied by `contractor` for `worker_type`.
    pub fn capacity(&self, worker_type: usize, contractor: usize) -> Result<u32> {
        self.worker(worker_type, contractor).map(|w| w.count)
    }

    /// `rank[task]`: position in the topological order that always picks
    /// the lowest ready work index. Parents rank below their children.
    pub fn topological_rank(&self) -> &[usize] {
        &self.topological_rank
    }
}

/// Kahn's algorithm over a validated (acyclic) parent list.
fn topological_rank(parents: &[Vec<usize>]) -> Vec<usize> {
    let n = parents.len();
    let mut in_degree: Vec<usize> = parents.iter().map(Vec::len).collect();
    let mut children = vec![Vec::new(); n];
    for (task, ps) in parents.iter().enumerate() {
        for &p in ps {
            children[p].push(task);
        }
    }

    let mut rank = vec![0; n];
    let mut ready: VecDeque<usize> = (0..n).filter(|&t| in_degree[t] == 0).collect();
    let mut next = 0;
    while let Some(task) = ready.pop_front() {
        rank[task] = next;
        next += 1;
        for &child in &children[task] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.push_back(child);
            }
        }
    }
    rank
}
