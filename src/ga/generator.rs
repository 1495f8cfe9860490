//! Initial population generator.
//!
//! Mixes two known-good heuristic chromosomes with randomized topological
//! schedules:
//!
//! | draw `r`       | result                                     |
//! |----------------|--------------------------------------------|
//! | `r < 0.2`      | copy of the `heft_end` seed                |
//! | `0.2 ≤ r < 0.4`| copy of the `heft_between` seed            |
//! | otherwise      | randomized topological schedule, encoded   |

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::index::IndexTables;
use crate::models::Schedule;
use crate::scheduler::{Decoder, HeuristicScheduler, ScheduleContext};

use super::Chromosome;

const HEFT_END_THRESHOLD: f64 = 0.2;
const HEFT_BETWEEN_THRESHOLD: f64 = 0.4;
const SEED_RANGE: u64 = 1_000_000;

/// The two heuristic seed chromosomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedChromosomes {
    /// Chromosome of the HEFT schedule that appends each work at the end.
    pub heft_end: Chromosome,
    /// Chromosome of the HEFT schedule that inserts works into gaps.
    pub heft_between: Chromosome,
}

impl SeedChromosomes {
    pub fn new(heft_end: Chromosome, heft_between: Chromosome) -> Self {
        Self {
            heft_end,
            heft_between,
        }
    }

    /// Encodes two externally produced heuristic schedules.
    pub fn from_schedules<D: Decoder>(
        heft_end: &Schedule,
        heft_between: &Schedule,
        decoder: &D,
        tables: &IndexTables,
    ) -> Result<Self> {
        Ok(Self::new(
            decoder.encode(heft_end, tables)?,
            decoder.encode(heft_between, tables)?,
        ))
    }
}

/// Produces initial chromosomes for one problem instance.
#[derive(Debug, Clone, Copy)]
pub struct ChromosomeGenerator<'a, S, D> {
    ctx: ScheduleContext<'a>,
    seeds: &'a SeedChromosomes,
    scheduler: &'a S,
    decoder: &'a D,
}

impl<'a, S: HeuristicScheduler, D: Decoder> ChromosomeGenerator<'a, S, D> {
    pub fn new(
        ctx: ScheduleContext<'a>,
        seeds: &'a SeedChromosomes,
        scheduler: &'a S,
        decoder: &'a D,
    ) -> Self {
        Self {
            ctx,
            seeds,
            scheduler,
            decoder,
        }
    }

    /// Draws one chromosome. The result is always an independent copy.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Chromosome> {
        if self.ctx.graph.is_empty() {
            return Ok(Chromosome::empty(self.ctx.tables.worker_type_count()));
        }

        let r = rng.random::<f64>();
        if r < HEFT_END_THRESHOLD {
            debug!(r, "generator: heft_end seed");
            return Ok(self.seeds.heft_end.clone());
        }
        if r < HEFT_BETWEEN_THRESHOLD {
            debug!(r, "generator: heft_between seed");
            return Ok(self.seeds.heft_between.clone());
        }

        let seed = rng.random_range(0..SEED_RANGE);
        debug!(r, seed, "generator: randomized topological schedule");
        let schedule = self
            .scheduler
            .schedule(self.ctx.graph, self.ctx.contractors, seed)?;
        self.decoder.encode(&schedule, self.ctx.tables)
    }

    /// Draws `count` chromosomes.
    pub fn generate_population<R: Rng>(&self, count: usize, rng: &mut R) -> Result<Vec<Chromosome>> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::validator::{is_correct, is_order_correct};
    use crate::models::{Contractor, GraphNode, WorkGraph, WorkerReq};
    use crate::scheduler::{RandomizedTopologicalScheduler, SerialDecoder};
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn chain() -> (WorkGraph, Vec<Contractor>) {
        let graph = WorkGraph::new()
            .with_node(
                GraphNode::new("A")
                    .with_duration(2)
                    .with_worker_req(WorkerReq::new("driver", 1, 2)),
            )
            .with_node(GraphNode::new("B").with_duration(3).with_parent("A"))
            .with_node(GraphNode::new("C").with_duration(1).with_parent("B"));
        let contractors = vec![Contractor::new("C1").with_workers("driver", 10)];
        (graph, contractors)
    }

    fn diamond() -> (WorkGraph, Vec<Contractor>) {
        let graph = WorkGraph::new()
            .with_node(GraphNode::new("A").with_duration(2))
            .with_node(
                GraphNode::new("B")
                    .with_duration(3)
                    .with_parent("A")
                    .with_worker_req(WorkerReq::new("fitter", 1, 3)),
            )
            .with_node(GraphNode::new("C").with_duration(1).with_parent("A"))
            .with_node(
                GraphNode::new("D")
                    .with_duration(2)
                    .with_parent("B")
                    .with_parent("C"),
            );
        let contractors = vec![
            Contractor::new("C1").with_workers("fitter", 2),
            Contractor::new("C2").with_workers("fitter", 5),
        ];
        (graph, contractors)
    }

    fn seeds(graph: &WorkGraph, contractors: &[Contractor], tables: &IndexTables) -> SeedChromosomes {
        let scheduler = RandomizedTopologicalScheduler::new();
        let decoder = SerialDecoder::new();
        let end = scheduler.schedule(graph, contractors, 1).unwrap();
        let between = scheduler.schedule(graph, contractors, 2).unwrap();
        SeedChromosomes::from_schedules(&end, &between, &decoder, tables).unwrap()
    }

    #[test]
    fn test_chain_has_single_order() {
        let (graph, contractors) = chain();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let seeds = seeds(&graph, &contractors, &tables);
        let scheduler = RandomizedTopologicalScheduler::new();
        let decoder = SerialDecoder::new();
        let generator = ChromosomeGenerator::new(
            ScheduleContext::new(&graph, &contractors, &tables),
            &seeds,
            &scheduler,
            &decoder,
        );

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..30 {
            let ch = generator.generate(&mut rng).unwrap();
            assert_eq!(ch.order, vec![0, 1, 2]);
            assert!(is_correct(&ch, &tables).unwrap());
        }
    }

    #[test]
    fn test_branch_mix() {
        let (graph, contractors) = diamond();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let seeds = SeedChromosomes::new(
            Chromosome::new(vec![0, 1, 2, 3], vec![vec![0, 1, 0, 0]], vec![0, 0, 0, 0]),
            Chromosome::new(vec![0, 2, 1, 3], vec![vec![0, 2, 0, 0]], vec![1, 1, 1, 1]),
        );
        let scheduler = RandomizedTopologicalScheduler::new();
        let decoder = SerialDecoder::new();
        let generator = ChromosomeGenerator::new(
            ScheduleContext::new(&graph, &contractors, &tables),
            &seeds,
            &scheduler,
            &decoder,
        );

        let mut rng = SmallRng::seed_from_u64(7);
        let population = generator.generate_population(1000, &mut rng).unwrap();
        let end = population.iter().filter(|c| **c == seeds.heft_end).count();
        let between = population.iter().filter(|c| **c == seeds.heft_between).count();

        // ~200 each; random schedules may occasionally coincide with a seed
        assert!((140..300).contains(&end), "heft_end: {end}");
        assert!((140..300).contains(&between), "heft_between: {between}");
        assert!(population.iter().all(|c| is_correct(c, &tables).unwrap()));
    }

    #[test]
    fn test_empty_graph() {
        let graph = WorkGraph::new();
        let contractors = vec![Contractor::new("C1").with_workers("driver", 1)];
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let seeds = SeedChromosomes::new(Chromosome::empty(1), Chromosome::empty(1));
        let scheduler = RandomizedTopologicalScheduler::new();
        let decoder = SerialDecoder::new();
        let generator = ChromosomeGenerator::new(
            ScheduleContext::new(&graph, &contractors, &tables),
            &seeds,
            &scheduler,
            &decoder,
        );

        let mut rng = SmallRng::seed_from_u64(1);
        let ch = generator.generate(&mut rng).unwrap();
        assert_eq!(ch.task_count(), 0);
        assert!(ch.contractors.is_empty());
    }

    #[test]
    fn test_seed_copies_are_independent() {
        let (graph, contractors) = chain();
        let tables = IndexTables::new(&graph, &contractors).unwrap();
        let seeds = seeds(&graph, &contractors, &tables);
        let original = seeds.clone();
        let scheduler = RandomizedTopologicalScheduler::new();
        let decoder = SerialDecoder::new();
        let generator = ChromosomeGenerator::new(
            ScheduleContext::new(&graph, &contractors, &tables),
            &seeds,
            &scheduler,
            &decoder,
        );

        let mut rng = SmallRng::seed_from_u64(3);
        for mut ch in generator.generate_population(20, &mut rng).unwrap() {
            ch.quantities[0][0] = 99;
        }
        assert_eq!(seeds, original);
    }

    /// Random DAG: node `i` draws parents among earlier nodes and minimum
    /// requirements that `C1` alone always meets.
    fn random_dag() -> impl Strategy<Value = (WorkGraph, Vec<Contractor>)> {
        (1usize..9)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
                    prop::collection::vec((0i64..4, 0u32..=3, 0u32..=2), n),
                )
            })
            .prop_map(|(edges, nodes)| {
                let mut graph = WorkGraph::new();
                for (i, &(duration, drivers, fitters)) in nodes.iter().enumerate() {
                    let mut node = GraphNode::new(format!("W{i}")).with_duration(duration);
                    for p in (0..i).filter(|&p| edges[i][p]) {
                        node = node.with_parent(format!("W{p}"));
                    }
                    if drivers > 0 {
                        node = node.with_worker_req(WorkerReq::new("driver", drivers, 3));
                    }
                    if fitters > 0 {
                        node = node.with_worker_req(WorkerReq::new("fitter", fitters, 2));
                    }
                    graph.add_node(node);
                }
                let contractors = vec![
                    Contractor::new("C1").with_workers("driver", 3).with_workers("fitter", 2),
                    Contractor::new("C2").with_workers("driver", 2),
                ];
                (graph, contractors)
            })
    }

    proptest! {
        #[test]
        fn prop_random_dag_orders_are_topological(
            (graph, contractors) in random_dag(),
            seed in any::<u64>(),
        ) {
            let tables = IndexTables::new(&graph, &contractors).unwrap();
            let scheduler = RandomizedTopologicalScheduler::new();
            let decoder = SerialDecoder::new();

            // Outside schedules list their works in arbitrary order.
            let mut end = scheduler.schedule(&graph, &contractors, seed).unwrap();
            let mut between = scheduler.schedule(&graph, &contractors, seed ^ 1).unwrap();
            end.works.reverse();
            between.works.reverse();
            let seeds = SeedChromosomes::from_schedules(&end, &between, &decoder, &tables).unwrap();
            prop_assert!(is_order_correct(&seeds.heft_end, &tables).unwrap());
            prop_assert!(is_order_correct(&seeds.heft_between, &tables).unwrap());

            let generator = ChromosomeGenerator::new(
                ScheduleContext::new(&graph, &contractors, &tables),
                &seeds,
                &scheduler,
                &decoder,
            );
            let mut rng = SmallRng::seed_from_u64(seed);
            for ch in generator.generate_population(20, &mut rng).unwrap() {
                prop_assert!(is_order_correct(&ch, &tables).unwrap());
            }
        }

        #[test]
        fn prop_generated_order_is_topological(seed in any::<u64>()) {
            let (graph, contractors) = diamond();
            let tables = IndexTables::new(&graph, &contractors).unwrap();
            let seeds = seeds(&graph, &contractors, &tables);
            let scheduler = RandomizedTopologicalScheduler::new();
            let decoder = SerialDecoder::new();
            let generator = ChromosomeGenerator::new(
                ScheduleContext::new(&graph, &contractors, &tables),
                &seeds,
                &scheduler,
                &decoder,
            );

            let mut rng = SmallRng::seed_from_u64(seed);
            let ch = generator.generate(&mut rng).unwrap();
            prop_assert!(is_order_correct(&ch, &tables).unwrap());
        }
    }
}
