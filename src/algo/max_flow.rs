/*!
# Maximum Flow (Edmonds-Karp)

This module computes **maximum (source, sink)-flows** in capacitated directed
networks using the Edmonds-Karp algorithm, i.e. Ford-Fulkerson specialized to
hop-shortest augmenting paths found by BFS.

## Core concepts
- A **flow** assigns each arc a value between zero and its capacity such that
  inflow equals outflow at every node except the source and the sink.
- The **residual network** tracks how much additional flow each ordered node
  pair admits. Pushing flow along an arc lowers its residual capacity and
  raises the residual capacity of the reverse arc by the same amount, which
  allows later augmentations to reroute earlier ones.
- An **augmenting path** is a source-sink path of positive residual
  capacities; its **bottleneck** is the smallest residual capacity on it.

## Implementations
- [`ResidualMatrix`] stores residual capacities densely and reports the arcs
  of positive residual capacity as an adjacency structure, so the traversals
  of this crate run on it unchanged.
- [`EdmondsKarp`] is an iterator over augmentations. Each step performs one
  BFS and pushes the bottleneck along the found path.
- [`MaxFlow`] is the high-level entry point, implemented for every
  capacitated network representation.

## Use cases
- Maximum flow values together with the augmenting paths realizing them.
- Inspection of the final residual network, e.g. to extract minimum cuts.
*/

use std::time::{Duration, Instant};

use itertools::Itertools;
use tracing::{debug, trace};

use super::*;

/// Outcome of a maximum flow computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxFlowResult<C> {
    /// Value of a maximum (source, sink)-flow.
    pub flow: C,
    /// Wall-clock time spent building the residual matrix and augmenting.
    pub elapsed: Duration,
}

/// Dense residual network of a capacitated flow network.
///
/// Stores one residual capacity per ordered node pair in a row-major matrix.
/// The entry for `(u, v)` starts out as the capacity of the arc `(u, v)`, or
/// zero if the network has no such arc. [`ResidualMatrix::push_flow`] keeps
/// the invariant that the sum `residual(u, v) + residual(v, u)` never changes.
///
/// The matrix implements [`AdjacencyList`] over the arcs of **positive**
/// residual capacity, so BFS on it visits exactly the nodes that can still
/// receive flow.
#[derive(Clone)]
pub struct ResidualMatrix<C> {
    n: NumNodes,
    cells: Vec<C>,
}

impl<C: Capacity> ResidualMatrix<C> {
    /// Builds the residual matrix of a capacitated network.
    ///
    /// Fails with [`FlowError::InvalidCapacity`] on the first arc whose
    /// capacity is negative or not finite.
    pub fn from_network<G>(graph: &G) -> Result<Self>
    where
        G: CapacitatedArcs<C>,
    {
        let n = graph.number_of_nodes();
        let mut cells = vec![C::zero(); n as usize * n as usize];

        for (edge, capacity) in graph.arcs() {
            if !capacity.is_valid_capacity() {
                return Err(FlowError::InvalidCapacity { edge });
            }
            cells[Self::cell(n, edge.tail(), edge.head())] += capacity;
        }

        Ok(Self { n, cells })
    }

    fn cell(n: NumNodes, u: Node, v: Node) -> usize {
        u as usize * n as usize + v as usize
    }

    /// Returns the residual capacity of the ordered pair `(u, v)`.
    /// ** Panics if `u >= n` or `v >= n` **
    pub fn residual(&self, u: Node, v: Node) -> C {
        self.cells[Self::cell(self.n, u, v)]
    }

    /// Pushes `amount` units of flow across the ordered pair `(u, v)`:
    /// the residual capacity of `(u, v)` shrinks by `amount` while the
    /// residual capacity of `(v, u)` grows by the same amount.
    /// ** Panics if `u >= n` or `v >= n` **
    pub fn push_flow(&mut self, u: Node, v: Node, amount: C) {
        self.cells[Self::cell(self.n, u, v)] -= amount;
        self.cells[Self::cell(self.n, v, u)] += amount;
    }
}

impl<C: Capacity> GraphNodeOrder for ResidualMatrix<C> {
    fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }
}

impl<C: Capacity> AdjacencyList for ResidualMatrix<C> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
            .filter(move |&v| self.residual(u, v) > C::zero())
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }
}

/// One augmentation step of the Edmonds-Karp algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Augmentation<C> {
    /// The augmenting path from source to sink, both endpoints included.
    /// Consecutive nodes are arcs of positive residual capacity; they may
    /// be reverse arcs created by earlier augmentations.
    pub path: Vec<Node>,
    /// The amount pushed along the path, i.e. its smallest residual capacity.
    pub bottleneck: C,
}

/// Implementation of the Edmonds-Karp algorithm on a residual matrix.
///
/// The solver is an iterator: each call to `next` searches a hop-shortest
/// augmenting path by BFS, pushes its bottleneck through the residual
/// network and yields the [`Augmentation`]. Once the sink is no longer
/// reachable the iterator is exhausted and the pushed augmentations form
/// a maximum flow.
pub struct EdmondsKarp<C> {
    residual_network: ResidualMatrix<C>,
    predecessor: Vec<Node>,
    source: Node,
    sink: Node,
}

impl<C: Capacity> EdmondsKarp<C> {
    /// Creates a new Edmonds-Karp solver on a given residual network.
    /// ** Panics if `source == sink` or either endpoint is out of range **
    pub fn new(residual_network: ResidualMatrix<C>, source: Node, sink: Node) -> Self {
        let n = residual_network.len();
        assert_ne!(source, sink);
        assert!((source as usize) < n && (sink as usize) < n);

        Self {
            residual_network,
            predecessor: vec![0; n],
            source,
            sink,
        }
    }

    /// Performs BFS to find an augmenting path from source to sink.
    /// Updates the predecessor array and returns whether the sink was reached.
    fn bfs(&mut self) -> bool {
        let mut bfs = self.residual_network.bfs_with_predecessor(self.source);
        bfs.set_stop_at(self.sink);
        bfs.parent_array_into(self.predecessor.as_mut_slice());
        bfs.did_visit_node(self.sink)
    }

    /// Runs the algorithm to exhaustion and returns the total flow value,
    /// i.e. the sum of all augmentation bottlenecks.
    pub fn total_flow(&mut self) -> C {
        let mut flow = C::zero();
        for augmentation in self.by_ref() {
            flow += augmentation.bottleneck;
        }
        flow
    }

    /// Runs the algorithm to exhaustion and returns all augmentations.
    pub fn augmentations(&mut self) -> Vec<Augmentation<C>> {
        self.collect()
    }

    /// Returns the current state of the residual network.
    ///
    /// After the iterator is exhausted, the nodes reachable from the source
    /// in the residual network form the source side of a minimum cut.
    pub fn residual_network(&self) -> &ResidualMatrix<C> {
        &self.residual_network
    }
}

impl<C: Capacity> Iterator for EdmondsKarp<C> {
    type Item = Augmentation<C>;

    /// Performs one Edmonds-Karp augmentation step. Returns `None` once no
    /// augmenting path exists.
    fn next(&mut self) -> Option<Self::Item> {
        if !self.bfs() {
            return None;
        }

        let mut path = vec![self.sink];
        let mut v = self.sink;
        while v != self.source {
            v = self.predecessor[v as usize];
            path.push(v);
        }
        path.reverse();

        // the path has at least one arc since source and sink are distinct
        let mut bottleneck = self.residual_network.residual(path[0], path[1]);
        for (&u, &v) in path.iter().tuple_windows().skip(1) {
            let residual = self.residual_network.residual(u, v);
            if residual < bottleneck {
                bottleneck = residual;
            }
        }

        for (&u, &v) in path.iter().tuple_windows() {
            self.residual_network.push_flow(u, v, bottleneck);
        }

        trace!(?path, %bottleneck, "augmenting along shortest path");

        Some(Augmentation { path, bottleneck })
    }
}

/// Maximum (source, sink)-flow computation for capacitated networks.
pub trait MaxFlow<C: Capacity>: CapacitatedArcs<C> {
    /// Computes a maximum flow from `source` to `sink` with Edmonds-Karp.
    ///
    /// The network itself is not modified; all bookkeeping happens on a
    /// fresh residual matrix. If the sink is unreachable from the source
    /// the flow value is zero.
    ///
    /// # Errors
    /// - [`FlowError::InvalidEndpoints`] if `source == sink` or either
    ///   endpoint is not a node of the network.
    /// - [`FlowError::InvalidCapacity`] if some arc has a negative or
    ///   non-finite capacity.
    ///
    /// # Examples
    /// ```
    /// use flownet::{prelude::*, algo::*};
    ///
    /// let net = FlowNetwork::from_arcs(
    ///     4,
    ///     [((0, 1), 2u64), ((0, 2), 2), ((1, 3), 2), ((2, 3), 2)],
    /// );
    ///
    /// assert_eq!(net.max_flow(0, 3).unwrap().flow, 4);
    /// ```
    fn max_flow(&self, source: Node, sink: Node) -> Result<MaxFlowResult<C>> {
        let num_nodes = self.number_of_nodes();
        if source == sink || source >= num_nodes || sink >= num_nodes {
            return Err(FlowError::InvalidEndpoints {
                source,
                sink,
                num_nodes,
            });
        }

        let start = Instant::now();
        let residual_network = ResidualMatrix::from_network(self)?;
        let flow = EdmondsKarp::new(residual_network, source, sink).total_flow();
        let elapsed = start.elapsed();

        debug!(source, sink, %flow, ?elapsed, "maximum flow computed");

        Ok(MaxFlowResult { flow, elapsed })
    }
}

impl<C, G> MaxFlow<C> for G
where
    C: Capacity,
    G: CapacitatedArcs<C>,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::{NetworkGenerator, NumNodesGen, RandomNetwork};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn network<C: Capacity>(n: NumNodes, arcs: &[(Node, Node, C)]) -> FlowNetwork<C> {
        FlowNetwork::from_arcs(n, arcs.iter().map(|&(u, v, c)| ((u, v), c)))
    }

    #[test]
    fn single_arc() {
        let net = network(2, &[(0, 1, 7u64)]);
        let residual = ResidualMatrix::from_network(&net).unwrap();
        let mut ek = EdmondsKarp::new(residual, 0, 1);

        let augmentations = ek.augmentations();
        assert_eq!(augmentations.len(), 1);
        assert_eq!(augmentations[0].path, vec![0, 1]);
        assert_eq!(augmentations[0].bottleneck, 7);

        assert_eq!(ek.residual_network().residual(0, 1), 0);
        assert_eq!(ek.residual_network().residual(1, 0), 7);
    }

    #[test]
    fn diamond() {
        let net = network(4, &[(0, 1, 3u64), (0, 2, 2), (1, 3, 2), (2, 3, 3)]);
        assert_eq!(net.max_flow(0, 3).unwrap().flow, 4);
    }

    #[test]
    fn bottleneck_in_the_middle() {
        // all flow must cross the middle arc
        let net = network(4, &[(0, 1, 10u64), (1, 2, 3), (2, 3, 10)]);
        assert_eq!(net.max_flow(0, 3).unwrap().flow, 3);
    }

    #[test]
    fn unreachable_sink_has_zero_flow() {
        let net = network(3, &[(0, 1, 5u64)]);
        assert_eq!(net.max_flow(0, 2).unwrap().flow, 0);

        let empty = FlowNetwork::<u64>::new(2);
        assert_eq!(empty.max_flow(0, 1).unwrap().flow, 0);
    }

    #[test]
    fn zero_capacity_arcs_carry_nothing() {
        let net = network(2, &[(0, 1, 0u64)]);
        assert_eq!(net.max_flow(0, 1).unwrap().flow, 0);
    }

    #[test]
    fn flows_work_on_floats() {
        let net = network(4, &[(0, 1, 0.5f64), (0, 2, 1.25), (1, 3, 1.0), (2, 3, 1.0)]);
        assert_eq!(net.max_flow(0, 3).unwrap().flow, 1.5);
    }

    #[test]
    fn invalid_endpoints() {
        let net = network(3, &[(0, 1, 1u64), (1, 2, 1)]);

        assert_eq!(
            net.max_flow(1, 1),
            Err(FlowError::InvalidEndpoints {
                source: 1,
                sink: 1,
                num_nodes: 3
            })
        );
        assert_eq!(
            net.max_flow(0, 3),
            Err(FlowError::InvalidEndpoints {
                source: 0,
                sink: 3,
                num_nodes: 3
            })
        );
        assert_eq!(
            net.max_flow(4, 2),
            Err(FlowError::InvalidEndpoints {
                source: 4,
                sink: 2,
                num_nodes: 3
            })
        );
    }

    #[test]
    fn rejects_invalid_capacities() {
        let net = network(2, &[(0, 1, -3i64)]);
        assert_eq!(
            net.max_flow(0, 1),
            Err(FlowError::InvalidCapacity { edge: Edge(0, 1) })
        );

        let net = network(3, &[(0, 1, 1.0f64), (1, 2, f64::NAN)]);
        assert_eq!(
            net.max_flow(0, 2),
            Err(FlowError::InvalidCapacity { edge: Edge(1, 2) })
        );

        let net = network(2, &[(0, 1, f64::INFINITY)]);
        assert_eq!(
            net.max_flow(0, 1),
            Err(FlowError::InvalidCapacity { edge: Edge(0, 1) })
        );
    }

    #[test]
    fn reverse_arcs_enable_rerouting() {
        // the first, hop-shortest augmentation 0 -> 1 -> 2 -> 3 blocks both
        // detours; the second one must undo flow on (1, 2) via its reverse arc
        let net = network(
            6,
            &[
                (0, 1, 1u64),
                (1, 2, 1),
                (2, 3, 1),
                (0, 4, 1),
                (4, 2, 1),
                (1, 5, 1),
                (5, 3, 1),
            ],
        );

        let residual = ResidualMatrix::from_network(&net).unwrap();
        let mut ek = EdmondsKarp::new(residual, 0, 3);

        let first = ek.next().unwrap();
        assert_eq!(first.path, vec![0, 1, 2, 3]);
        assert_eq!(first.bottleneck, 1);

        let second = ek.next().unwrap();
        assert_eq!(second.path, vec![0, 4, 2, 1, 5, 3]);
        assert_eq!(second.bottleneck, 1);

        assert_eq!(ek.next(), None);

        // the rerouting cancelled all flow across (1, 2)
        assert_eq!(ek.residual_network().residual(1, 2), 1);
        assert_eq!(ek.residual_network().residual(2, 1), 0);

        assert_eq!(net.max_flow(0, 3).unwrap().flow, 2);
    }

    #[test]
    fn antiparallel_arcs() {
        let net = network(3, &[(0, 1, 3u64), (1, 0, 2), (1, 2, 3)]);
        assert_eq!(net.max_flow(0, 2).unwrap().flow, 3);
    }

    #[test]
    fn flow_is_directional() {
        // all arcs point towards node 2, so nothing flows back
        let net = network(3, &[(0, 1, 2u64), (1, 2, 2)]);
        assert_eq!(net.max_flow(0, 2).unwrap().flow, 2);
        assert_eq!(net.max_flow(2, 0).unwrap().flow, 0);
    }

    #[test]
    fn residual_pair_sums_are_conserved() {
        let net = network(
            4,
            &[(0, 1, 4u64), (0, 2, 2), (1, 2, 3), (1, 3, 1), (2, 3, 5)],
        );
        let residual = ResidualMatrix::from_network(&net).unwrap();

        let pair_sum = |r: &ResidualMatrix<u64>, u: Node, v: Node| r.residual(u, v) + r.residual(v, u);
        let initial: Vec<u64> = (0..4)
            .flat_map(|u| (0..4).map(move |v| (u, v)))
            .map(|(u, v)| pair_sum(&residual, u, v))
            .collect();

        let mut ek = EdmondsKarp::new(residual, 0, 3);
        let mut flow = 0;
        while let Some(augmentation) = ek.next() {
            flow += augmentation.bottleneck;

            for u in 0..4 {
                for v in 0..4 {
                    assert_eq!(
                        pair_sum(ek.residual_network(), u, v),
                        initial[(u * 4 + v) as usize]
                    );
                }
            }
        }

        assert_eq!(flow, 6);
    }

    #[test]
    fn flow_is_bounded_by_cut_capacities() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x51B8);

        for n in [5u32, 8, 13] {
            for p in [0.2, 0.5, 0.9] {
                let net = RandomNetwork::new()
                    .nodes(n)
                    .prob(p)
                    .capacities(1u64..=10)
                    .generate(&mut rng)
                    .unwrap();

                let flow = net.max_flow(0, n - 1).unwrap().flow;
                assert!(flow <= net.out_capacity_of(0));
                assert!(flow <= net.in_capacity_of(n - 1));
            }
        }
    }

    #[test]
    fn max_flow_leaves_the_network_untouched() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let net = RandomNetwork::new()
            .nodes(9)
            .prob(0.6)
            .capacities(1u64..=20)
            .generate(&mut rng)
            .unwrap();

        let arcs_before = net.ordered_arcs().collect_vec();
        let first = net.max_flow(0, 8).unwrap().flow;
        let second = net.max_flow(0, 8).unwrap().flow;

        assert_eq!(first, second);
        assert_eq!(net.ordered_arcs().collect_vec(), arcs_before);
    }
}
