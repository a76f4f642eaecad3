use std::ops::RangeInclusive;

use fxhash::FxHashMap;
use rand::distr::uniform::SampleUniform;
use tracing::debug;

use super::*;
use crate::utils::*;

/// Generator for uniform random flow networks with `n` nodes.
///
/// Node `0` acts as the source and node `n - 1` as the sink. The **candidate
/// arcs** are all ordered pairs of distinct nodes except arcs into the source
/// and arcs out of the sink; note that the direct source-sink arc is a
/// candidate. The generator selects `round(p * #candidates)` of them
/// uniformly without replacement and assigns each a capacity drawn uniformly
/// from the configured range.
///
/// The generator can be parameterized via:
/// - `.nodes(n)`: total number of nodes
/// - `.prob(p)`: fraction of candidate arcs to materialize
/// - `.capacities(lo..=hi)`: inclusive range of arc capacities
///
/// All parameters are validated in [`NetworkGenerator::generate`], which
/// fails with [`FlowError::InvalidParameters`] on inconsistent input.
#[derive(Debug, Clone)]
pub struct RandomNetwork<C> {
    n: NumNodes,
    p: Option<f64>,
    capacities: Option<RangeInclusive<C>>,
}

impl<C> Default for RandomNetwork<C> {
    fn default() -> Self {
        Self {
            n: 0,
            p: None,
            capacities: None,
        }
    }
}

impl<C> RandomNetwork<C> {
    /// Creates a new empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the arc probability `p`.
    pub fn prob(mut self, prob: f64) -> Self {
        self.p = Some(prob);
        self
    }

    /// Updates the capacity range.
    pub fn capacities(mut self, capacities: RangeInclusive<C>) -> Self {
        self.capacities = Some(capacities);
        self
    }
}

impl<C> NumNodesGen for RandomNetwork<C> {
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl<C> NetworkGenerator<C> for RandomNetwork<C>
where
    C: Capacity + SampleUniform,
{
    fn generate<R>(&self, rng: &mut R) -> Result<FlowNetwork<C>>
    where
        R: Rng,
    {
        if self.n < 2 {
            return Err(FlowError::InvalidParameters {
                reason: format!("a flow network needs at least two nodes, got {}", self.n),
            });
        }

        let Some(p) = self.p else {
            return Err(FlowError::InvalidParameters {
                reason: "arc probability not set".into(),
            });
        };
        if !p.is_valid_probability() {
            return Err(FlowError::InvalidParameters {
                reason: format!("arc probability {p} does not lie in [0, 1]"),
            });
        }

        let Some(capacities) = self.capacities.clone() else {
            return Err(FlowError::InvalidParameters {
                reason: "capacity range not set".into(),
            });
        };
        if !(C::zero() < *capacities.start() && capacities.start() <= capacities.end()) {
            return Err(FlowError::InvalidParameters {
                reason: format!(
                    "capacity range {}..={} must satisfy 0 < min <= max",
                    capacities.start(),
                    capacities.end()
                ),
            });
        }

        let num_arcs = (p * num_candidate_arcs(self.n) as f64).round() as u64;

        debug!(n = self.n, p, num_arcs, "generating random flow network");

        Ok(FlowNetwork::from_arcs(
            self.n,
            ArcSampler::new(rng, self.n, num_arcs, capacities),
        ))
    }
}

impl<C: Capacity + SampleUniform> FlowNetwork<C> {
    /// Creates a uniform random flow network with `n` nodes, arc probability
    /// `p` and capacities drawn from `capacities`. Shorthand for configuring
    /// a [`RandomNetwork`] by hand.
    pub fn random<R>(
        rng: &mut R,
        n: NumNodes,
        p: f64,
        capacities: RangeInclusive<C>,
    ) -> Result<Self>
    where
        R: Rng,
    {
        RandomNetwork::new()
            .nodes(n)
            .prob(p)
            .capacities(capacities)
            .generate(rng)
    }
}

/// Number of candidate arcs of a flow network with `n` nodes: all ordered
/// pairs of distinct nodes minus those entering the source or leaving the
/// sink, i.e. `(n - 1) * (n - 2) + 1`.
fn num_candidate_arcs(n: NumNodes) -> u64 {
    debug_assert!(n >= 2);
    let n = n as u64;
    (n - 1) * (n - 2) + 1
}

/// Maps a candidate index in `[0, num_candidate_arcs(n))` to its arc.
///
/// Indices `0..n-1` enumerate the arcs leaving the source. The remaining
/// indices enumerate, in row-major order, the `n - 2` possible heads of each
/// inner node, skipping the source and the node itself.
fn candidate_arc(x: u64, n: NumNodes) -> Edge {
    let n = n as u64;
    if x < n - 1 {
        return Edge(0, (x + 1) as Node);
    }

    let x = x - (n - 1);
    let u = x / (n - 2) + 1;
    let r = x % (n - 2);
    let v = if r + 1 < u { r + 1 } else { r + 2 };

    Edge(u as Node, v as Node)
}

/// Given the candidate arc space of a flow network with `n` nodes, this
/// iterator produces exactly `m` uniformly random and distinct capacitated
/// arcs without replacement.
///
/// The sampling scheme is based on:
/// > *V. Batagelj and U. Brandes. Efficient Generation of Large Random Networks.
/// > Physical Review E 71.3 (2005): 036113.*
///
/// It avoids a full shuffle of the candidate space by simulating an in-place
/// permutation with a sparse map of displaced entries.
pub struct ArcSampler<'a, R, C>
where
    R: Rng,
    C: Capacity + SampleUniform,
{
    n: NumNodes,
    rem: u64,
    cur: u64,
    end: u64,
    swaps: FxHashMap<u64, u64>,
    capacities: RangeInclusive<C>,
    rng: &'a mut R,
}

impl<'a, R, C> ArcSampler<'a, R, C>
where
    R: Rng,
    C: Capacity + SampleUniform,
{
    /// Creates a sampler yielding exactly `m` distinct candidate arcs of a
    /// flow network with `n` nodes.
    /// ** Panics if `m` exceeds the number of candidate arcs **
    pub fn new(rng: &'a mut R, n: NumNodes, m: u64, capacities: RangeInclusive<C>) -> Self {
        let end = num_candidate_arcs(n);
        assert!(m <= end);

        Self {
            n,
            rem: m,
            cur: 0,
            end,
            swaps: FxHashMap::with_capacity_and_hasher(m as usize, Default::default()),
            capacities,
            rng,
        }
    }

    /// Selects the next unique candidate index using partial Fisher-Yates
    /// shuffling: the map records which entries of the virtual candidate
    /// array have been displaced by earlier draws.
    fn next_step(&mut self) -> Option<u64> {
        if self.rem == 0 {
            return None;
        }

        let drawn = self.rng.random_range(self.cur..self.end);
        let value = match self.swaps.get(&drawn) {
            Some(&v) => v,
            None => drawn,
        };

        match self.swaps.get(&self.cur) {
            Some(&v) => self.swaps.insert(drawn, v),
            None => self.swaps.insert(drawn, self.cur),
        };

        self.cur += 1;
        self.rem -= 1;

        Some(value)
    }
}

impl<R, C> Iterator for ArcSampler<'_, R, C>
where
    R: Rng,
    C: Capacity + SampleUniform,
{
    type Item = (Edge, C);

    fn next(&mut self) -> Option<Self::Item> {
        let arc = candidate_arc(self.next_step()?, self.n);
        let capacity = self.rng.random_range(self.capacities.clone());
        Some((arc, capacity))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rem as usize, Some(self.rem as usize))
    }
}

impl<R, C> ExactSizeIterator for ArcSampler<'_, R, C>
where
    R: Rng,
    C: Capacity + SampleUniform,
{
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::algo::MaxFlow;

    #[test]
    fn candidate_arcs_are_a_bijection() {
        for n in 2..=8 {
            let arcs: HashSet<Edge> = (0..num_candidate_arcs(n))
                .map(|x| candidate_arc(x, n))
                .collect();

            assert_eq!(arcs.len() as u64, num_candidate_arcs(n));
            for arc in arcs {
                assert!(arc.tail() < n && arc.head() < n);
                assert!(!arc.is_loop());
                assert_ne!(arc.head(), 0);
                assert_ne!(arc.tail(), n - 1);
            }
        }
    }

    #[test]
    fn zero_probability_yields_no_arcs() {
        let mut rng = Pcg64Mcg::seed_from_u64(1234);
        let net = RandomNetwork::new()
            .nodes(5)
            .prob(0.0)
            .capacities(1u64..=10)
            .generate(&mut rng)
            .unwrap();

        assert_eq!(net.number_of_nodes(), 5);
        assert_eq!(net.number_of_edges(), 0);
        assert_eq!(net.max_flow(0, 4).unwrap().flow, 0);
    }

    #[test]
    fn two_nodes_at_full_probability() {
        // n = 2 has exactly one candidate, the direct source-sink arc
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let net = RandomNetwork::new()
            .nodes(2)
            .prob(1.0)
            .capacities(5u64..=5)
            .generate(&mut rng)
            .unwrap();

        assert_eq!(net.number_of_edges(), 1);
        assert_eq!(net.capacity_of(0, 1), Some(5));
        assert_eq!(net.max_flow(0, 1).unwrap().flow, 5);
    }

    #[test]
    fn generated_networks_match_the_requested_density() {
        let mut rng = Pcg64Mcg::seed_from_u64(0xFEED);

        for n in [2, 5, 9, 17] {
            for p in [0.0, 0.3, 0.7, 1.0] {
                let net = RandomNetwork::new()
                    .nodes(n)
                    .prob(p)
                    .capacities(1u32..=9)
                    .generate(&mut rng)
                    .unwrap();

                let expected = (p * num_candidate_arcs(n) as f64).round() as NumEdges;
                assert_eq!(net.number_of_edges(), expected);

                for (arc, capacity) in net.arcs() {
                    assert!(!arc.is_loop());
                    assert_ne!(arc.head(), 0, "no arc may enter the source");
                    assert_ne!(arc.tail(), n - 1, "no arc may leave the sink");
                    assert!((1..=9).contains(&capacity));
                }
            }
        }
    }

    #[test]
    fn same_seed_same_network() {
        let generator = RandomNetwork::new()
            .nodes(12)
            .prob(0.4)
            .capacities(1u64..=100);

        let a = generator.generate(&mut Pcg64Mcg::seed_from_u64(99)).unwrap();
        let b = generator.generate(&mut Pcg64Mcg::seed_from_u64(99)).unwrap();

        assert_eq!(a.ordered_arcs().collect_vec(), b.ordered_arcs().collect_vec());
    }

    #[test]
    fn random_shorthand() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let net = FlowNetwork::random(&mut rng, 8, 0.5, 1u64..=4).unwrap();

        assert_eq!(net.number_of_nodes(), 8);
        assert_eq!(
            net.number_of_edges() as u64,
            (0.5 * num_candidate_arcs(8) as f64).round() as u64
        );
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);

        let invalid = [
            // too few nodes
            RandomNetwork::new().nodes(1).prob(0.5).capacities(1u64..=2),
            RandomNetwork::new().prob(0.5).capacities(1u64..=2),
            // broken probabilities
            RandomNetwork::new().nodes(5).prob(1.5).capacities(1u64..=2),
            RandomNetwork::new().nodes(5).prob(-0.1).capacities(1u64..=2),
            RandomNetwork::new()
                .nodes(5)
                .prob(f64::NAN)
                .capacities(1u64..=2),
            RandomNetwork::new().nodes(5).capacities(1u64..=2),
            // broken capacity ranges
            RandomNetwork::new().nodes(5).prob(0.5).capacities(0u64..=5),
            RandomNetwork::new().nodes(5).prob(0.5).capacities(7u64..=3),
            RandomNetwork::new().nodes(5).prob(0.5),
        ];

        for generator in invalid {
            assert!(matches!(
                generator.generate(&mut rng),
                Err(FlowError::InvalidParameters { .. })
            ));
        }
    }

    #[test]
    fn float_capacities() {
        let mut rng = Pcg64Mcg::seed_from_u64(17);
        let net = FlowNetwork::random(&mut rng, 6, 0.8, 0.5f64..=2.5).unwrap();

        for (_, capacity) in net.arcs() {
            assert!((0.5..=2.5).contains(&capacity));
        }
        assert!(net.max_flow(0, 5).unwrap().flow >= 0.0);
    }
}
