/*!
# Flow Network Generators

This module provides builder-style generators for random flow networks, plus
utilities to plant deterministic **substructures** (paths, cycles) into an
already existing network.

The typical usage workflow is:

1. Create a generator instance (e.g., `RandomNetwork::new()`).
2. Set parameters using builder methods (e.g., `.nodes(n).prob(p)`).
3. Generate the network via `generate(rng)`.

Generators draw all randomness from a caller-supplied [`rand::Rng`], so runs
are reproducible by seeding the generator.
*/

use rand::Rng;

use crate::prelude::*;

mod random;
mod substructures;

pub use random::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
///
/// This is the most common builder method across generators.
/// Allows a fluent interface when configuring generators.
pub trait NumNodesGen {
    /// Sets the number of nodes of the generated network.
    fn set_nodes(&mut self, n: NumNodes);

    /// Chainable version of [`Self::set_nodes`].
    fn nodes(mut self, n: NumNodes) -> Self
    where
        Self: Sized,
    {
        self.set_nodes(n);
        self
    }
}

/// General trait for configurable random network generators.
pub trait NetworkGenerator<C: Capacity> {
    /// Generates a complete flow network.
    ///
    /// # Errors
    /// Fails with [`FlowError::InvalidParameters`] if the generator was not
    /// fully or not consistently configured.
    fn generate<R>(&self, rng: &mut R) -> Result<FlowNetwork<C>>
    where
        R: Rng;
}
