/*!
`flownet` is a library for capacitated flow networks, built around two tasks:
- computing **maximum flows** using the Edmonds-Karp algorithm,
- **generating** random flow networks with configurable density and capacity range.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the network.
As most common networks do not exceed `2^32` nodes, this should normally suffice and save space as compared to `u64/usize`.
For **arcs**, we use a simple tuple-struct `Edge(Node, Node)` paired with a capacity.

Networks are always **directed**: `Edge(u, v)` and `Edge(v, u)` are considered distinct arcs and may
carry different capacities. Capacities are generic over [`Capacity`](crate::capacity::Capacity),
which is implemented for all primitive integer and float types.

A network is stored as a [`FlowNetwork`](crate::network::FlowNetwork), an adjacency list of
out-arcs with their capacities. A network does not store its terminals: by convention, the source
is node `0` and the sink is node `n - 1`.

# Design

All algorithms/generators are provided as configurable structs that one can alter to their needs using either the *Builder* / *Setter* pattern before running the configured algorithm on a provided network.
Alternatively, most important and commonly used functionalities should already be implemented via traits on the network itself, making them usable without configuring the algorithm beforehand.

Failures are reported as [`FlowError`](crate::error::FlowError): flows reject invalid capacities
and terminals, generators reject invalid parameters. Contract violations of internal building
blocks panic instead.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, capacities, errors, basic network operations, and the network representation,
- [`algo`] includes algorithm traits that are implemented on networks itself such as MaxFlow (`network.max_flow(source, sink)`), BFS/DFS traversals, and shortest paths,
- [`gens`] includes a random network generator as well as deterministic substructures such as paths and cycles,
- [`io`] includes handlers for reading networks in the DIMACS maximum flow format and writing them as DIMACS or GraphViz-Dot.

In most use-cases, `use flownet::{prelude::*, algo::*};` suffices for your needs.

```
use flownet::{algo::*, gens::*, prelude::*};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

let mut rng = Pcg64Mcg::seed_from_u64(42);

// Sample a network on 16 nodes containing roughly 30% of all admissible arcs.
let network: FlowNetwork<u64> = RandomNetwork::new()
    .nodes(16)
    .prob(0.3)
    .capacities(1..=10)
    .generate(&mut rng)
    .unwrap();

let (source, sink) = (0, network.number_of_nodes() - 1);
let result = network.max_flow(source, sink).unwrap();

assert!(result.flow <= network.out_capacity_of(source));
```

# When to use
You should only use this library if the following apply:
- Your graphs are directed and capacitated
- You want to work in *Rust*
- You require only basic functionality for flows.
- Performance is important

In all other cases, it might make sense for you to check out [petgraph](https://crates.io/crates/petgraph) who provide a more extensive library for general graphs in *Rust* including their own network flow algorithms.
*/

pub mod algo;
pub mod capacity;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod network;
pub mod node;
pub mod ops;
pub mod utils;

/// `flownet::prelude` includes definitions for nodes, edges and capacities, the error type, all basic network operation traits as well as the network representation.
pub mod prelude {
    pub use super::{capacity::*, edge::*, error::*, network::*, node::*, ops::*};
}
