/*!
# Flow Network Algorithms

This module provides the **algorithms** built on top of the network representations in this crate.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use flownet::algo::*;
```
and gain access to traversals, reachability, shortest paths, and maximum flows.
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod max_flow;
mod traversal;

use crate::prelude::*;

pub use max_flow::*;
pub use traversal::*;

/// Common interface of algorithm states that hold a reference to the graph they run on.
pub trait WithGraphRef<G> {
    /// Returns a reference to the underlying graph.
    fn graph_ref(&self) -> &G;
}
