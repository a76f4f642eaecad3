/*!
# Flow-Network Representation

A flow network is a directed graph over nodes `0..n` whose arcs carry
capacities. Outgoing adjacency is stored as `(head, capacity)` pairs per
node; there is at most one arc per ordered node pair.

The representation supports incremental construction (`add_arc` /
`try_add_arc`) and bulk construction (`from_arcs`). The max-flow engine
treats a network as immutable input and keeps all mutable state in its own
residual matrix.
*/

use crate::prelude::*;

/// A directed, capacitated network.
///
/// `C` is the capacity type, see [`Capacity`]. Arbitrary (even invalid)
/// capacity values may be stored; validation happens when an engine builds
/// its residual state from the network.
#[derive(Clone)]
pub struct FlowNetwork<C> {
    out_arcs: Vec<Vec<(Node, C)>>,
    num_arcs: NumEdges,
}

impl<C: Capacity> FlowNetwork<C> {
    /// Creates an empty network with `n` singleton nodes
    pub fn new(n: NumNodes) -> Self {
        Self {
            out_arcs: vec![Vec::new(); n as usize],
            num_arcs: 0,
        }
    }

    /// Creates a network from a number of nodes and an iterator over arcs with capacities
    pub fn from_arcs<E: Into<Edge>>(n: NumNodes, arcs: impl IntoIterator<Item = (E, C)>) -> Self {
        let mut network = Self::new(n);
        network.add_arcs(arcs);
        network
    }

    /// Adds the arc `(u, v)` with the given capacity to the network.
    /// ** Panics if `u >= n || v >= n` or the arc was already present **
    pub fn add_arc(&mut self, u: Node, v: Node, capacity: C) {
        assert!(self.try_add_arc(u, v, capacity));
    }

    /// Adds the arc `(u, v)` with the given capacity to the network.
    /// Returns *true* exactly if the arc was not present previously;
    /// an already present arc keeps its capacity.
    /// ** Panics if `u >= n || v >= n` **
    pub fn try_add_arc(&mut self, u: Node, v: Node, capacity: C) -> bool {
        assert!(v < self.number_of_nodes());
        if self.out_arcs[u as usize].iter().any(|&(w, _)| w == v) {
            return false;
        }

        self.out_arcs[u as usize].push((v, capacity));
        self.num_arcs += 1;
        true
    }

    /// Adds all arcs in the collection.
    /// ** Panics if any arc is out of range or appears twice **
    pub fn add_arcs<E: Into<Edge>>(&mut self, arcs: impl IntoIterator<Item = (E, C)>) {
        for (e, capacity) in arcs {
            let Edge(u, v) = e.into();
            self.add_arc(u, v, capacity);
        }
    }
}

impl<C: Capacity> GraphNodeOrder for FlowNetwork<C> {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_arcs.len() as NumNodes
    }

    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }
}

impl<C: Capacity> GraphEdgeOrder for FlowNetwork<C> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_arcs
    }
}

impl<C: Capacity> AdjacencyList for FlowNetwork<C> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.out_arcs[u as usize].iter().map(|&(v, _)| v)
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.out_arcs[u as usize].len() as NumNodes
    }
}

impl<C: Capacity> CapacitatedArcs<C> for FlowNetwork<C> {
    fn arcs_of(&self, u: Node) -> impl Iterator<Item = (Node, C)> + '_ {
        self.out_arcs[u as usize].iter().copied()
    }

    fn capacity_of(&self, u: Node, v: Node) -> Option<C> {
        assert!(v < self.number_of_nodes());
        self.out_arcs[u as usize]
            .iter()
            .find(|&&(w, _)| w == v)
            .map(|&(_, c)| c)
    }
}
