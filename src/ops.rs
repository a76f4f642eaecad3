use std::ops::Range;

use itertools::Itertools;

use crate::prelude::*;

/// Provides getters pertaining to the node-size of a network
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the network
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::with_capacity(self.len())
    }

    /// Returns a range over all vertices.
    /// In contrast to self.vertices(), the range returned by self.vertices_range() does
    /// not borrow self and hence may be used where additional mutable references of self are needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if the network has no nodes (and thus no arcs)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the arc-size of a network
pub trait GraphEdgeOrder {
    /// Returns the number of arcs of the network
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the network has no arcs
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the out-neighborhood of a given vertex.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of outgoing neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;
}

/// Access to the arcs of a capacitated network.
///
/// Arcs are directed and carry a capacity; there is at most one arc per
/// ordered node pair. Generic consumers (residual construction, writers,
/// the max-flow engine) bound on this trait instead of a concrete
/// representation.
pub trait CapacitatedArcs<C: Capacity>: GraphNodeOrder + Sized {
    /// Returns an iterator over the outgoing arcs of a given vertex as `(head, capacity)` pairs.
    /// ** Panics if `u >= n` **
    fn arcs_of(&self, u: Node) -> impl Iterator<Item = (Node, C)> + '_;

    /// Returns the capacity of the arc `(u, v)` or `None` if the arc does not exist.
    /// ** Panics if `u >= n || v >= n` **
    fn capacity_of(&self, u: Node, v: Node) -> Option<C>;

    /// Returns *true* if the arc `(u, v)` exists in the network.
    /// ** Panics if `u >= n || v >= n` **
    fn has_arc(&self, u: Node, v: Node) -> bool {
        self.capacity_of(u, v).is_some()
    }

    /// Returns an iterator over all arcs in the network with their capacities.
    fn arcs(&self) -> impl Iterator<Item = (Edge, C)> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.arcs_of(u).map(move |(v, c)| (Edge(u, v), c)))
    }

    /// Returns an iterator over all arcs with their capacities in sorted order.
    fn ordered_arcs(&self) -> impl Iterator<Item = (Edge, C)> {
        let mut arcs = self.arcs().collect_vec();
        arcs.sort_by_key(|(e, _)| *e);
        arcs.into_iter()
    }

    /// Returns the total capacity leaving `u`.
    /// ** Panics if `u >= n` **
    fn out_capacity_of(&self, u: Node) -> C {
        let mut total = C::zero();
        for (_, c) in self.arcs_of(u) {
            total += c;
        }
        total
    }

    /// Returns the total capacity entering `u`. Scans all arcs.
    fn in_capacity_of(&self, u: Node) -> C {
        let mut total = C::zero();
        for (Edge(_, v), c) in self.arcs() {
            if v == u {
                total += c;
            }
        }
        total
    }
}
