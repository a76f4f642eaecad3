/*!
# Substructure Generators

This module provides utility methods to plant additional **substructures**
inside an already existing flow network.

It allows adding common motifs such as:

- **Paths**
- **Cycles**

These methods are useful when enriching a network with specific structures for
testing algorithms, generating benchmark instances, or modeling networks with
known sub-components.

# Example

```rust
use flownet::{prelude::*, gens::*};

let mut net = FlowNetwork::new(5);
net.connect_path([0, 1, 2], [7u64, 4]);
net.connect_cycle([2, 3, 4], std::iter::repeat(3));

assert_eq!(
    net.ordered_arcs().collect::<Vec<_>>(),
    vec![
        (Edge(0, 1), 7),
        (Edge(1, 2), 4),
        (Edge(2, 3), 3),
        (Edge(3, 4), 3),
        (Edge(4, 2), 3),
    ]
);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for planting additional **substructures** (paths, cycles) inside an
/// already existing flow network.
pub trait FlowSubstructures<C: Capacity> {
    /// Connects the given nodes in order with a **simple path**, drawing each
    /// arc's capacity from `capacities`.
    ///
    /// Uniform capacities are easiest passed as `std::iter::repeat(c)`;
    /// leftover capacities are not consumed.
    /// ** Panics if an arc of the path is already present or if `capacities`
    /// yields fewer values than the path has arcs **
    ///
    /// # Example
    /// ```rust
    /// use flownet::{prelude::*, gens::*};
    ///
    /// let mut net = FlowNetwork::new(4);
    /// net.connect_path([0, 1, 2, 3], [5u64, 3, 4]);
    ///
    /// assert_eq!(net.capacity_of(0, 1), Some(5));
    /// assert_eq!(net.capacity_of(1, 2), Some(3));
    /// assert_eq!(net.capacity_of(2, 3), Some(4));
    /// ```
    fn connect_path<P, I>(&mut self, nodes_on_path: P, capacities: I)
    where
        P: IntoIterator<Item = Node>,
        I: IntoIterator<Item = C>;

    /// Connects the given nodes with a **cycle**, drawing each arc's capacity
    /// from `capacities`.
    ///
    /// - Consecutive nodes are connected by arcs.
    /// - Additionally, the last node is connected back to the first.
    ///
    /// ** Panics if an arc of the cycle is already present or if `capacities`
    /// yields fewer values than the cycle has arcs **
    ///
    /// # Example
    /// ```rust
    /// use flownet::{prelude::*, gens::*};
    ///
    /// let mut net = FlowNetwork::new(3);
    /// net.connect_cycle([0, 1, 2], [2u64, 6, 1]);
    ///
    /// assert_eq!(net.capacity_of(0, 1), Some(2));
    /// assert_eq!(net.capacity_of(1, 2), Some(6));
    /// assert_eq!(net.capacity_of(2, 0), Some(1));
    /// ```
    fn connect_cycle<P, I>(&mut self, nodes_in_cycle: P, capacities: I)
    where
        P: IntoIterator<Item = Node>,
        I: IntoIterator<Item = C>;
}

impl<C: Capacity> FlowSubstructures<C> for FlowNetwork<C> {
    fn connect_path<P, I>(&mut self, nodes_on_path: P, capacities: I)
    where
        P: IntoIterator<Item = Node>,
        I: IntoIterator<Item = C>,
    {
        let mut capacities = capacities.into_iter();
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            let capacity = capacities.next().expect("Each arc of the path needs a capacity!");
            self.add_arc(u, v, capacity);
        }
    }

    fn connect_cycle<P, I>(&mut self, nodes_in_cycle: P, capacities: I)
    where
        P: IntoIterator<Item = Node>,
        I: IntoIterator<Item = C>,
    {
        let mut capacities = capacities.into_iter();
        let mut iter = nodes_in_cycle.into_iter();

        // written this way to avoid cloning the iterator
        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                let capacity = capacities.next().expect("Each arc of the cycle needs a capacity!");
                self.add_arc(prev, cur, capacity);
                prev = cur;
            }

            let capacity = capacities.next().expect("Each arc of the cycle needs a capacity!");
            self.add_arc(prev, first, capacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::MaxFlow;

    #[test]
    fn connect_path() {
        {
            let mut net = FlowNetwork::<u64>::new(6);
            net.connect_path([], []);
            assert_eq!(net.number_of_edges(), 0);
        }

        {
            let mut net = FlowNetwork::<u64>::new(6);
            net.connect_path([1], []);
            assert_eq!(net.number_of_edges(), 0);
        }

        {
            let mut net = FlowNetwork::new(6);
            net.connect_path([2, 1], [4u64]);
            assert_eq!(net.number_of_edges(), 1);
            assert_eq!(net.capacity_of(2, 1), Some(4));
        }

        {
            let mut net = FlowNetwork::new(6);
            net.connect_path([0, 3, 1, 4], [2u64, 7, 5]);
            assert_eq!(
                net.ordered_arcs().collect_vec(),
                vec![(Edge(0, 3), 2), (Edge(1, 4), 5), (Edge(3, 1), 7)]
            );
        }
    }

    #[test]
    #[should_panic]
    fn connect_path_with_too_few_capacities() {
        let mut net = FlowNetwork::new(4);
        net.connect_path([0, 1, 2, 3], [1u64, 2]);
    }

    #[test]
    fn connect_cycle() {
        {
            let mut net = FlowNetwork::<u64>::new(6);
            net.connect_cycle([], []);
            assert_eq!(net.number_of_edges(), 0);
        }

        {
            // a single-node cycle is a self-loop
            let mut net = FlowNetwork::new(6);
            net.connect_cycle([1], std::iter::repeat(3u64));
            assert_eq!(net.number_of_edges(), 1);
            assert!(net.has_arc(1, 1));
        }

        {
            let mut net = FlowNetwork::new(6);
            net.connect_cycle([0, 3, 1, 4], [2u64, 7, 5, 9]);
            assert_eq!(
                net.ordered_arcs().collect_vec(),
                vec![
                    (Edge(0, 3), 2),
                    (Edge(1, 4), 5),
                    (Edge(3, 1), 7),
                    (Edge(4, 0), 9)
                ]
            );
        }
    }

    #[test]
    #[should_panic]
    fn connect_cycle_with_too_few_capacities() {
        let mut net = FlowNetwork::new(3);
        // the closing arc needs a third capacity
        net.connect_cycle([0, 1, 2], [1u64, 2]);
    }

    #[test]
    fn flows_through_substructures() {
        let mut net = FlowNetwork::new(4);
        net.connect_path([0, 1, 2, 3], [5u64, 3, 4]);
        assert_eq!(net.max_flow(0, 3).unwrap().flow, 3);

        let mut net = FlowNetwork::new(3);
        net.connect_cycle([0, 1, 2], [4u64, 6, 9]);
        assert_eq!(net.max_flow(0, 2).unwrap().flow, 4);
    }
}
