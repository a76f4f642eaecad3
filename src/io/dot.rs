//! # Dot
//!
//! The Dot-Format is a very extensive format used by [GraphViz](https://graphviz.org/) to allow
//! for detailed visualizations. We only use basic functionality to draw a capacitated network:
//! every arc is labeled with its capacity and the terminals are highlighted with a doublecircle
//! shape. Networks are always written as directed graphs.
//!
//! This format is write-only.
//!
//! ```
//! use flownet::{io::*, prelude::*};
//!
//! let network = FlowNetwork::<u64>::from_arcs(3, [((0, 1), 5), ((1, 2), 2)]);
//!
//! let mut buffer = Vec::new();
//! network.try_write_dot(&mut buffer).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(buffer).unwrap(),
//!     "digraph {\nu1[shape=doublecircle];u3[shape=doublecircle];\nu1->u2[label=\"5\"];u2->u3[label=\"2\"];\n}\n"
//! );
//! ```
use std::{fmt::Display, io::Write};

use super::*;

/// A writer for the Dot-Format
#[derive(Debug, Clone)]
pub struct DotWriter {
    /// Increment nodes by 1 before writing
    inc_nodes: bool,
    /// Prefix of a node (default: 'u')
    prefix: String,
}

impl Default for DotWriter {
    fn default() -> Self {
        Self {
            inc_nodes: true,
            prefix: "u".to_string(),
        }
    }
}

impl DotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *false*, nodes retain their internal value (-1 that of output)
    pub fn inc_nodes(mut self, inc_nodes: bool) -> Self {
        self.inc_nodes = inc_nodes;
        self
    }

    /// Set the prefix of a node (`u` by default).
    pub fn node_prefix<S>(self, prefix: S) -> DotWriter
    where
        S: Into<String>,
    {
        DotWriter {
            inc_nodes: self.inc_nodes,
            prefix: prefix.into(),
        }
    }

    /// Writes the opening brackets of the graph
    pub fn start_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "digraph {{")
    }

    /// Formats a node depending on `self.prefix, self.inc_nodes`
    fn format_node(&self, u: Node) -> String {
        let u = u + self.inc_nodes as Node;
        format!("{}{u}", self.prefix)
    }

    /// Highlights the given terminals with a doublecircle shape.
    pub fn mark_terminals<W>(&self, writer: &mut W, source: Node, sink: Node) -> Result<()>
    where
        W: Write,
    {
        writeln!(
            writer,
            "{}[shape=doublecircle];{}[shape=doublecircle];",
            self.format_node(source),
            self.format_node(sink)
        )
    }

    /// Writes an iterator of arcs to `writer`, each labeled with its capacity.
    pub fn write_arcs<W, C, I>(&self, writer: &mut W, arcs: I) -> Result<()>
    where
        W: Write,
        C: Display,
        I: IntoIterator<Item = (Edge, C)>,
    {
        for (Edge(u, v), capacity) in arcs.into_iter() {
            write!(
                writer,
                "{}->{}[label=\"{capacity}\"];",
                self.format_node(u),
                self.format_node(v)
            )?;
        }
        writeln!(writer)
    }

    /// Closes the Dot-Graph, thus finishing the graph
    pub fn finish_graph<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writeln!(writer, "}}")
    }
}

impl<C> NetworkWriter<FlowNetwork<C>> for DotWriter
where
    C: Capacity,
{
    fn try_write_network<W>(&self, network: &FlowNetwork<C>, mut writer: W) -> std::io::Result<()>
    where
        W: Write,
    {
        self.start_graph(&mut writer)?;
        if !network.is_empty() {
            self.mark_terminals(&mut writer, 0, network.number_of_nodes() - 1)?;
        }
        self.write_arcs(&mut writer, network.ordered_arcs())?;
        self.finish_graph(&mut writer)
    }
}

/// Trait for writing a network to a writer in the Dot-Format.
/// Shorthand for default settings.
pub trait DotWrite {
    /// Tries to write the network to a writer
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write;

    /// Tries to write the network to a file
    fn try_write_dot_file<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_dot(writer)
    }
}

impl<C> DotWrite for FlowNetwork<C>
where
    C: Capacity,
{
    fn try_write_dot<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        DotWriter::default().try_write_network(self, writer)
    }
}
