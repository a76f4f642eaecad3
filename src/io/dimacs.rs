/*!
# Dimacs

The DIMACS maximum flow format describes a capacitated network line by line:
- `c <comment>` lines and blank lines are ignored,
- `p max <n> <m>` declares a network with `n` nodes and `m` arcs and must precede all other descriptors,
- `n <id> s` and `n <id> t` designate the source and the sink,
- `a <u> <v> <c>` adds an arc from `u` to `v` with capacity `c`.

Nodes are 1-indexed in the format and shifted to 0-indexed [`Node`]s when read.
A [`FlowNetwork`] does not store its terminals: by convention, the source is
node `0` and the sink is node `n - 1`. The reader thus requires the instance to
designate node `1` as the source and node `n` as the sink.

## Reading

```
use flownet::{io::*, prelude::*};
use std::io::Cursor;

let data = "c A tiny instance\np max 4 5\nn 1 s\nn 4 t\na 1 2 4\na 1 3 2\na 2 3 1\na 2 4 2\na 3 4 3\n";

let network: FlowNetwork<u64> = FlowNetwork::try_read_dimacs(Cursor::new(data)).unwrap();

assert_eq!(network.number_of_nodes(), 4);
assert_eq!(network.number_of_edges(), 5);
assert_eq!(network.capacity_of(0, 1), Some(4));
```

## Writing

```
use flownet::{io::*, prelude::*};

let network = FlowNetwork::<u64>::from_arcs(3, [((0, 1), 5), ((1, 2), 2)]);

let mut buffer = Vec::new();
network.try_write_dimacs(&mut buffer).unwrap();

assert_eq!(
    String::from_utf8(buffer).unwrap(),
    "p max 3 2\nn 1 s\nn 3 t\na 1 2 5\na 2 3 2\n"
);
```
*/

use super::*;

/// Reader for the DIMACS maximum flow format.
///
/// The reader is strict: the problem type must be `max`, the declared arc
/// count must match the number of arc descriptors, every endpoint must lie
/// in range, capacities must be valid, and the terminals must be designated
/// as node `1` (source) and node `n` (sink).
#[derive(Debug, Copy, Clone, Default)]
pub struct DimacsReader;

impl DimacsReader {
    /// Creates a new [`DimacsReader`].
    pub fn new() -> Self {
        Self
    }
}

impl<C> NetworkReader<FlowNetwork<C>> for DimacsReader
where
    C: Capacity + FromStr,
{
    fn try_read_network<R>(&self, reader: R) -> Result<FlowNetwork<C>>
    where
        R: BufRead,
    {
        let mut network: Option<FlowNetwork<C>> = None;
        let mut num_arcs: NumEdges = 0;
        let mut arcs_read: NumEdges = 0;
        let mut source: Option<Node> = None;
        let mut sink: Option<Node> = None;

        for line in reader.lines() {
            let line = line?;
            let mut values = line.split_whitespace();

            match values.next() {
                None | Some("c") => {}
                Some("p") => {
                    raise_error_unless!(
                        network.is_none(),
                        ErrorKind::InvalidData,
                        "Duplicate problem line."
                    );
                    raise_error_unless!(
                        values.next() == Some("max"),
                        ErrorKind::InvalidData,
                        "Only the 'max' problem type is supported."
                    );

                    let n: NumNodes = parse_next_value!(values, "number of nodes");
                    num_arcs = parse_next_value!(values, "number of arcs");

                    network = Some(FlowNetwork::new(n));
                }
                Some("n") => {
                    raise_error_unless!(
                        network.is_some(),
                        ErrorKind::InvalidData,
                        "Terminal descriptor before problem line."
                    );

                    let id: Node = parse_next_value!(values, "terminal id");
                    let n = network.as_ref().unwrap().number_of_nodes();
                    raise_error_unless!(
                        (1..=n).contains(&id),
                        ErrorKind::InvalidData,
                        format!("Terminal id {id} out of range.")
                    );

                    match values.next() {
                        Some("s") => {
                            raise_error_unless!(
                                source.is_none(),
                                ErrorKind::InvalidData,
                                "Duplicate source designation."
                            );
                            source = Some(id);
                        }
                        Some("t") => {
                            raise_error_unless!(
                                sink.is_none(),
                                ErrorKind::InvalidData,
                                "Duplicate sink designation."
                            );
                            sink = Some(id);
                        }
                        _ => {
                            return Err(io_error!(
                                ErrorKind::InvalidData,
                                "Terminal descriptor must designate 's' or 't'."
                            ));
                        }
                    }
                }
                Some("a") => {
                    raise_error_unless!(
                        network.is_some(),
                        ErrorKind::InvalidData,
                        "Arc descriptor before problem line."
                    );
                    let net = network.as_mut().unwrap();

                    let u: Node = parse_next_value!(values, "arc tail");
                    let v: Node = parse_next_value!(values, "arc head");
                    let capacity: C = parse_next_value!(values, "arc capacity");

                    let n = net.number_of_nodes();
                    raise_error_unless!(
                        (1..=n).contains(&u) && (1..=n).contains(&v),
                        ErrorKind::InvalidData,
                        format!("Arc ({u},{v}) out of range.")
                    );
                    raise_error_unless!(
                        capacity.is_valid_capacity(),
                        ErrorKind::InvalidData,
                        format!("Invalid capacity {capacity} on arc ({u},{v}).")
                    );
                    raise_error_unless!(
                        arcs_read < num_arcs,
                        ErrorKind::InvalidData,
                        "More arcs than declared in the problem line."
                    );
                    raise_error_unless!(
                        net.try_add_arc(u - 1, v - 1, capacity),
                        ErrorKind::InvalidData,
                        format!("Duplicate arc ({u},{v}).")
                    );
                    arcs_read += 1;
                }
                Some(_) => {
                    return Err(io_error!(ErrorKind::InvalidData, "Unknown line descriptor."));
                }
            }
        }

        raise_error_unless!(
            network.is_some(),
            ErrorKind::InvalidData,
            "Missing problem line."
        );
        let network = network.unwrap();

        raise_error_unless!(
            arcs_read == num_arcs,
            ErrorKind::InvalidData,
            format!("Expected {num_arcs} arcs but found {arcs_read}.")
        );
        raise_error_unless!(
            source.is_some() && sink.is_some(),
            ErrorKind::InvalidData,
            "Missing terminal designation."
        );
        raise_error_unless!(
            source == Some(1),
            ErrorKind::InvalidData,
            "The source must be designated as node 1."
        );
        raise_error_unless!(
            sink == Some(network.number_of_nodes()),
            ErrorKind::InvalidData,
            "The sink must be designated as the last node."
        );

        Ok(network)
    }
}

/// Shorthand trait for reading networks in the DIMACS format.
pub trait DimacsRead: Sized {
    /// Reads a network in the DIMACS format from the given reader.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid DIMACS maximum flow instance.
    fn try_read_dimacs<R>(reader: R) -> Result<Self>
    where
        R: BufRead;

    /// Reads a network in the DIMACS format from the given file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or does not contain
    /// a valid DIMACS maximum flow instance.
    fn try_read_dimacs_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::try_read_dimacs(BufReader::new(File::open(path)?))
    }
}

impl<C> DimacsRead for FlowNetwork<C>
where
    C: Capacity + FromStr,
{
    fn try_read_dimacs<R>(reader: R) -> Result<Self>
    where
        R: BufRead,
    {
        DimacsReader::new().try_read_network(reader)
    }
}

/// Writer for the DIMACS maximum flow format.
///
/// Writes an optional block of comment lines, the problem line, the terminal
/// designations `n 1 s` and `n <n> t`, and one `a`-line per arc in lexicographic
/// order.
#[derive(Debug, Clone, Default)]
pub struct DimacsWriter {
    comments: Vec<String>,
}

impl DimacsWriter {
    /// Creates a new [`DimacsWriter`] without comment lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a comment line emitted before the problem line.
    pub fn set_comment<S>(&mut self, comment: S)
    where
        S: Into<String>,
    {
        self.comments.push(comment.into());
    }

    /// Chainable variant of [`DimacsWriter::set_comment`].
    pub fn comment<S>(mut self, comment: S) -> Self
    where
        S: Into<String>,
    {
        self.set_comment(comment);
        self
    }
}

impl<C> NetworkWriter<FlowNetwork<C>> for DimacsWriter
where
    C: Capacity,
{
    fn try_write_network<W>(&self, network: &FlowNetwork<C>, mut writer: W) -> Result<()>
    where
        W: Write,
    {
        // terminal designations are mandatory, ruling out node-less networks
        let n = network.number_of_nodes();
        raise_error_unless!(
            n > 0,
            ErrorKind::InvalidData,
            "An empty network has no DIMACS representation."
        );

        for comment in &self.comments {
            writeln!(writer, "c {comment}")?;
        }

        writeln!(writer, "p max {n} {}", network.number_of_edges())?;
        writeln!(writer, "n 1 s")?;
        writeln!(writer, "n {n} t")?;

        for (Edge(u, v), capacity) in network.ordered_arcs() {
            writeln!(writer, "a {} {} {capacity}", u + 1, v + 1)?;
        }

        Ok(())
    }
}

/// Shorthand trait for writing networks in the DIMACS format.
pub trait DimacsWrite {
    /// Writes the network in the DIMACS format to the given writer.
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g., IO errors) or if the network
    /// has no nodes: the format requires terminal designations.
    fn try_write_dimacs<W>(&self, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the network in the DIMACS format to the given file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_dimacs_file<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_dimacs(BufWriter::new(File::create(path)?))
    }
}

impl<C> DimacsWrite for FlowNetwork<C>
where
    C: Capacity,
{
    fn try_write_dimacs<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        DimacsWriter::new().try_write_network(self, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;
    use std::io::Cursor;

    const INSTANCE: &str = "c A small example\n\
        p max 4 5\n\
        n 1 s\n\
        n 4 t\n\
        a 1 2 4\n\
        a 1 3 2\n\
        a 2 3 1\n\
        a 2 4 2\n\
        a 3 4 3\n";

    #[test]
    fn read_small_instance() {
        let network: FlowNetwork<u64> =
            FlowNetwork::try_read_dimacs(Cursor::new(INSTANCE)).unwrap();

        assert_eq!(network.number_of_nodes(), 4);
        assert_eq!(network.number_of_edges(), 5);
        assert_eq!(
            network.ordered_arcs().collect::<Vec<_>>(),
            vec![
                (Edge(0, 1), 4),
                (Edge(0, 2), 2),
                (Edge(1, 2), 1),
                (Edge(1, 3), 2),
                (Edge(2, 3), 3),
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let data = "c header\n\np max 2 1\nc mid\nn 1 s\nn 2 t\n\na 1 2 9\nc trailing\n";
        let network: FlowNetwork<u32> = FlowNetwork::try_read_dimacs(Cursor::new(data)).unwrap();

        assert_eq!(network.number_of_edges(), 1);
        assert_eq!(network.capacity_of(0, 1), Some(9));
    }

    #[test]
    fn write_small_instance() {
        let network = FlowNetwork::<u64>::from_arcs(3, [((0, 1), 5), ((0, 2), 3), ((1, 2), 2)]);

        let mut buffer = Vec::new();
        DimacsWriter::new()
            .comment("three nodes")
            .try_write_network(&network, &mut buffer)
            .unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "c three nodes\np max 3 3\nn 1 s\nn 3 t\na 1 2 5\na 1 3 3\na 2 3 2\n"
        );
    }

    #[test]
    fn written_networks_can_be_read_back() {
        let mut rng = Pcg64Mcg::seed_from_u64(123);
        let network: FlowNetwork<u64> = FlowNetwork::random(&mut rng, 12, 0.3, 1..=20).unwrap();

        let mut buffer = Vec::new();
        network.try_write_dimacs(&mut buffer).unwrap();
        let reread = FlowNetwork::<u64>::try_read_dimacs(Cursor::new(buffer)).unwrap();

        assert_eq!(
            network.ordered_arcs().collect::<Vec<_>>(),
            reread.ordered_arcs().collect::<Vec<_>>()
        );
    }

    #[test]
    fn node_less_networks_have_no_dimacs_form() {
        // neither side accepts an instance that cannot designate terminals
        let network = FlowNetwork::<u64>::new(0);
        let result = network.try_write_dimacs(Vec::new());
        assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::InvalidData));

        let reread = FlowNetwork::<u64>::try_read_dimacs(Cursor::new("p max 0 0\n"));
        assert_eq!(
            reread.map(|_| ()).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidData)
        );
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let bad_instances = [
            // missing problem line
            "n 1 s\nn 2 t\na 1 2 3\n",
            // wrong problem type
            "p min 2 1\nn 1 s\nn 2 t\na 1 2 3\n",
            // duplicate problem line
            "p max 2 1\np max 2 1\nn 1 s\nn 2 t\na 1 2 3\n",
            // missing sink designation
            "p max 2 1\nn 1 s\na 1 2 3\n",
            // source is not node 1
            "p max 3 1\nn 2 s\nn 3 t\na 2 3 1\n",
            // sink is not the last node
            "p max 3 1\nn 1 s\nn 2 t\na 1 2 1\n",
            // fewer arcs than declared
            "p max 2 2\nn 1 s\nn 2 t\na 1 2 3\n",
            // more arcs than declared
            "p max 2 1\nn 1 s\nn 2 t\na 1 2 3\na 2 1 1\n",
            // endpoint out of range
            "p max 2 1\nn 1 s\nn 2 t\na 1 3 3\n",
            // unparsable capacity
            "p max 2 1\nn 1 s\nn 2 t\na 1 2 x\n",
            // unknown line descriptor
            "p max 2 1\nn 1 s\nn 2 t\nq 1 2\na 1 2 3\n",
            // duplicate arc
            "p max 2 2\nn 1 s\nn 2 t\na 1 2 3\na 1 2 4\n",
            // terminal id out of range
            "p max 2 1\nn 1 s\nn 3 t\na 1 2 3\n",
        ];

        for data in bad_instances {
            let result = FlowNetwork::<u64>::try_read_dimacs(Cursor::new(data));
            assert_eq!(
                result.map(|_| ()).map_err(|e| e.kind()),
                Err(ErrorKind::InvalidData),
                "accepted invalid instance {data:?}"
            );
        }
    }

    #[test]
    fn invalid_capacities_are_rejected() {
        let negative = "p max 2 1\nn 1 s\nn 2 t\na 1 2 -3\n";
        assert!(FlowNetwork::<i64>::try_read_dimacs(Cursor::new(negative)).is_err());

        let nan = "p max 2 1\nn 1 s\nn 2 t\na 1 2 NaN\n";
        assert!(FlowNetwork::<f64>::try_read_dimacs(Cursor::new(nan)).is_err());
    }

    #[test]
    fn format_dispatch() {
        assert_eq!("dimacs".parse::<FileFormat>().unwrap(), FileFormat::Dimacs);
        assert_eq!("Dot".parse::<FileFormat>().unwrap(), FileFormat::Dot);
        assert!("gml".parse::<FileFormat>().is_err());

        let network =
            FlowNetwork::<u64>::try_from_reader(Cursor::new(INSTANCE), FileFormat::Dimacs)
                .unwrap();
        assert_eq!(network.number_of_edges(), 5);

        let mut buffer = Vec::new();
        network
            .try_write_to_writer(&mut buffer, FileFormat::Dimacs)
            .unwrap();
        assert!(!buffer.is_empty());

        assert!(FlowNetwork::<u64>::try_from_reader(Cursor::new(""), FileFormat::Dot).is_err());
    }
}
