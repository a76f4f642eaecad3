/*!
# IO

Utilities for reading and writing flow networks from and to different file formats.

## Input Formats

Currently supported input formats:
- **Dimacs**: The [DIMACS maximum flow format](http://archive.dimacs.rutgers.edu/Challenges/),
  representing the network as a problem line followed by terminal designations and one line per arc.

## Output Formats

For writing networks, in addition to the above format, the following is supported:
- **Dot**: The [DOT language](https://graphviz.org/doc/info/lang.html) of [GraphViz](https://graphviz.org/).

The DOT format:
- is write-only,
- labels every arc with its capacity,
- highlights the source and the sink.

## Traits

To generalize over reading/writing:
- [`NetworkReader`] and [`NetworkWriter`] are implemented by readers and writers for a specific format.
- [`NetworkRead`] and [`NetworkWrite`] abstract over reading/writing using a given [`FileFormat`].

*/

pub mod dimacs;
pub mod dot;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Result, Write},
    path::Path,
    str::FromStr,
};

use crate::prelude::*;

pub use dimacs::*;
pub use dot::*;

/// Identifier for a network file format.
///
/// Used in [`NetworkRead`] and [`NetworkWrite`] to determine the
/// correct parser or writer to use.
///
/// Currently supported:
/// - [`FileFormat::Dimacs`]
/// - [`FileFormat::Dot`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// DIMACS maximum flow format
    Dimacs,
    /// DOT language of GraphViz
    Dot,
}

impl FromStr for FileFormat {
    type Err = std::io::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dimacs" => Ok(FileFormat::Dimacs),
            "dot" => Ok(FileFormat::Dot),
            _ => Err(io_error!(
                ErrorKind::InvalidInput,
                format!("Unknown FileFormat: {s}")
            )),
        }
    }
}

/// Trait for types that can read flow networks in a specific format.
///
/// This trait provides both a low-level method to read from any
/// [`BufRead`] instance and a convenience wrapper to read directly
/// from files.
///
/// Typically implemented by specific readers (e.g., [`DimacsReader`]).
pub trait NetworkReader<N> {
    /// Reads a network from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid representation
    /// of a network in the expected format.
    fn try_read_network<R>(&self, reader: R) -> Result<N>
    where
        R: BufRead;

    /// Reads a network from a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered reader.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if its contents
    /// are not a valid representation of a network in the expected format.
    fn try_read_network_file<P>(&self, path: P) -> Result<N>
    where
        P: AsRef<Path>,
    {
        self.try_read_network(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write flow networks in a specific format.
///
/// This trait provides both a low-level method to write to any
/// [`Write`] instance and a convenience wrapper to write directly
/// to files.
///
/// Typically implemented by specific writers (e.g., [`DimacsWriter`],
/// [`DotWriter`]).
pub trait NetworkWriter<N> {
    /// Writes the given network to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g., IO errors).
    fn try_write_network<W>(&self, network: &N, writer: W) -> Result<()>
    where
        W: Write;

    /// Writes the given network to a file according to the settings in `self`.
    ///
    /// Internally wraps the file in a buffered writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_network_file<P>(&self, network: &N, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_network(network, BufWriter::new(File::create(path)?))
    }
}

/// Trait for reading networks when only a [`FileFormat`] is known.
///
/// Provides a unified interface to construct networks from readers
/// or files by dispatching to the correct format-specific parser.
pub trait NetworkRead: Sized {
    /// Reads a network from the given reader according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if the format is unsupported for this network type
    /// or if the input does not match the expected format.
    fn try_from_reader<R>(reader: R, format: FileFormat) -> Result<Self>
    where
        R: BufRead;

    /// Reads a network from the given file according to the specified [`FileFormat`].
    ///
    /// Internally wraps the file in a buffered reader.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if the input
    /// is invalid for the chosen format.
    fn try_from_file<P>(path: P, format: FileFormat) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::try_from_reader(BufReader::new(File::open(path)?), format)
    }
}

impl<N> NetworkRead for N
where
    N: DimacsRead,
{
    fn try_from_reader<R>(reader: R, format: FileFormat) -> Result<Self>
    where
        R: BufRead,
    {
        match format {
            FileFormat::Dimacs => Self::try_read_dimacs(reader),
            _ => Err(io_error!(
                ErrorKind::InvalidInput,
                format!("{format:?} does not support NetworkRead")
            )),
        }
    }
}

/// Trait for writing networks when only a [`FileFormat`] is known.
///
/// Provides a unified interface to output networks to writers or files
/// by dispatching to the correct format-specific writer.
pub trait NetworkWrite {
    /// Writes the network to the given writer according to the specified [`FileFormat`].
    ///
    /// # Errors
    /// Returns an error if the format is unsupported for this network type
    /// or if writing fails (e.g., IO errors).
    fn try_write_to_writer<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write;

    /// Writes the network to the given file according to the specified [`FileFormat`].
    ///
    /// Internally wraps the file in a buffered writer.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_to_file<P>(&self, path: P, format: FileFormat) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.try_write_to_writer(BufWriter::new(File::create(path)?), format)
    }
}

impl<N> NetworkWrite for N
where
    N: DimacsWrite + DotWrite,
{
    fn try_write_to_writer<W>(&self, writer: W, format: FileFormat) -> Result<()>
    where
        W: Write,
    {
        match format {
            FileFormat::Dimacs => self.try_write_dimacs(writer),
            FileFormat::Dot => self.try_write_dot(writer),
        }
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;
