use crate::core::models::knot::Knot;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing persisted knot layouts.
///
/// Implementors handle format-specific parsing and serialization; the path
/// helpers are shared.
pub trait KnotFile {
    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a knot from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is empty, malformed, or unreadable.
    fn read_from(reader: &mut impl BufRead) -> Result<Knot, Self::Error>;

    /// Writes a knot to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(knot: &Knot, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a knot from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Knot, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a knot to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(knot: &Knot, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(knot, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
