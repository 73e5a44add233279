//! The format-agnostic parsing trait implemented by every catalog format.

use std::{
    fs::File,
    io::{BufRead, Cursor, Read},
    path::Path,
};

use crate::error::Error;

/// Parses one catalog file of a given format.
///
/// Catalogs are read-only: there is no writing counterpart.
///
/// # Example
///
/// ```rust,no_run
/// use numerus::traits::Parser;
/// let format = numerus::formats::ts::Format::read_from("harbour-foilauth-pl.ts")?;
/// println!("{} messages", format.messages.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path, decoding BOM-marked UTF-16 to UTF-8 first.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
