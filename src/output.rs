// Output formatting module
// Renders the header and result rows as tab-separated or JSON lines

use std::io::{self, Write};

use crate::hash::DigestRow;

/// Row output format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// Tab-separated: label, then one hex digest per algorithm
    Tsv,
    /// One JSON object per row; the header is emitted as a JSON array
    JsonLines,
}

/// Buffered row writer over any output stream.
///
/// The header is written once, ahead of the data rows, and is never
/// repeated per row.
pub struct RowWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> RowWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Write the header row ("filename" plus algorithm names)
    pub fn write_header(&mut self, header: &[String]) -> io::Result<()> {
        match self.format {
            OutputFormat::Tsv => writeln!(self.out, "{}", header.join("\t")),
            OutputFormat::JsonLines => {
                let line = serde_json::to_string(header).map_err(io::Error::from)?;
                writeln!(self.out, "{}", line)
            }
        }
    }

    /// Write one result row with hex-rendered digests
    pub fn write_row(&mut self, row: &DigestRow) -> io::Result<()> {
        match self.format {
            OutputFormat::Tsv => {
                let mut fields = Vec::with_capacity(row.digests.len() + 1);
                fields.push(row.label.clone());
                fields.extend(row.digests.iter().map(hex::encode));
                writeln!(self.out, "{}", fields.join("\t"))
            }
            OutputFormat::JsonLines => {
                let line = serde_json::to_string(row).map_err(io::Error::from)?;
                writeln!(self.out, "{}", line)
            }
        }
    }

    /// Flush the underlying stream
    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}
