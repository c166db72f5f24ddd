// Chunk source module
// Turns one input into a forward-only sequence of fixed-size byte chunks

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use bytes::Bytes;

use super::error::DigestError;

/// Default chunk size for streaming reads (64 KiB)
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// One input to hash: a filesystem path, the process's standard input,
/// or an already-open byte stream.
pub enum Input {
    Path(PathBuf),
    Stdin,
    Reader(Box<dyn Read + Send>),
}

impl Input {
    /// Display label used in result rows ("-" for standard input)
    pub fn label(&self) -> String {
        match self {
            Input::Path(path) => path.display().to_string(),
            Input::Stdin => "-".to_string(),
            Input::Reader(_) => "<stream>".to_string(),
        }
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Input::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Input::Stdin => f.write_str("Stdin"),
            Input::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// Forward-only block reader over one input.
///
/// Chunks come out as `Bytes` so the fan-out engine can hand the same
/// buffer to every worker without copying. The final chunk may be shorter
/// than the block size; an empty input yields no chunks.
pub struct ChunkSource {
    reader: Box<dyn Read + Send>,
    block_size: usize,
    path: Option<PathBuf>,
    bytes_read: u64,
}

impl ChunkSource {
    /// Open an input for streaming with the given block size
    pub fn open(input: Input, block_size: usize) -> Result<Self, DigestError> {
        let (reader, path): (Box<dyn Read + Send>, Option<PathBuf>) = match input {
            Input::Path(p) => {
                let file = File::open(&p)
                    .map_err(|e| DigestError::from_io_error(e, "opening", Some(p.clone())))?;
                (Box::new(file), Some(p))
            }
            Input::Stdin => (Box::new(io::stdin()), None),
            Input::Reader(r) => (r, None),
        };
        Ok(Self {
            reader,
            block_size: block_size.max(1),
            path,
            bytes_read: 0,
        })
    }

    /// Read the next chunk; `Ok(None)` signals end of stream
    pub fn next_chunk(&mut self) -> Result<Option<Bytes>, DigestError> {
        let mut block = vec![0u8; self.block_size];
        let n = self
            .reader
            .read(&mut block)
            .map_err(|e| DigestError::from_io_error(e, "reading", self.path.clone()))?;
        if n == 0 {
            return Ok(None);
        }
        block.truncate(n);
        self.bytes_read += n as u64;
        Ok(Some(Bytes::from(block)))
    }

    /// Total bytes read so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}
