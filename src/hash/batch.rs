// Multi-input sequencer module
// Runs one fan-out pass per input and yields result rows lazily

use std::sync::Arc;
use std::vec;

use serde::Serialize;

use super::algorithm::HashRegistry;
use super::error::DigestError;
use super::fanout::{FanOutEngine, DEFAULT_QUEUE_DEPTH};
use super::source::{ChunkSource, Input, DEFAULT_BLOCK_SIZE};

/// Progress information forwarded while an input streams
#[derive(Debug, Clone, Serialize)]
pub struct HashProgress {
    pub label: String,
    pub bytes_processed: u64,
}

/// Type alias for progress callback function
pub type ProgressCallback = Box<dyn Fn(HashProgress) + Send + Sync>;

/// One result row: the input's label plus its digests in job order
#[derive(Debug, Clone, Serialize)]
pub struct DigestRow {
    pub label: String,
    #[serde(serialize_with = "serialize_hex_digests")]
    pub digests: Vec<Vec<u8>>,
}

// Helper function to serialize digests as hex strings
fn serialize_hex_digests<S>(digests: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(digests.iter().map(hex::encode))
}

/// Sequencer over a list of inputs with one validated algorithm set.
///
/// Each input gets fresh accumulators and one single-pass fan-out run.
/// A per-input I/O failure yields that input's error row and the batch
/// continues with the remaining inputs.
pub struct BatchHasher<'a> {
    registry: &'a HashRegistry,
    algorithms: Vec<String>,
    block_size: usize,
    queue_depth: usize,
    progress_callback: Option<Arc<ProgressCallback>>,
}

impl<'a> BatchHasher<'a> {
    /// Validate the requested algorithms and build a sequencer.
    ///
    /// Fails before any input is opened on an empty, unknown or duplicate
    /// request.
    pub fn new(registry: &'a HashRegistry, names: &[String]) -> Result<Self, DigestError> {
        let algorithms = registry.validate(names)?;
        Ok(Self {
            registry,
            algorithms,
            block_size: DEFAULT_BLOCK_SIZE,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            progress_callback: None,
        })
    }

    /// Set the chunk size for streaming reads
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Set the per-worker queue depth
    pub fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth.max(1);
        self
    }

    /// Set a progress callback function
    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(HashProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Canonical algorithm names for this job, in request order
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Header row: "filename" followed by the algorithm names
    pub fn header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.algorithms.len() + 1);
        header.push("filename".to_string());
        header.extend(self.algorithms.iter().cloned());
        header
    }

    /// Start a lazy run over the given inputs.
    ///
    /// Standard input may appear at most once (a second read would find it
    /// exhausted).
    pub fn run(&self, inputs: Vec<Input>) -> Result<BatchRun<'_>, DigestError> {
        let stdin_inputs = inputs.iter().filter(|i| matches!(i, Input::Stdin)).count();
        if stdin_inputs > 1 {
            return Err(DigestError::InvalidArguments {
                message: "standard input may be used at most once per run".to_string(),
            });
        }
        Ok(BatchRun {
            batch: self,
            inputs: inputs.into_iter(),
        })
    }

    /// Single-input convenience: digests only, label omitted
    pub fn hash_single(&self, input: Input) -> Result<Vec<Vec<u8>>, DigestError> {
        self.hash_one(input).map(|row| row.digests)
    }

    fn hash_one(&self, input: Input) -> Result<DigestRow, DigestError> {
        let label = input.label();
        let mut engine = FanOutEngine::new(self.registry)
            .with_queue_depth(self.queue_depth)
            .with_block_size(self.block_size);
        if let Some(callback) = &self.progress_callback {
            let callback = Arc::clone(callback);
            let progress_label = label.clone();
            engine = engine.with_progress_callback(move |bytes| {
                callback(HashProgress {
                    label: progress_label.clone(),
                    bytes_processed: bytes,
                })
            });
        }
        let mut source = ChunkSource::open(input, self.block_size)?;
        let digests = engine.run(&self.algorithms, &mut source)?;
        Ok(DigestRow { label, digests })
    }
}

/// Lazy iterator over one batch: computes a row per `next` call, never
/// materializing the full result set.
pub struct BatchRun<'a> {
    batch: &'a BatchHasher<'a>,
    inputs: vec::IntoIter<Input>,
}

impl Iterator for BatchRun<'_> {
    type Item = Result<DigestRow, DigestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let input = self.inputs.next()?;
        Some(self.batch.hash_one(input))
    }
}
