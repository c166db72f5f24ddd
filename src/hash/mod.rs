// Digest engine library
// Chunk sourcing, algorithm registry, fan-out coordination and batching

pub mod algorithm;
pub mod batch;
pub mod error;
pub mod fanout;
pub mod source;

// Re-export commonly used types for convenience
pub use algorithm::{AlgorithmInfo, HashRegistry, Hasher};
pub use batch::{BatchHasher, BatchRun, DigestRow, HashProgress, ProgressCallback};
pub use error::DigestError;
pub use fanout::{FanOutEngine, DEFAULT_QUEUE_DEPTH};
pub use source::{ChunkSource, Input, DEFAULT_BLOCK_SIZE};
