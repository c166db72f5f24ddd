// Fan-out coordinator module
// Reads one input once and drives every digest worker over identical chunks

use std::thread;

use bytes::Bytes;
use crossbeam_channel::{bounded, Receiver};

use super::algorithm::{HashRegistry, Hasher};
use super::error::DigestError;
use super::source::{ChunkSource, Input, DEFAULT_BLOCK_SIZE};

/// Default per-worker queue depth.
/// Peak memory is bounded by depth x block size x worker count.
pub const DEFAULT_QUEUE_DEPTH: usize = 4;

/// What the reader feeds each worker queue.
/// `Finish` and `Abort` are distinct so a read failure never finalizes
/// partial state.
enum Feed {
    Chunk(Bytes),
    Finish,
    Abort,
}

/// Single-pass multi-digest engine: one reader, one worker thread per
/// requested algorithm, bounded queues in between.
///
/// The reader blocks when the slowest worker's queue is full, so the whole
/// job advances at the rate of the slowest algorithm and memory stays
/// bounded regardless of input size.
pub struct FanOutEngine<'a> {
    registry: &'a HashRegistry,
    queue_depth: usize,
    block_size: usize,
    progress: Option<Box<dyn Fn(u64) + Send + Sync>>,
}

impl<'a> FanOutEngine<'a> {
    pub fn new(registry: &'a HashRegistry) -> Self {
        Self {
            registry,
            queue_depth: DEFAULT_QUEUE_DEPTH,
            block_size: DEFAULT_BLOCK_SIZE,
            progress: None,
        }
    }

    /// Set the per-worker queue depth (minimum 1)
    pub fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth.max(1);
        self
    }

    /// Set the chunk size for streaming reads (minimum 1)
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Set a callback invoked with cumulative bytes read as chunks stream
    pub fn with_progress_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Validate the requested algorithms, then hash one input.
    ///
    /// Validation happens before the input is opened, so a bad request
    /// performs no I/O. Digests come back in request order.
    pub fn hash_input(&self, names: &[String], input: Input) -> Result<Vec<Vec<u8>>, DigestError> {
        let canonical = self.registry.validate(names)?;
        let mut source = ChunkSource::open(input, self.block_size)?;
        self.run(&canonical, &mut source)
    }

    /// Core single-pass fan-out over an already-open source.
    ///
    /// `names` must be a validated, duplicate-free algorithm list. Every
    /// chunk is broadcast to every worker in read order; on end of stream
    /// each worker finalizes and the digests are collected in `names`
    /// order. On a read failure every worker is unblocked with an abort
    /// sentinel, partial state is discarded and the read error surfaces.
    pub fn run(
        &self,
        names: &[String],
        source: &mut ChunkSource,
    ) -> Result<Vec<Vec<u8>>, DigestError> {
        debug_assert!(!names.is_empty());

        // Fresh accumulator per algorithm, request order preserved
        let mut hashers: Vec<(String, Box<dyn Hasher>)> = Vec::with_capacity(names.len());
        for name in names {
            hashers.push((name.clone(), self.registry.new_hasher(name)?));
        }

        let mut read_error: Option<DigestError> = None;

        let joined: Vec<(String, thread::Result<Option<Vec<u8>>>)> = thread::scope(|scope| {
            let mut senders = Vec::with_capacity(hashers.len());
            let mut handles = Vec::with_capacity(hashers.len());
            for (name, hasher) in hashers.drain(..) {
                let (tx, rx) = bounded::<Feed>(self.queue_depth);
                senders.push(tx);
                handles.push((name, scope.spawn(move || drain_feed(hasher, rx))));
            }

            // Reader loop: the sole consumer of the source. A full queue
            // blocks the send until the worker catches up (backpressure).
            loop {
                match source.next_chunk() {
                    Ok(Some(chunk)) => {
                        let mut lost_worker = false;
                        for tx in &senders {
                            // Bytes clone shares the buffer, no copy
                            if tx.send(Feed::Chunk(chunk.clone())).is_err() {
                                lost_worker = true;
                            }
                        }
                        if let Some(callback) = &self.progress {
                            callback(source.bytes_read());
                        }
                        if lost_worker {
                            // A worker died mid-stream; stop reading and
                            // unblock the survivors
                            for tx in &senders {
                                let _ = tx.send(Feed::Abort);
                            }
                            break;
                        }
                    }
                    Ok(None) => {
                        for tx in &senders {
                            let _ = tx.send(Feed::Finish);
                        }
                        break;
                    }
                    Err(e) => {
                        for tx in &senders {
                            let _ = tx.send(Feed::Abort);
                        }
                        read_error = Some(e);
                        break;
                    }
                }
            }
            drop(senders);

            handles
                .into_iter()
                .map(|(name, handle)| (name, handle.join()))
                .collect()
        });

        if let Some(e) = read_error {
            return Err(e);
        }

        // A panicked worker is the root fault; siblings that saw the abort
        // sentinel are collateral
        if let Some((name, _)) = joined.iter().find(|(_, outcome)| outcome.is_err()) {
            return Err(DigestError::WorkerFailure {
                algorithm: name.clone(),
                detail: "digest worker panicked".to_string(),
            });
        }

        let mut digests = Vec::with_capacity(joined.len());
        for (name, outcome) in joined {
            match outcome {
                Ok(Some(digest)) => digests.push(digest),
                Ok(None) => {
                    return Err(DigestError::WorkerFailure {
                        algorithm: name,
                        detail: "worker terminated without a digest".to_string(),
                    })
                }
                Err(_) => unreachable!("panics handled above"),
            }
        }
        Ok(digests)
    }
}

/// Worker loop: apply chunks in arrival order, finalize on the end-of-stream
/// sentinel, drop everything on abort.
fn drain_feed(mut hasher: Box<dyn Hasher>, feed: Receiver<Feed>) -> Option<Vec<u8>> {
    loop {
        match feed.recv() {
            Ok(Feed::Chunk(data)) => hasher.update(&data),
            Ok(Feed::Finish) => return Some(hasher.finalize()),
            Ok(Feed::Abort) | Err(_) => return None,
        }
    }
}
