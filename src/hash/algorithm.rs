// Digest accumulator and algorithm registry module
// One incremental hasher per algorithm behind a common trait

use serde::Serialize;

use super::error::DigestError;

/// Trait for incremental digest accumulators.
///
/// `finalize` consumes the accumulator, so finalizing twice or updating
/// after finalize does not typecheck.
pub trait Hasher: Send {
    /// Update the hasher with the next chunk of data
    fn update(&mut self, data: &[u8]);

    /// Consume the hasher and return the digest bytes
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Digest length in bytes
    fn output_size(&self) -> usize;
}

/// Information about a supported algorithm
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub output_bits: usize,
    pub cryptographic: bool,
}

use blake2::{Blake2b512, Blake2s256};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use xxhash_rust::xxh3::Xxh3;

/// Adapter for any hash in the RustCrypto `Digest` family
struct CryptoHasher<D: Digest + Send>(D);

impl<D: Digest + Send> Hasher for CryptoHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        Digest::finalize(self.0).to_vec()
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }
}

// BLAKE3 ships its own hasher type outside the Digest family
struct Blake3Hasher(blake3::Hasher);

impl Hasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().as_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        32
    }
}

// XXH3 64-bit (non-cryptographic)
struct Xxh3Hasher(Xxh3);

impl Hasher for Xxh3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        // Big-endian bytes so the hex rendering matches xxhsum output
        self.0.digest().to_be_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        8
    }
}

// XXH3 128-bit (non-cryptographic)
struct Xxh128Hasher(Xxh3);

impl Hasher for Xxh128Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.digest128().to_be_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        16
    }
}

type HasherFactory = fn() -> Box<dyn Hasher>;

fn new_crypto<D: Digest + Send + 'static>() -> Box<dyn Hasher> {
    Box::new(CryptoHasher(D::new()))
}

fn new_blake3() -> Box<dyn Hasher> {
    Box::new(Blake3Hasher(blake3::Hasher::new()))
}

fn new_xxh3() -> Box<dyn Hasher> {
    Box::new(Xxh3Hasher(Xxh3::new()))
}

fn new_xxh128() -> Box<dyn Hasher> {
    Box::new(Xxh128Hasher(Xxh3::new()))
}

struct AlgorithmEntry {
    name: &'static str,
    aliases: &'static [&'static str],
    output_bits: usize,
    cryptographic: bool,
    factory: HasherFactory,
}

/// Registry of supported algorithms in canonical order.
///
/// Constructed once and passed by reference into the engines; no ambient
/// global state.
pub struct HashRegistry {
    entries: Vec<AlgorithmEntry>,
}

impl HashRegistry {
    pub fn new() -> Self {
        let entries = vec![
            AlgorithmEntry {
                name: "md5",
                aliases: &[],
                output_bits: 128,
                cryptographic: true,
                factory: new_crypto::<Md5>,
            },
            AlgorithmEntry {
                name: "sha1",
                aliases: &["sha-1"],
                output_bits: 160,
                cryptographic: true,
                factory: new_crypto::<Sha1>,
            },
            AlgorithmEntry {
                name: "sha224",
                aliases: &["sha-224"],
                output_bits: 224,
                cryptographic: true,
                factory: new_crypto::<Sha224>,
            },
            AlgorithmEntry {
                name: "sha256",
                aliases: &["sha-256"],
                output_bits: 256,
                cryptographic: true,
                factory: new_crypto::<Sha256>,
            },
            AlgorithmEntry {
                name: "sha384",
                aliases: &["sha-384"],
                output_bits: 384,
                cryptographic: true,
                factory: new_crypto::<Sha384>,
            },
            AlgorithmEntry {
                name: "sha512",
                aliases: &["sha-512"],
                output_bits: 512,
                cryptographic: true,
                factory: new_crypto::<Sha512>,
            },
            AlgorithmEntry {
                name: "sha3-224",
                aliases: &["sha3_224"],
                output_bits: 224,
                cryptographic: true,
                factory: new_crypto::<Sha3_224>,
            },
            AlgorithmEntry {
                name: "sha3-256",
                aliases: &["sha3_256"],
                output_bits: 256,
                cryptographic: true,
                factory: new_crypto::<Sha3_256>,
            },
            AlgorithmEntry {
                name: "sha3-384",
                aliases: &["sha3_384"],
                output_bits: 384,
                cryptographic: true,
                factory: new_crypto::<Sha3_384>,
            },
            AlgorithmEntry {
                name: "sha3-512",
                aliases: &["sha3_512"],
                output_bits: 512,
                cryptographic: true,
                factory: new_crypto::<Sha3_512>,
            },
            AlgorithmEntry {
                name: "blake2b",
                aliases: &["blake2b-512"],
                output_bits: 512,
                cryptographic: true,
                factory: new_crypto::<Blake2b512>,
            },
            AlgorithmEntry {
                name: "blake2s",
                aliases: &["blake2s-256"],
                output_bits: 256,
                cryptographic: true,
                factory: new_crypto::<Blake2s256>,
            },
            AlgorithmEntry {
                name: "blake3",
                aliases: &[],
                output_bits: 256,
                cryptographic: true,
                factory: new_blake3,
            },
            AlgorithmEntry {
                name: "xxh3",
                aliases: &["xxh3-64"],
                output_bits: 64,
                cryptographic: false,
                factory: new_xxh3,
            },
            AlgorithmEntry {
                name: "xxh128",
                aliases: &["xxh3-128"],
                output_bits: 128,
                cryptographic: false,
                factory: new_xxh128,
            },
        ];
        Self { entries }
    }

    fn find(&self, name: &str) -> Option<&AlgorithmEntry> {
        let lower = name.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name == lower || e.aliases.contains(&lower.as_str()))
    }

    /// Metadata for every supported algorithm, in canonical order
    pub fn algorithms(&self) -> Vec<AlgorithmInfo> {
        self.entries
            .iter()
            .map(|e| AlgorithmInfo {
                name: e.name.to_string(),
                output_bits: e.output_bits,
                cryptographic: e.cryptographic,
            })
            .collect()
    }

    /// Canonical algorithm names, in registry order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Canonicalize a requested algorithm list.
    ///
    /// Rejects an empty list, unknown names and duplicates (after alias
    /// resolution). The returned names keep the caller's order.
    pub fn validate(&self, names: &[String]) -> Result<Vec<String>, DigestError> {
        if names.is_empty() {
            return Err(DigestError::NoAlgorithms);
        }
        let mut canonical: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let entry = self.find(name).ok_or_else(|| DigestError::UnsupportedAlgorithm {
                algorithm: name.clone(),
            })?;
            if canonical.iter().any(|c| c == entry.name) {
                return Err(DigestError::DuplicateAlgorithm {
                    algorithm: entry.name.to_string(),
                });
            }
            canonical.push(entry.name.to_string());
        }
        Ok(canonical)
    }

    /// Construct a fresh, zero-state accumulator for the given algorithm
    pub fn new_hasher(&self, name: &str) -> Result<Box<dyn Hasher>, DigestError> {
        let entry = self.find(name).ok_or_else(|| DigestError::UnsupportedAlgorithm {
            algorithm: name.to_string(),
        })?;
        Ok((entry.factory)())
    }
}

impl Default for HashRegistry {
    fn default() -> Self {
        Self::new()
    }
}
