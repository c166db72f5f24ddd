// Tests for the algorithm registry and accumulators

use hashmux::hash::{DigestError, HashRegistry};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_empty_input_known_digests() {
    let registry = HashRegistry::new();

    let md5 = registry.new_hasher("md5").unwrap();
    assert_eq!(hex::encode(md5.finalize()), "d41d8cd98f00b204e9800998ecf8427e");

    let sha1 = registry.new_hasher("sha1").unwrap();
    assert_eq!(
        hex::encode(sha1.finalize()),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );

    let sha256 = registry.new_hasher("sha256").unwrap();
    assert_eq!(
        hex::encode(sha256.finalize()),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_abc_known_digests() {
    let registry = HashRegistry::new();

    let mut sha256 = registry.new_hasher("sha256").unwrap();
    sha256.update(b"abc");
    assert_eq!(
        hex::encode(sha256.finalize()),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );

    let mut md5 = registry.new_hasher("md5").unwrap();
    md5.update(b"abc");
    assert_eq!(hex::encode(md5.finalize()), "900150983cd24fb0d6963f7d28e17f72");
}

#[test]
fn test_incremental_updates_match_one_shot() {
    let registry = HashRegistry::new();

    let mut incremental = registry.new_hasher("sha256").unwrap();
    incremental.update(b"hello ");
    incremental.update(b"world");

    let mut one_shot = registry.new_hasher("sha256").unwrap();
    one_shot.update(b"hello world");

    assert_eq!(incremental.finalize(), one_shot.finalize());
}

#[test]
fn test_output_sizes() {
    let registry = HashRegistry::new();
    assert_eq!(registry.new_hasher("md5").unwrap().output_size(), 16);
    assert_eq!(registry.new_hasher("sha1").unwrap().output_size(), 20);
    assert_eq!(registry.new_hasher("sha256").unwrap().output_size(), 32);
    assert_eq!(registry.new_hasher("sha3-512").unwrap().output_size(), 64);
    assert_eq!(registry.new_hasher("blake2b").unwrap().output_size(), 64);
    assert_eq!(registry.new_hasher("blake3").unwrap().output_size(), 32);
    assert_eq!(registry.new_hasher("xxh3").unwrap().output_size(), 8);
    assert_eq!(registry.new_hasher("xxh128").unwrap().output_size(), 16);
}

#[test]
fn test_digest_length_matches_output_size() {
    let registry = HashRegistry::new();
    for info in registry.algorithms() {
        let mut hasher = registry.new_hasher(&info.name).unwrap();
        hasher.update(b"sample data");
        let declared = hasher.output_size();
        let digest = hasher.finalize();
        assert_eq!(digest.len(), declared, "algorithm {}", info.name);
        assert_eq!(declared * 8, info.output_bits, "algorithm {}", info.name);
    }
}

#[test]
fn test_aliases_resolve_to_canonical_names() {
    let registry = HashRegistry::new();
    let canonical = registry
        .validate(&names(&["SHA-256", "sha3_512", "blake2b-512"]))
        .unwrap();
    assert_eq!(canonical, vec!["sha256", "sha3-512", "blake2b"]);
}

#[test]
fn test_validate_preserves_request_order() {
    let registry = HashRegistry::new();
    let canonical = registry.validate(&names(&["sha512", "md5", "blake3"])).unwrap();
    assert_eq!(canonical, vec!["sha512", "md5", "blake3"]);
}

#[test]
fn test_unknown_algorithm_rejected() {
    let registry = HashRegistry::new();
    let result = registry.validate(&names(&["md5", "crc32"]));
    match result {
        Err(DigestError::UnsupportedAlgorithm { algorithm }) => assert_eq!(algorithm, "crc32"),
        other => panic!("expected UnsupportedAlgorithm, got {:?}", other),
    }
}

#[test]
fn test_empty_request_rejected() {
    let registry = HashRegistry::new();
    assert!(matches!(
        registry.validate(&[]),
        Err(DigestError::NoAlgorithms)
    ));
}

#[test]
fn test_duplicate_request_rejected() {
    let registry = HashRegistry::new();
    let result = registry.validate(&names(&["md5", "sha1", "md5"]));
    match result {
        Err(DigestError::DuplicateAlgorithm { algorithm }) => assert_eq!(algorithm, "md5"),
        other => panic!("expected DuplicateAlgorithm, got {:?}", other),
    }
}

#[test]
fn test_duplicate_via_alias_rejected() {
    // An alias and its canonical name are the same algorithm
    let registry = HashRegistry::new();
    assert!(matches!(
        registry.validate(&names(&["sha256", "sha-256"])),
        Err(DigestError::DuplicateAlgorithm { .. })
    ));
}

#[test]
fn test_registry_order_is_stable() {
    let registry = HashRegistry::new();
    let listed = registry.names();
    assert_eq!(listed.first(), Some(&"md5"));
    assert!(listed.contains(&"sha3-256"));
    assert_eq!(listed.len(), registry.algorithms().len());
    // xxh entries are flagged non-cryptographic
    for info in registry.algorithms() {
        assert_eq!(info.cryptographic, !info.name.starts_with("xxh"), "{}", info.name);
    }
}
