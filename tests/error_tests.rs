// Tests for the error module

use std::error::Error;
use std::io;
use std::path::PathBuf;

use hashmux::hash::DigestError;

#[test]
fn test_file_not_found_display() {
    let error = DigestError::FileNotFound {
        path: PathBuf::from("/path/to/file.txt"),
    };
    let message = format!("{}", error);
    assert!(message.contains("File not found"));
    assert!(message.contains("/path/to/file.txt"));
    assert!(message.contains("Suggestion"));
}

#[test]
fn test_unsupported_algorithm_display() {
    let error = DigestError::UnsupportedAlgorithm {
        algorithm: "invalid-algo".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("Unsupported hash algorithm"));
    assert!(message.contains("invalid-algo"));
    assert!(message.contains("--list"));
}

#[test]
fn test_duplicate_algorithm_display() {
    let error = DigestError::DuplicateAlgorithm {
        algorithm: "md5".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("more than once"));
    assert!(message.contains("md5"));
}

#[test]
fn test_no_algorithms_display() {
    let message = format!("{}", DigestError::NoAlgorithms);
    assert!(message.contains("No hash algorithms requested"));
    assert!(message.contains("--list"));
}

#[test]
fn test_io_error_display_with_path() {
    let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
    let error = DigestError::IoError {
        path: Some(PathBuf::from("input.bin")),
        operation: "reading".to_string(),
        source: io_err,
    };
    let message = format!("{}", error);
    assert!(message.contains("I/O error"));
    assert!(message.contains("reading"));
    assert!(message.contains("input.bin"));
    assert!(message.contains("disk full"));
}

#[test]
fn test_io_error_display_without_path() {
    let io_err = io::Error::new(io::ErrorKind::Other, "short read");
    let error = DigestError::IoError {
        path: None,
        operation: "reading from stdin".to_string(),
        source: io_err,
    };
    let message = format!("{}", error);
    assert!(message.contains("I/O error"));
    assert!(message.contains("reading from stdin"));
}

#[test]
fn test_worker_failure_display() {
    let error = DigestError::WorkerFailure {
        algorithm: "sha256".to_string(),
        detail: "digest worker panicked".to_string(),
    };
    let message = format!("{}", error);
    assert!(message.contains("sha256"));
    assert!(message.contains("panicked"));
    assert!(message.contains("bug"));
}

#[test]
fn test_from_io_error_maps_not_found() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
    let error = DigestError::from_io_error(io_err, "opening", Some(PathBuf::from("gone.txt")));
    assert!(matches!(error, DigestError::FileNotFound { .. }));
}

#[test]
fn test_from_io_error_maps_permission_denied() {
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "locked");
    let error = DigestError::from_io_error(io_err, "opening", Some(PathBuf::from("secret.txt")));
    match error {
        DigestError::PermissionDenied { path, operation } => {
            assert_eq!(path, PathBuf::from("secret.txt"));
            assert_eq!(operation, "opening");
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
}

#[test]
fn test_from_io_error_without_path_stays_generic() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
    let error = DigestError::from_io_error(io_err, "reading", None);
    assert!(matches!(error, DigestError::IoError { path: None, .. }));
}

#[test]
fn test_io_error_exposes_source() {
    let io_err = io::Error::new(io::ErrorKind::Other, "inner");
    let error = DigestError::IoError {
        path: None,
        operation: "reading".to_string(),
        source: io_err,
    };
    assert!(error.source().is_some());
    assert!(DigestError::NoAlgorithms.source().is_none());
}

#[test]
fn test_validation_classification() {
    assert!(DigestError::NoAlgorithms.is_validation());
    assert!(DigestError::UnsupportedAlgorithm {
        algorithm: "x".to_string()
    }
    .is_validation());
    assert!(DigestError::DuplicateAlgorithm {
        algorithm: "x".to_string()
    }
    .is_validation());
    assert!(DigestError::InvalidArguments {
        message: "x".to_string()
    }
    .is_validation());

    assert!(!DigestError::FileNotFound {
        path: PathBuf::from("x")
    }
    .is_validation());
    assert!(!DigestError::WorkerFailure {
        algorithm: "x".to_string(),
        detail: "y".to_string()
    }
    .is_validation());
}
