//! Unit tests for error.rs
//!
//! Tests the Error variants, their Display output, and the engine_err!/engine_bail! macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("shader link failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("shader link failed"));
}

#[test]
fn test_out_of_memory_display() {
    let err = Error::OutOfMemory;
    assert_eq!(format!("{}", err), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("index 9 out of range".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("index 9"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Window creation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("Window creation failed"));
}

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
fn test_engine_err_defaults_to_backend_error() {
    let err = engine_err!("sge::error_test", "code {}", 3);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "code 3"),
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
fn test_engine_err_with_variant() {
    let err = engine_err!(InvalidResource, "sge::error_test", "bad key {}", "k1");
    match err {
        Error::InvalidResource(msg) => assert_eq!(msg, "bad key k1"),
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            engine_bail!(InitializationFailed, "sge::error_test", "flag was {}", flag);
        }
        Ok(7)
    }

    assert_eq!(fails(false).unwrap(), 7);
    assert!(matches!(fails(true), Err(Error::InitializationFailed(_))));
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::OutOfMemory)
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}
