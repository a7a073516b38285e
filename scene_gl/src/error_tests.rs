//! Unit tests for error.rs
//!
//! Tests all Error variants and the bail/err macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_argument_display() {
    let err = Error::InvalidArgument("vertex colours length mismatch".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid argument"));
    assert!(display.contains("vertex colours length mismatch"));
}

#[test]
fn test_resource_creation_failure_display() {
    let err = Error::ResourceCreationFailure("frame buffer incomplete".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Resource creation failed"));
    assert!(display.contains("frame buffer incomplete"));
}

#[test]
fn test_release_failed_display() {
    let err = Error::ReleaseFailed("glDeleteTextures".to_string());
    assert_eq!(format!("{}", err), "Release failed: glDeleteTextures");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidArgument("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    let debug = format!("{:?}", Error::ResourceCreationFailure("x".to_string()));
    assert!(debug.contains("ResourceCreationFailure"));
}

#[test]
fn test_error_clone_eq() {
    let err = Error::InvalidArgument("same".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::ReleaseFailed("same".to_string()));
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_when_negative(value: i32) -> Result<i32> {
    if value < 0 {
        crate::scenegl_bail!("scenegl::tests", InvalidArgument, "negative value {}", value);
    }
    Ok(value)
}

#[test]
fn test_bail_returns_error_of_requested_kind() {
    assert_eq!(bail_when_negative(3), Ok(3));
    match bail_when_negative(-2) {
        Err(Error::InvalidArgument(msg)) => assert_eq!(msg, "negative value -2"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_err_builds_error_without_returning() {
    let err = crate::scenegl_err!("scenegl::tests", ResourceCreationFailure, "status {:#x}", 0x8cd6);
    assert_eq!(err, Error::ResourceCreationFailure("status 0x8cd6".to_string()));
}
