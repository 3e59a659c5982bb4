//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};
use crate::renderer::Backend;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("Vulkan initialization failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("Vulkan initialization failed"));
}

#[test]
fn test_out_of_memory_display() {
    let err = Error::OutOfMemory;
    let display = format!("{}", err);
    assert_eq!(display, "Out of GPU memory");
}

#[test]
fn test_no_suitable_memory_type_display() {
    let err = Error::NoSuitableMemoryType;
    let display = format!("{}", err);
    assert!(display.contains("memory type"));
}

#[test]
fn test_unsupported_backend_display() {
    let err = Error::UnsupportedBackend(Backend::None);
    let display = format!("{}", err);
    assert!(display.contains("Unsupported backend"));
    assert!(display.contains("None"));
}

#[test]
fn test_unsupported_display() {
    let err = Error::Unsupported("instanced drawing".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Not supported"));
    assert!(display.contains("instanced drawing"));
}

#[test]
fn test_size_exceeded_display() {
    let err = Error::SizeExceeded {
        requested: 256,
        capacity: 128,
    };
    let display = format!("{}", err);
    assert!(display.contains("256"));
    assert!(display.contains("128"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("Uniform buffer of size 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("Uniform buffer of size 0"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Window creation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("Window creation failed"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    // Verify Error implements std::error::Error trait
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let err1 = Error::BackendError("test".to_string());
    assert!(format!("{:?}", err1).contains("BackendError"));

    let err2 = Error::OutOfMemory;
    assert!(format!("{:?}", err2).contains("OutOfMemory"));

    let err3 = Error::UnsupportedBackend(Backend::OpenGl);
    assert!(format!("{:?}", err3).contains("UnsupportedBackend"));

    let err4 = Error::SizeExceeded {
        requested: 10,
        capacity: 5,
    };
    assert!(format!("{:?}", err4).contains("SizeExceeded"));
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::BackendError("test".to_string());
    assert_eq!(err1.clone(), err1);

    let err2 = Error::NoSuitableMemoryType;
    assert_eq!(err2.clone(), err2);

    let err3 = Error::SizeExceeded {
        requested: 64,
        capacity: 32,
    };
    assert_eq!(err3.clone(), err3);

    assert_ne!(err1, err2);
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_result_type_ok() {
    fn returns_ok() -> Result<i32> {
        Ok(42)
    }

    let result = returns_ok();
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn test_result_type_err() {
    fn returns_error() -> Result<i32> {
        Err(Error::OutOfMemory)
    }

    let result = returns_error();
    assert!(result.is_err());

    if let Err(e) = result {
        assert_eq!(format!("{}", e), "Out of GPU memory");
    }
}

// ============================================================================
// ERROR PROPAGATION TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::NoSuitableMemoryType)
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    let result = outer();
    assert_eq!(result, Err(Error::NoSuitableMemoryType));
}

// ============================================================================
// ERROR MACRO TESTS
// ============================================================================

#[test]
fn test_engine_err_macro_produces_backend_error() {
    let err = engine_err!("test", "buffer creation failed: {}", -3);
    assert_eq!(
        err,
        Error::BackendError("buffer creation failed: -3".to_string())
    );
}

#[test]
fn test_engine_bail_macro_returns_early() {
    fn bails() -> Result<i32> {
        engine_bail!("test", "unreachable device");
    }

    let result = bails();
    assert_eq!(
        result,
        Err(Error::BackendError("unreachable device".to_string()))
    );
}
