//! Unit tests for RenderDevice
//!
//! Registry resolution needs a winit Window, which unit tests cannot create,
//! so these tests go through `RenderDevice::from_api` with the mock backend.

use std::sync::{Arc, Mutex};

use crate::error::Error;
use crate::renderer::mock_renderer::MockRendererApi;
use crate::renderer::{Backend, RenderDevice, RendererApi};

fn mock_api() -> Arc<Mutex<dyn RendererApi>> {
    Arc::new(Mutex::new(MockRendererApi::new()))
}

// ============================================================================
// BACKEND RESOLUTION
// ============================================================================

#[test]
fn test_from_api_runs_init() {
    let api = Arc::new(Mutex::new(MockRendererApi::new()));
    let device = RenderDevice::from_api(Backend::Vulkan, api.clone()).unwrap();

    assert_eq!(device.backend(), Backend::Vulkan);
    assert!(api.lock().unwrap().initialized);
}

#[test]
fn test_from_api_rejects_backend_none() {
    let result = RenderDevice::from_api(Backend::None, mock_api());
    assert!(matches!(
        result,
        Err(Error::UnsupportedBackend(Backend::None))
    ));
}

#[test]
fn test_from_api_propagates_init_failure() {
    let mut failing = MockRendererApi::new();
    failing.fail_init = true;
    let api: Arc<Mutex<dyn RendererApi>> = Arc::new(Mutex::new(failing));

    let result = RenderDevice::from_api(Backend::OpenGl, api);
    assert!(matches!(result, Err(Error::InitializationFailed(_))));
}

#[test]
fn test_api_returns_shared_handle() {
    let api = Arc::new(Mutex::new(MockRendererApi::new()));
    let device = RenderDevice::from_api(Backend::Vulkan, api.clone()).unwrap();

    let handle = device.api();
    handle.lock().unwrap().clear().unwrap();

    // Same backend instance behind both handles
    assert!(api.lock().unwrap().commands.contains(&"clear".to_string()));
}

// ============================================================================
// RESOURCE FACTORY FORWARDING
// ============================================================================

#[test]
fn test_device_forwards_buffer_creation() {
    let api = Arc::new(Mutex::new(MockRendererApi::new()));
    let device = RenderDevice::from_api(Backend::Vulkan, api.clone()).unwrap();

    let vb = device.create_vertex_buffer(64).unwrap();
    assert_eq!(vb.size(), 64);

    let vb2 = device.create_vertex_buffer_with_data(&[1, 2, 3, 4]).unwrap();
    assert_eq!(vb2.size(), 4);

    let ib = device.create_index_buffer(&[0, 1, 2]).unwrap();
    assert_eq!(ib.count(), 3);

    let ub = device.create_uniform_buffer(128).unwrap();
    assert_eq!(ub.size(), 128);

    let commands = &api.lock().unwrap().commands;
    assert!(commands.contains(&"create_vertex_buffer(64)".to_string()));
    assert!(commands.contains(&"create_vertex_buffer_with_data(4)".to_string()));
    assert!(commands.contains(&"create_index_buffer(3)".to_string()));
    assert!(commands.contains(&"create_uniform_buffer(128)".to_string()));
}

#[test]
fn test_device_propagates_factory_errors() {
    let device = RenderDevice::from_api(Backend::Vulkan, mock_api()).unwrap();
    let result = device.create_uniform_buffer(0);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}
