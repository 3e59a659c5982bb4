/// RenderDevice - backend resolution and resource factory
///
/// The device is created once at startup from an explicit `Config`, resolves
/// the configured backend through the plugin registry, and from then on is
/// the single entry point for creating GPU buffer resources.

use std::sync::{Arc, Mutex};

use winit::window::Window;

use crate::error::{Error, Result};
use crate::renderer::{
    renderer_plugin_registry, Backend, Config, IndexBuffer, RendererApi, UniformBuffer,
    VertexBuffer,
};

const SOURCE: &str = "polaris::RenderDevice";

/// Resolved rendering backend plus the resource factory API
///
/// # Example
///
/// ```no_run
/// use polaris_engine::polaris::render::{Backend, Config, RenderDevice};
/// # fn demo(window: &winit::window::Window) -> polaris_engine::polaris::Result<()> {
///
/// let config = Config { backend: Backend::Vulkan, ..Config::default() };
/// let device = RenderDevice::new(window, config)?;
/// let vertices = device.create_vertex_buffer_with_data(&[0u8; 48])?;
/// # Ok(())
/// # }
/// ```
pub struct RenderDevice {
    backend: Backend,
    api: Arc<Mutex<dyn RendererApi>>,
}

impl RenderDevice {
    /// Resolve the configured backend through the plugin registry
    ///
    /// The backend factory constructs the renderer against `window`, then
    /// `init` runs before the device is handed to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBackend`] for `Backend::None` or a backend
    /// with no registered plugin, and propagates backend construction and
    /// init failures.
    pub fn new(window: &Window, config: Config) -> Result<Self> {
        let backend = config.backend;
        if backend == Backend::None {
            crate::engine_error!(SOURCE, "Backend::None cannot create a render device");
            return Err(Error::UnsupportedBackend(Backend::None));
        }

        let registry = renderer_plugin_registry().lock().unwrap();
        let api = registry
            .as_ref()
            .expect("renderer plugin registry initialized on first access")
            .create_renderer(backend, window, config)?;
        drop(registry);

        api.lock().unwrap().init()?;
        crate::engine_info!(SOURCE, "Resolved {} backend", backend);

        Ok(Self { backend, api })
    }

    /// Wrap an externally constructed backend
    ///
    /// Used when the platform layer owns backend construction, e.g. an
    /// OpenGL context created alongside the window. `init` runs here the
    /// same as in [`RenderDevice::new`].
    pub fn from_api(backend: Backend, api: Arc<Mutex<dyn RendererApi>>) -> Result<Self> {
        if backend == Backend::None {
            crate::engine_error!(SOURCE, "Backend::None cannot create a render device");
            return Err(Error::UnsupportedBackend(Backend::None));
        }

        api.lock().unwrap().init()?;
        crate::engine_info!(SOURCE, "Resolved {} backend", backend);

        Ok(Self { backend, api })
    }

    /// The backend this device resolved to
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Shared handle to the backend API
    pub fn api(&self) -> Arc<Mutex<dyn RendererApi>> {
        Arc::clone(&self.api)
    }

    // ===== RESOURCE FACTORY =====

    /// Create an uninitialized vertex buffer of `size` bytes
    pub fn create_vertex_buffer(&self, size: u64) -> Result<Arc<dyn VertexBuffer>> {
        self.api.lock().unwrap().create_vertex_buffer(size)
    }

    /// Create a vertex buffer initialized with `data`
    pub fn create_vertex_buffer_with_data(&self, data: &[u8]) -> Result<Arc<dyn VertexBuffer>> {
        self.api.lock().unwrap().create_vertex_buffer_with_data(data)
    }

    /// Create an index buffer initialized with `indices`
    pub fn create_index_buffer(&self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        self.api.lock().unwrap().create_index_buffer(indices)
    }

    /// Create a uniform buffer of `size` bytes
    pub fn create_uniform_buffer(&self, size: u64) -> Result<Arc<dyn UniformBuffer>> {
        self.api.lock().unwrap().create_uniform_buffer(size)
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
