/// RendererApi trait - polymorphic rendering backend contract
///
/// One trait object per process talks to the GPU. Backends (Vulkan, OpenGL)
/// implement this contract in their own crates and register a factory in the
/// plugin registry; `RenderDevice` resolves the configured backend once at
/// startup.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use glam::Vec4;
use winit::window::Window;

use crate::error::Result;
use crate::renderer::{IndexBuffer, UniformBuffer, VertexArray, VertexBuffer};

// ============================================================================
// Backend selection and configuration
// ============================================================================

/// Rendering backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Headless placeholder, never a valid device backend
    None,
    /// OpenGL backend
    OpenGl,
    /// Vulkan backend
    Vulkan,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::None => write!(f, "None"),
            Backend::OpenGl => write!(f, "OpenGL"),
            Backend::Vulkan => write!(f, "Vulkan"),
        }
    }
}

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Which backend to resolve
    pub backend: Backend,
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Vulkan,
            enable_validation: cfg!(debug_assertions),
            app_name: "Polaris Application".to_string(),
            app_version: (1, 0, 0),
        }
    }
}

// ============================================================================
// RendererApi trait
// ============================================================================

/// Rendering backend contract
///
/// Implemented by backend-specific renderers (VulkanRendererApi,
/// GlRendererApi). All state-setting operations take `&mut self`; the device
/// wraps the backend in `Arc<Mutex<..>>` so threads share it safely.
pub trait RendererApi: Send + Sync {
    /// Initialize backend state that must wait until after construction
    ///
    /// Called exactly once by `RenderDevice` before any other operation.
    fn init(&mut self) -> Result<()>;

    /// Set the active viewport rectangle in pixels
    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()>;

    /// Set the color used by subsequent `clear` calls (RGBA, 0.0..=1.0)
    fn set_clear_color(&mut self, color: Vec4) -> Result<()>;

    /// Clear the active render target with the current clear color
    fn clear(&mut self) -> Result<()>;

    /// Draw indexed geometry from a vertex array
    ///
    /// # Arguments
    ///
    /// * `vertex_array` - Geometry to draw (vertex buffers + index buffer)
    /// * `index_count` - Number of indices to draw; 0 means the full index
    ///   buffer of `vertex_array`
    fn draw_indexed(&mut self, vertex_array: &Arc<VertexArray>, index_count: u32) -> Result<()>;

    /// Draw indexed geometry `instance_count` times
    ///
    /// Backends that have no instancing path reject this with
    /// [`Error::Unsupported`](crate::polaris::Error::Unsupported).
    fn draw_indexed_instanced(
        &mut self,
        vertex_array: &Arc<VertexArray>,
        index_count: u32,
        instance_count: u32,
    ) -> Result<()>;

    // ===== RESOURCE CREATION =====

    /// Create an uninitialized vertex buffer of `size` bytes
    fn create_vertex_buffer(&mut self, size: u64) -> Result<Arc<dyn VertexBuffer>>;

    /// Create a vertex buffer initialized with `data`
    fn create_vertex_buffer_with_data(&mut self, data: &[u8]) -> Result<Arc<dyn VertexBuffer>>;

    /// Create an index buffer initialized with `indices`
    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>>;

    /// Create a uniform buffer of `size` bytes
    ///
    /// `size` must be non-zero; uniform buffers stay persistently mapped for
    /// their whole lifetime.
    fn create_uniform_buffer(&mut self, size: u64) -> Result<Arc<dyn UniformBuffer>>;
}

// ============================================================================
// Plugin system for registering renderer backends
// ============================================================================

/// Renderer plugin factory function type
type RendererPluginFactory =
    Box<dyn Fn(&Window, Config) -> Result<Arc<Mutex<dyn RendererApi>>> + Send + Sync>;

/// Plugin registry for renderer backends
pub struct RendererPluginRegistry {
    plugins: HashMap<Backend, RendererPluginFactory>,
}

impl RendererPluginRegistry {
    /// Create a new plugin registry
    fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a plugin for a backend
    pub fn register_plugin<F>(&mut self, backend: Backend, factory: F)
    where
        F: Fn(&Window, Config) -> Result<Arc<Mutex<dyn RendererApi>>> + Send + Sync + 'static,
    {
        self.plugins.insert(backend, Box::new(factory));
    }

    /// Whether a factory is registered for `backend`
    pub fn has_plugin(&self, backend: Backend) -> bool {
        self.plugins.contains_key(&backend)
    }

    /// Create a renderer using a registered plugin
    ///
    /// # Returns
    ///
    /// A shared, thread-safe renderer instance
    pub fn create_renderer(
        &self,
        backend: Backend,
        window: &Window,
        config: Config,
    ) -> Result<Arc<Mutex<dyn RendererApi>>> {
        self.plugins
            .get(&backend)
            .ok_or(crate::error::Error::UnsupportedBackend(backend))?(window, config)
    }
}

static RENDERER_REGISTRY: Mutex<Option<RendererPluginRegistry>> = Mutex::new(None);

/// Get the global renderer plugin registry
pub fn renderer_plugin_registry() -> &'static Mutex<Option<RendererPluginRegistry>> {
    // Initialize on first access
    let mut registry = RENDERER_REGISTRY.lock().unwrap();
    if registry.is_none() {
        *registry = Some(RendererPluginRegistry::new());
    }
    drop(registry);
    &RENDERER_REGISTRY
}

/// Register a renderer plugin in the global registry
///
/// # Example
///
/// ```no_run
/// use polaris_engine::polaris::render::{register_renderer_plugin, Backend};
///
/// register_renderer_plugin(Backend::Vulkan, |window, config| {
///     // construct and return the backend...
///     # unimplemented!()
/// });
/// ```
pub fn register_renderer_plugin<F>(backend: Backend, factory: F)
where
    F: Fn(&Window, Config) -> Result<Arc<Mutex<dyn RendererApi>>> + Send + Sync + 'static,
{
    renderer_plugin_registry()
        .lock()
        .unwrap()
        .as_mut()
        .unwrap()
        .register_plugin(backend, factory);
}
