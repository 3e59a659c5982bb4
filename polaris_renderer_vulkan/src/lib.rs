/*!
# Polaris Engine - Vulkan Renderer Backend

Vulkan implementation of the Polaris rendering contract.

This crate implements the `RendererApi` trait and the GPU buffer resource
traits using the Ash library for Vulkan bindings. Memory is allocated
directly from the device: every buffer picks a memory type by filter and
property flags and binds one dedicated allocation.

The backend is registered as a plugin and selected at runtime through
`RenderDevice`.
*/

use std::sync::{Arc, Mutex};

use polaris_engine::polaris::render::{register_renderer_plugin, Backend, RendererApi};

// Vulkan implementation modules
mod vulkan_buffer;
mod vulkan_context;
mod vulkan_draw_queue;
mod vulkan_index_buffer;
mod vulkan_memory;
mod vulkan_renderer_api;
mod vulkan_uniform_buffer;
mod vulkan_vertex_buffer;

#[cfg(feature = "vulkan-validation")]
mod vulkan_debug;

pub use vulkan_buffer::DeviceBuffer;
pub use vulkan_context::GpuContext;
pub use vulkan_draw_queue::{DrawCommand, DrawQueue};
pub use vulkan_index_buffer::VulkanIndexBuffer;
pub use vulkan_renderer_api::{PendingViewport, VulkanRendererApi};
pub use vulkan_uniform_buffer::VulkanUniformBuffer;
pub use vulkan_vertex_buffer::VulkanVertexBuffer;

/// Register the Vulkan backend with the plugin system
///
/// Call once at startup, before creating a `RenderDevice` configured for
/// `Backend::Vulkan`.
///
/// # Example
///
/// ```no_run
/// use polaris_engine::polaris::render::{Backend, Config, RenderDevice};
/// # fn demo(window: &winit::window::Window) -> polaris_engine::polaris::Result<()> {
///
/// polaris_renderer_vulkan::register();
///
/// let config = Config { backend: Backend::Vulkan, ..Config::default() };
/// let device = RenderDevice::new(window, config)?;
/// # Ok(())
/// # }
/// ```
pub fn register() {
    register_renderer_plugin(Backend::Vulkan, |window, config| {
        let renderer = VulkanRendererApi::new(window, config)?;
        let api: Arc<Mutex<dyn RendererApi>> = Arc::new(Mutex::new(renderer));
        Ok(api)
    });
}
