/*!
# Polaris Engine - OpenGL Renderer Backend

OpenGL implementation of the Polaris rendering contract, built on the glow
bindings.

Unlike the Vulkan backend, OpenGL has no plugin registration: context
creation belongs to the platform layer (the windowing code that made the GL
context current), so the backend is constructed from an existing
`glow::Context` and wrapped with `RenderDevice::from_api`.

OpenGL calls are immediate. The driver owns command ordering, so state
setters and draws execute the moment they are requested; the caller must
keep the GL context current on the calling thread.
*/

mod gl_buffer;
mod gl_renderer_api;

pub use gl_buffer::{GlIndexBuffer, GlUniformBuffer, GlVertexBuffer};
pub use gl_renderer_api::GlRendererApi;
