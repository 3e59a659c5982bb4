/// GlRendererApi - OpenGL implementation of the RendererApi trait
///
/// OpenGL executes immediately: state setters talk to the driver when
/// called and draws are issued on the spot, no deferred queue. Instancing
/// is supported here via glDrawElementsInstanced.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;

use polaris_engine::polaris::render::{
    IndexBuffer, RendererApi, UniformBuffer, VertexArray, VertexBuffer,
};
use polaris_engine::polaris::{Error, Result};
use polaris_engine::{engine_info, engine_trace};

use crate::gl_buffer::{GlIndexBuffer, GlUniformBuffer, GlVertexBuffer};

const SOURCE: &str = "polaris::opengl";

/// OpenGL rendering backend
///
/// Constructed from a `glow::Context` the platform layer created and made
/// current, then wrapped with `RenderDevice::from_api`.
pub struct GlRendererApi {
    gl: Arc<glow::Context>,
}

impl GlRendererApi {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }

    /// Shared GL context handle
    pub fn context(&self) -> Arc<glow::Context> {
        Arc::clone(&self.gl)
    }

    /// Bind the geometry of `vertex_array` and resolve the index count
    ///
    /// Buffers created by this backend are the only ones that can reach a
    /// draw call here, so the trait objects are cast back to their GL
    /// concrete types.
    fn bind_geometry(&self, vertex_array: &Arc<VertexArray>, index_count: u32) -> Result<u32> {
        let effective = if index_count == 0 {
            vertex_array.index_count()
        } else {
            index_count
        };
        if effective == 0 {
            return Ok(0);
        }

        let index_buffer = vertex_array.index_buffer().ok_or_else(|| {
            Error::InvalidResource("draw_indexed requires an index buffer".to_string())
        })?;

        unsafe {
            for buffer in vertex_array.vertex_buffers() {
                let gl_buffer =
                    &*(Arc::as_ptr(buffer) as *const dyn VertexBuffer as *const GlVertexBuffer);
                self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(gl_buffer.buffer));
            }

            let gl_index =
                &*(Arc::as_ptr(index_buffer) as *const dyn IndexBuffer as *const GlIndexBuffer);
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(gl_index.buffer));
        }

        Ok(effective)
    }
}

impl RendererApi for GlRendererApi {
    fn init(&mut self) -> Result<()> {
        engine_info!(SOURCE, "OpenGL renderer initialized");
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        unsafe {
            self.gl
                .viewport(x as i32, y as i32, width as i32, height as i32);
        }
        engine_trace!(SOURCE, "Viewport set to {}x{} at ({}, {})", width, height, x, y);
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) -> Result<()> {
        // The driver keeps the clear color; no backend-side state needed
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
        Ok(())
    }

    fn draw_indexed(&mut self, vertex_array: &Arc<VertexArray>, index_count: u32) -> Result<()> {
        let count = self.bind_geometry(vertex_array, index_count)?;
        if count == 0 {
            return Ok(());
        }
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count as i32, glow::UNSIGNED_INT, 0);
        }
        Ok(())
    }

    fn draw_indexed_instanced(
        &mut self,
        vertex_array: &Arc<VertexArray>,
        index_count: u32,
        instance_count: u32,
    ) -> Result<()> {
        let count = self.bind_geometry(vertex_array, index_count)?;
        if count == 0 || instance_count == 0 {
            return Ok(());
        }
        unsafe {
            self.gl.draw_elements_instanced(
                glow::TRIANGLES,
                count as i32,
                glow::UNSIGNED_INT,
                0,
                instance_count as i32,
            );
        }
        Ok(())
    }

    fn create_vertex_buffer(&mut self, size: u64) -> Result<Arc<dyn VertexBuffer>> {
        Ok(Arc::new(GlVertexBuffer::new(Arc::clone(&self.gl), size)?))
    }

    fn create_vertex_buffer_with_data(&mut self, data: &[u8]) -> Result<Arc<dyn VertexBuffer>> {
        Ok(Arc::new(GlVertexBuffer::with_data(
            Arc::clone(&self.gl),
            data,
        )?))
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        Ok(Arc::new(GlIndexBuffer::with_indices(
            Arc::clone(&self.gl),
            indices,
        )?))
    }

    fn create_uniform_buffer(&mut self, size: u64) -> Result<Arc<dyn UniformBuffer>> {
        Ok(Arc::new(GlUniformBuffer::new(Arc::clone(&self.gl), size)?))
    }
}
