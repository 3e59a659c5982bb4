/// OpenGL buffer resources - vertex, index, and uniform buffers
///
/// Each resource owns one GL buffer object. Storage is allocated once at
/// creation (glBufferData) and every later write goes through
/// glBufferSubData, so the size reported to callers never changes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use glow::HasContext;
use polaris_engine::engine_err;
use polaris_engine::engine_trace;
use polaris_engine::polaris::render::{
    IndexBuffer, UniformBuffer, UniformWriteQueue, VertexBuffer,
};
use polaris_engine::polaris::{Error, Result};

const SOURCE: &str = "polaris::opengl";

fn create_buffer_with_storage(
    gl: &glow::Context,
    target: u32,
    data: &[u8],
    usage: u32,
) -> Result<glow::Buffer> {
    unsafe {
        let buffer = gl
            .create_buffer()
            .map_err(|e| engine_err!(SOURCE, "Failed to create GL buffer: {}", e))?;
        gl.bind_buffer(target, Some(buffer));
        gl.buffer_data_u8_slice(target, data, usage);
        gl.bind_buffer(target, None);
        Ok(buffer)
    }
}

fn write_sub_data(
    gl: &glow::Context,
    target: u32,
    buffer: glow::Buffer,
    offset: u64,
    data: &[u8],
) {
    unsafe {
        gl.bind_buffer(target, Some(buffer));
        gl.buffer_sub_data_u8_slice(target, offset as i32, data);
        gl.bind_buffer(target, None);
    }
}

// ============================================================================
// Vertex buffer
// ============================================================================

/// GL_ARRAY_BUFFER-backed vertex buffer
pub struct GlVertexBuffer {
    gl: Arc<glow::Context>,
    pub(crate) buffer: glow::Buffer,
    size: u64,
}

impl GlVertexBuffer {
    /// Create a zero-filled vertex buffer of `size` bytes
    pub fn new(gl: Arc<glow::Context>, size: u64) -> Result<Self> {
        // glBufferData with a null pointer leaves the storage undefined;
        // hand it zeros so a fresh buffer has deterministic contents
        let zeros = vec![0u8; size as usize];
        let buffer =
            create_buffer_with_storage(&gl, glow::ARRAY_BUFFER, &zeros, glow::DYNAMIC_DRAW)?;
        engine_trace!(SOURCE, "Created vertex buffer ({} bytes)", size);
        Ok(Self { gl, buffer, size })
    }

    /// Create a vertex buffer initialized with `data`
    pub fn with_data(gl: Arc<glow::Context>, data: &[u8]) -> Result<Self> {
        let buffer = create_buffer_with_storage(&gl, glow::ARRAY_BUFFER, data, glow::STATIC_DRAW)?;
        engine_trace!(SOURCE, "Created vertex buffer ({} bytes)", data.len());
        Ok(Self {
            gl,
            buffer,
            size: data.len() as u64,
        })
    }
}

impl VertexBuffer for GlVertexBuffer {
    fn set_data(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: data.len() as u64,
                capacity: self.size,
            });
        }
        write_sub_data(&self.gl, glow::ARRAY_BUFFER, self.buffer, 0, data);
        Ok(())
    }

    fn set_sub_data(&self, data: &[u8], offset: u64) -> Result<()> {
        if offset + data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: offset + data.len() as u64,
                capacity: self.size,
            });
        }
        write_sub_data(&self.gl, glow::ARRAY_BUFFER, self.buffer, offset, data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.buffer);
        }
    }
}

// ============================================================================
// Index buffer
// ============================================================================

/// GL_ELEMENT_ARRAY_BUFFER-backed 32-bit index buffer
pub struct GlIndexBuffer {
    gl: Arc<glow::Context>,
    pub(crate) buffer: glow::Buffer,
    size: u64,
    count: AtomicU32,
}

impl GlIndexBuffer {
    /// Create an index buffer initialized with `indices`
    pub fn with_indices(gl: Arc<glow::Context>, indices: &[u32]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let buffer =
            create_buffer_with_storage(&gl, glow::ELEMENT_ARRAY_BUFFER, bytes, glow::STATIC_DRAW)?;
        engine_trace!(SOURCE, "Created index buffer ({} indices)", indices.len());
        Ok(Self {
            gl,
            buffer,
            size: bytes.len() as u64,
            count: AtomicU32::new(indices.len() as u32),
        })
    }
}

impl IndexBuffer for GlIndexBuffer {
    fn set_data(&self, indices: &[u32]) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        if bytes.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: bytes.len() as u64,
                capacity: self.size,
            });
        }
        write_sub_data(&self.gl, glow::ELEMENT_ARRAY_BUFFER, self.buffer, 0, bytes);
        self.count.store(indices.len() as u32, Ordering::Release);
        Ok(())
    }

    fn set_sub_data(&self, indices: &[u32], offset: u64) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let byte_offset = offset * std::mem::size_of::<u32>() as u64;
        if byte_offset + bytes.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: byte_offset + bytes.len() as u64,
                capacity: self.size,
            });
        }
        write_sub_data(
            &self.gl,
            glow::ELEMENT_ARRAY_BUFFER,
            self.buffer,
            byte_offset,
            bytes,
        );
        Ok(())
    }

    fn count(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for GlIndexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.buffer);
        }
    }
}

// ============================================================================
// Uniform buffer
// ============================================================================

/// GL_UNIFORM_BUFFER-backed uniform buffer
pub struct GlUniformBuffer {
    gl: Arc<glow::Context>,
    pub(crate) buffer: glow::Buffer,
    size: u64,
    queue: UniformWriteQueue,
}

impl GlUniformBuffer {
    /// Create a uniform buffer of `size` bytes
    pub fn new(gl: Arc<glow::Context>, size: u64) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidResource(
                "Uniform buffer of size 0".to_string(),
            ));
        }
        let zeros = vec![0u8; size as usize];
        let buffer =
            create_buffer_with_storage(&gl, glow::UNIFORM_BUFFER, &zeros, glow::DYNAMIC_DRAW)?;
        engine_trace!(SOURCE, "Created uniform buffer ({} bytes)", size);
        Ok(Self {
            gl,
            buffer,
            size,
            queue: UniformWriteQueue::new(),
        })
    }
}

impl UniformBuffer for GlUniformBuffer {
    fn set_data(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: data.len() as u64,
                capacity: self.size,
            });
        }
        write_sub_data(&self.gl, glow::UNIFORM_BUFFER, self.buffer, 0, data);
        Ok(())
    }

    fn enqueue_data(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: data.len() as u64,
                capacity: self.size,
            });
        }
        self.queue.enqueue(data);
        Ok(())
    }

    fn apply_next(&self) -> Result<()> {
        if let Some(data) = self.queue.pop_next() {
            self.set_data(&data)?;
        }
        Ok(())
    }

    fn pending_writes(&self) -> usize {
        self.queue.len()
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for GlUniformBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.buffer);
        }
    }
}

