/// Mock RendererApi for unit tests (no GPU required)
///
/// This mock backend allows testing RenderDevice, VertexArray, and uniform
/// queue plumbing without a real GPU or graphics backend. Draw and state
/// calls are recorded as command strings for assertion.

use std::sync::{Arc, Mutex};

use glam::Vec4;

use crate::error::{Error, Result};
use crate::renderer::{
    IndexBuffer, RendererApi, UniformBuffer, UniformWriteQueue, VertexArray, VertexBuffer,
};

// ============================================================================
// Mock VertexBuffer
// ============================================================================

pub struct MockVertexBuffer {
    size: u64,
    pub contents: Mutex<Vec<u8>>,
}

impl MockVertexBuffer {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            contents: Mutex::new(vec![0; size as usize]),
        }
    }

    pub fn with_data(data: &[u8]) -> Self {
        Self {
            size: data.len() as u64,
            contents: Mutex::new(data.to_vec()),
        }
    }
}

impl VertexBuffer for MockVertexBuffer {
    fn set_data(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: data.len() as u64,
                capacity: self.size,
            });
        }
        let mut contents = self.contents.lock().unwrap();
        contents[..data.len()].copy_from_slice(data);
        Ok(())
    }

    fn set_sub_data(&self, _data: &[u8], _offset: u64) -> Result<()> {
        // Mirrors the Vulkan backend, which has no partial-update path
        Err(Error::Unsupported("vertex buffer sub-data update".to_string()))
    }

    fn size(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock IndexBuffer
// ============================================================================

pub struct MockIndexBuffer {
    size: u64,
    count: Mutex<u32>,
    pub contents: Mutex<Vec<u32>>,
}

impl MockIndexBuffer {
    pub fn with_indices(indices: &[u32]) -> Self {
        Self {
            size: std::mem::size_of_val(indices) as u64,
            count: Mutex::new(indices.len() as u32),
            contents: Mutex::new(indices.to_vec()),
        }
    }
}

impl IndexBuffer for MockIndexBuffer {
    fn set_data(&self, indices: &[u32]) -> Result<()> {
        let bytes = std::mem::size_of_val(indices) as u64;
        if bytes > self.size {
            return Err(Error::SizeExceeded {
                requested: bytes,
                capacity: self.size,
            });
        }
        let mut contents = self.contents.lock().unwrap();
        contents.clear();
        contents.extend_from_slice(indices);
        *self.count.lock().unwrap() = indices.len() as u32;
        Ok(())
    }

    fn set_sub_data(&self, _indices: &[u32], _offset: u64) -> Result<()> {
        Err(Error::Unsupported("index buffer sub-data update".to_string()))
    }

    fn count(&self) -> u32 {
        *self.count.lock().unwrap()
    }

    fn size(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock UniformBuffer
// ============================================================================

pub struct MockUniformBuffer {
    size: u64,
    pub memory: Mutex<Vec<u8>>,
    queue: UniformWriteQueue,
}

impl MockUniformBuffer {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            memory: Mutex::new(vec![0; size as usize]),
            queue: UniformWriteQueue::new(),
        }
    }
}

impl UniformBuffer for MockUniformBuffer {
    fn set_data(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: data.len() as u64,
                capacity: self.size,
            });
        }
        let mut memory = self.memory.lock().unwrap();
        memory[..data.len()].copy_from_slice(data);
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

// ============================================================================
// Mock RendererApi
// ============================================================================

/// Mock backend that records operations as command strings
pub struct MockRendererApi {
    /// Recorded operations, in call order
    pub commands: Vec<String>,
    /// Current clear color
    pub clear_color: Vec4,
    /// Whether init() ran
    pub initialized: bool,
    /// When true, init() fails (for device error-path tests)
    pub fail_init: bool,
}

impl MockRendererApi {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            clear_color: Vec4::ZERO,
            initialized: false,
            fail_init: false,
        }
    }
}

impl Default for MockRendererApi {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererApi for MockRendererApi {
    fn init(&mut self) -> Result<()> {
        if self.fail_init {
            return Err(Error::InitializationFailed("mock init failure".to_string()));
        }
        self.initialized = true;
        self.commands.push("init".to_string());
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        self.commands
            .push(format!("set_viewport({}, {}, {}, {})", x, y, width, height));
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) -> Result<()> {
        self.clear_color = color;
        self.commands.push(format!("set_clear_color({:?})", color));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.commands.push("clear".to_string());
        Ok(())
    }

    fn draw_indexed(&mut self, vertex_array: &Arc<VertexArray>, index_count: u32) -> Result<()> {
        let effective = if index_count == 0 {
            vertex_array.index_count()
        } else {
            index_count
        };
        self.commands.push(format!("draw_indexed({})", effective));
        Ok(())
    }

    fn draw_indexed_instanced(
        &mut self,
        vertex_array: &Arc<VertexArray>,
        index_count: u32,
        instance_count: u32,
    ) -> Result<()> {
        let effective = if index_count == 0 {
            vertex_array.index_count()
        } else {
            index_count
        };
        self.commands
            .push(format!("draw_indexed_instanced({}, {})", effective, instance_count));
        Ok(())
    }

    fn create_vertex_buffer(&mut self, size: u64) -> Result<Arc<dyn VertexBuffer>> {
        self.commands.push(format!("create_vertex_buffer({})", size));
        Ok(Arc::new(MockVertexBuffer::new(size)))
    }

    fn create_vertex_buffer_with_data(&mut self, data: &[u8]) -> Result<Arc<dyn VertexBuffer>> {
        self.commands
            .push(format!("create_vertex_buffer_with_data({})", data.len()));
        Ok(Arc::new(MockVertexBuffer::with_data(data)))
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        self.commands
            .push(format!("create_index_buffer({})", indices.len()));
        Ok(Arc::new(MockIndexBuffer::with_indices(indices)))
    }

    fn create_uniform_buffer(&mut self, size: u64) -> Result<Arc<dyn UniformBuffer>> {
        if size == 0 {
            return Err(Error::InvalidResource(
                "Uniform buffer of size 0".to_string(),
            ));
        }
        self.commands.push(format!("create_uniform_buffer({})", size));
        Ok(Arc::new(MockUniformBuffer::new(size)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
