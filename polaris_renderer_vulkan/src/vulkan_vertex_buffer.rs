/// VulkanVertexBuffer - Vulkan implementation of the VertexBuffer trait
///
/// Vertex data lives in DEVICE_LOCAL memory; every upload goes through a
/// staging buffer and a blocking queue copy. TRANSFER_SRC is part of the
/// usage flags so the debug read-back path stays usable.

use std::sync::Arc;

use ash::vk;
use polaris_engine::engine_trace;
use polaris_engine::polaris::render::VertexBuffer;
use polaris_engine::polaris::{Error, Result};

use crate::vulkan_buffer::DeviceBuffer;
use crate::vulkan_context::GpuContext;

const SOURCE: &str = "polaris::vulkan";

/// Device-local vertex buffer
///
/// A zero-size buffer allocates nothing and draws nothing; Vulkan forbids
/// zero-size VkBuffers, so the handle stays empty.
pub struct VulkanVertexBuffer {
    buffer: Option<DeviceBuffer>,
    size: u64,
}

impl VulkanVertexBuffer {
    /// Create a zero-filled vertex buffer of `size` bytes
    ///
    /// Device-local memory starts undefined, so a scratch block of zeros is
    /// uploaded to give a fresh buffer deterministic contents.
    pub fn new(ctx: Arc<GpuContext>, size: u64) -> Result<Self> {
        Self::build(ctx, &vec![0u8; size as usize])
    }

    /// Create a vertex buffer initialized with `data`
    pub fn with_data(ctx: Arc<GpuContext>, data: &[u8]) -> Result<Self> {
        Self::build(ctx, data)
    }

    fn build(ctx: Arc<GpuContext>, data: &[u8]) -> Result<Self> {
        let size = data.len() as u64;
        if size == 0 {
            return Ok(Self { buffer: None, size: 0 });
        }

        let buffer = DeviceBuffer::new(
            ctx,
            size,
            vk::BufferUsageFlags::TRANSFER_DST
                | vk::BufferUsageFlags::TRANSFER_SRC
                | vk::BufferUsageFlags::VERTEX_BUFFER,
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
        )?;
        buffer.upload(data)?;
        engine_trace!(SOURCE, "Created vertex buffer ({} bytes)", size);

        Ok(Self {
            buffer: Some(buffer),
            size,
        })
    }

    /// Underlying Vulkan buffer handle, null for the zero-size case
    ///
    /// Used by the frame recorder to bind the buffer when encoding draws.
    pub fn raw(&self) -> vk::Buffer {
        self.buffer.as_ref().map_or(vk::Buffer::null(), |b| b.buffer)
    }

    /// Copy the buffer contents back to host memory (debug/test path)
    pub fn read_back(&self) -> Result<Vec<u8>> {
        match &self.buffer {
            Some(buffer) => buffer.read_back(),
            None => Ok(Vec::new()),
        }
    }
}

impl VertexBuffer for VulkanVertexBuffer {
    fn set_data(&self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        if data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: data.len() as u64,
                capacity: self.size,
            });
        }

        // Checked above: data is non-empty, so size > 0 and buffer exists
        let buffer = self
            .buffer
            .as_ref()
            .ok_or_else(|| Error::InvalidResource("Vertex buffer has no allocation".to_string()))?;
        buffer.upload(data)?;
        engine_trace!(SOURCE, "Uploaded {} bytes to vertex buffer", data.len());
        Ok(())
    }

    fn set_sub_data(&self, _data: &[u8], _offset: u64) -> Result<()> {
        Err(Error::Unsupported(
            "vertex buffer sub-data update".to_string(),
        ))
    }

    fn size(&self) -> u64 {
        self.size
    }
}
