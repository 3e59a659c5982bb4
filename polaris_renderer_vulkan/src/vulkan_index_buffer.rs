/// VulkanIndexBuffer - Vulkan implementation of the IndexBuffer trait
///
/// Indices are 32-bit and live in DEVICE_LOCAL memory, uploaded through the
/// same staging path as vertex data. The element count follows the most
/// recent upload and feeds draw calls that ask for the full buffer.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use ash::vk;
use polaris_engine::engine_trace;
use polaris_engine::polaris::render::IndexBuffer;
use polaris_engine::polaris::{Error, Result};

use crate::vulkan_buffer::DeviceBuffer;
use crate::vulkan_context::GpuContext;

const SOURCE: &str = "polaris::vulkan";

/// Device-local 32-bit index buffer
pub struct VulkanIndexBuffer {
    buffer: Option<DeviceBuffer>,
    size: u64,
    count: AtomicU32,
}

impl VulkanIndexBuffer {
    /// Create an index buffer initialized with `indices`
    ///
    /// An empty slice allocates nothing; the buffer reports a count of 0
    /// and draws nothing.
    pub fn with_indices(ctx: Arc<GpuContext>, indices: &[u32]) -> Result<Self> {
        let size = std::mem::size_of_val(indices) as u64;
        if size == 0 {
            return Ok(Self {
                buffer: None,
                size: 0,
                count: AtomicU32::new(0),
            });
        }

        let buffer = DeviceBuffer::new(
            Arc::clone(&ctx),
            size,
            vk::BufferUsageFlags::TRANSFER_DST
                | vk::BufferUsageFlags::TRANSFER_SRC
                | vk::BufferUsageFlags::INDEX_BUFFER,
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
        )?;
        buffer.upload(bytemuck::cast_slice(indices))?;
        engine_trace!(SOURCE, "Created index buffer ({} indices)", indices.len());

        Ok(Self {
            buffer: Some(buffer),
            size,
            count: AtomicU32::new(indices.len() as u32),
        })
    }

    /// Underlying Vulkan buffer handle, null for the zero-size case
    ///
    /// Used by the frame recorder to bind the buffer when encoding draws.
    pub fn raw(&self) -> vk::Buffer {
        self.buffer.as_ref().map_or(vk::Buffer::null(), |b| b.buffer)
    }

    /// Copy the buffer contents back to host memory (debug/test path)
    pub fn read_back(&self) -> Result<Vec<u32>> {
        match &self.buffer {
            Some(buffer) => {
                let bytes = buffer.read_back()?;
                // pod_collect_to_vec tolerates the Vec<u8> allocation not
                // being 4-byte aligned
                Ok(bytemuck::pod_collect_to_vec(&bytes))
            }
            None => Ok(Vec::new()),
        }
    }
}

impl IndexBuffer for VulkanIndexBuffer {
    fn set_data(&self, indices: &[u32]) -> Result<()> {
        if indices.is_empty() {
            return Ok(());
        }
        let bytes = std::mem::size_of_val(indices) as u64;
        if bytes > self.size {
            return Err(Error::SizeExceeded {
                requested: bytes,
                capacity: self.size,
            });
        }

        let buffer = self
            .buffer
            .as_ref()
            .ok_or_else(|| Error::InvalidResource("Index buffer has no allocation".to_string()))?;
        buffer.upload(bytemuck::cast_slice(indices))?;
        self.count.store(indices.len() as u32, Ordering::Release);
        engine_trace!(SOURCE, "Uploaded {} indices to index buffer", indices.len());
        Ok(())
    }

    fn set_sub_data(&self, _indices: &[u32], _offset: u64) -> Result<()> {
        Err(Error::Unsupported(
            "index buffer sub-data update".to_string(),
        ))
    }

    fn count(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
