/// VulkanUniformBuffer - Vulkan implementation of the UniformBuffer trait
///
/// Uniform buffers are HOST_VISIBLE | HOST_COHERENT and stay persistently
/// mapped for their whole lifetime, so a write is a plain memcpy. Writes can
/// also be queued and drained one per frame through the shared
/// UniformWriteQueue, preserving submission order.

use std::sync::{Arc, Mutex};

use ash::vk;
use polaris_engine::engine_trace;
use polaris_engine::polaris::render::{UniformBuffer, UniformWriteQueue};
use polaris_engine::polaris::{Error, Result};

use crate::vulkan_buffer::DeviceBuffer;
use crate::vulkan_context::GpuContext;

const SOURCE: &str = "polaris::vulkan";

/// Raw pointer to the persistent mapping
///
/// The pointer targets memory owned by the buffer below it and all writes
/// go through the surrounding Mutex.
struct MappedPtr(*mut u8);

unsafe impl Send for MappedPtr {}

/// Persistently mapped uniform buffer
pub struct VulkanUniformBuffer {
    buffer: DeviceBuffer,
    mapped: Mutex<MappedPtr>,
    queue: UniformWriteQueue,
    size: u64,
}

impl VulkanUniformBuffer {
    /// Create a uniform buffer of `size` bytes and map it
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResource`] for `size == 0`: a uniform buffer
    /// exists to be read by shaders every frame and an empty one is always
    /// a caller bug.
    pub fn new(ctx: Arc<GpuContext>, size: u64) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidResource(
                "Uniform buffer of size 0".to_string(),
            ));
        }

        let buffer = DeviceBuffer::new(
            ctx,
            size,
            vk::BufferUsageFlags::UNIFORM_BUFFER,
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
        )?;
        let mapped = buffer.map_persistent()?;
        engine_trace!(SOURCE, "Created uniform buffer ({} bytes)", size);

        Ok(Self {
            buffer,
            mapped: Mutex::new(MappedPtr(mapped)),
            queue: UniformWriteQueue::new(),
            size,
        })
    }

    /// Underlying Vulkan buffer handle
    ///
    /// Used by the frame recorder when writing descriptor sets.
    pub fn raw(&self) -> vk::Buffer {
        self.buffer.buffer
    }
}

impl UniformBuffer for VulkanUniformBuffer {
    fn set_data(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 > self.size {
            return Err(Error::SizeExceeded {
                requested: data.len() as u64,
                capacity: self.size,
            });
        }

        let mapped = self.mapped.lock().unwrap();
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), mapped.0, data.len());
        }
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
        engine_trace!(
            SOURCE,
            "Queued {} bytes for uniform buffer ({} pending)",
            data.len(),
            self.queue.len()
        );
        Ok(())
    }

    fn apply_next(&self) -> Result<()> {
        if let Some(data) = self.queue.pop_next() {
            self.set_data(&data)?;
            engine_trace!(SOURCE, "Applied queued uniform write ({} bytes)", data.len());
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

impl Drop for VulkanUniformBuffer {
    fn drop(&mut self) {
        // Release the persistent mapping before DeviceBuffer frees the memory
        self.buffer.unmap();
    }
}
