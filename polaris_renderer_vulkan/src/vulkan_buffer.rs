/// DeviceBuffer - raw Vulkan buffer with a dedicated memory allocation
///
/// Every GPU buffer resource (vertex, index, uniform, staging) is one
/// `vk::Buffer` bound at offset 0 to its own `vk::DeviceMemory` block.
/// Device-local buffers are filled through a host-visible staging buffer and
/// a blocking queue copy; host-visible buffers are written through mapping.

use std::sync::Arc;

use ash::vk;
use polaris_engine::engine_err;
use polaris_engine::polaris::{Error, Result};

use crate::vulkan_context::GpuContext;
use crate::vulkan_memory::find_memory_type;

const SOURCE: &str = "polaris::vulkan";

/// Vulkan buffer plus its dedicated memory allocation
pub struct DeviceBuffer {
    /// Shared GPU context (device, queue, upload command pool)
    ctx: Arc<GpuContext>,
    /// Vulkan buffer handle
    pub(crate) buffer: vk::Buffer,
    /// Dedicated memory block the buffer is bound to
    memory: vk::DeviceMemory,
    /// Size in bytes the buffer was created with
    size: u64,
}

impl DeviceBuffer {
    /// Create a buffer of exactly `size` bytes and bind a fresh allocation
    ///
    /// The buffer uses EXCLUSIVE sharing (single-queue ownership). The
    /// allocation takes the driver-reported requirement size, which may be
    /// larger than `size` for alignment.
    pub fn new(
        ctx: Arc<GpuContext>,
        size: u64,
        usage: vk::BufferUsageFlags,
        properties: vk::MemoryPropertyFlags,
    ) -> Result<Self> {
        unsafe {
            let buffer_info = vk::BufferCreateInfo::default()
                .size(size)
                .usage(usage)
                .sharing_mode(vk::SharingMode::EXCLUSIVE);

            let buffer = ctx
                .device
                .create_buffer(&buffer_info, None)
                .map_err(|e| engine_err!(SOURCE, "Failed to create buffer: {:?}", e))?;

            let requirements = ctx.device.get_buffer_memory_requirements(buffer);

            let memory_type_index = match find_memory_type(
                &ctx.memory_properties,
                requirements.memory_type_bits,
                properties,
            ) {
                Ok(index) => index,
                Err(e) => {
                    ctx.device.destroy_buffer(buffer, None);
                    return Err(e);
                }
            };

            let alloc_info = vk::MemoryAllocateInfo::default()
                .allocation_size(requirements.size)
                .memory_type_index(memory_type_index);

            let memory = match ctx.device.allocate_memory(&alloc_info, None) {
                Ok(memory) => memory,
                Err(e) => {
                    ctx.device.destroy_buffer(buffer, None);
                    polaris_engine::engine_error!(
                        SOURCE,
                        "Failed to allocate {} bytes of buffer memory: {:?}",
                        requirements.size,
                        e
                    );
                    return Err(Error::OutOfMemory);
                }
            };

            if let Err(e) = ctx.device.bind_buffer_memory(buffer, memory, 0) {
                ctx.device.destroy_buffer(buffer, None);
                ctx.device.free_memory(memory, None);
                return Err(engine_err!(SOURCE, "Failed to bind buffer memory: {:?}", e));
            }

            Ok(Self {
                ctx,
                buffer,
                memory,
                size,
            })
        }
    }

    /// Size in bytes the buffer was created with
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Write `data` at byte `offset` through a transient mapping
    ///
    /// Requires HOST_VISIBLE memory. The caller guarantees
    /// `offset + data.len()` fits inside the buffer.
    pub fn write_mapped(&self, data: &[u8], offset: u64) -> Result<()> {
        unsafe {
            let mapped = self
                .ctx
                .device
                .map_memory(self.memory, offset, data.len() as u64, vk::MemoryMapFlags::empty())
                .map_err(|e| engine_err!(SOURCE, "Failed to map buffer memory: {:?}", e))?;

            std::ptr::copy_nonoverlapping(data.as_ptr(), mapped as *mut u8, data.len());

            self.ctx.device.unmap_memory(self.memory);
        }
        Ok(())
    }

    /// Map the whole buffer for the lifetime of the resource
    ///
    /// Used by uniform buffers, which stay mapped until destruction. Pair
    /// with [`DeviceBuffer::unmap`] before the buffer is dropped.
    pub fn map_persistent(&self) -> Result<*mut u8> {
        unsafe {
            let mapped = self
                .ctx
                .device
                .map_memory(self.memory, 0, self.size, vk::MemoryMapFlags::empty())
                .map_err(|e| engine_err!(SOURCE, "Failed to map buffer memory: {:?}", e))?;
            Ok(mapped as *mut u8)
        }
    }

    /// Release a persistent mapping
    pub fn unmap(&self) {
        unsafe {
            self.ctx.device.unmap_memory(self.memory);
        }
    }

    /// Copy `size` bytes from `src` into this buffer, blocking until done
    ///
    /// Records a one-shot command buffer from the shared upload pool,
    /// submits it to the graphics queue, and waits for the queue to go
    /// idle, so both buffers are safe to touch when this returns.
    pub fn copy_from(&self, src: &DeviceBuffer, size: u64) -> Result<()> {
        unsafe {
            let pool = self.ctx.upload_command_pool.lock().unwrap();

            let alloc_info = vk::CommandBufferAllocateInfo::default()
                .command_pool(*pool)
                .level(vk::CommandBufferLevel::PRIMARY)
                .command_buffer_count(1);

            let command_buffers = self
                .ctx
                .device
                .allocate_command_buffers(&alloc_info)
                .map_err(|e| engine_err!(SOURCE, "Failed to allocate upload command buffer: {:?}", e))?;
            let command_buffer = command_buffers[0];

            // Free the command buffer on every exit path below
            let result = (|| -> Result<()> {
                let begin_info = vk::CommandBufferBeginInfo::default()
                    .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);

                self.ctx
                    .device
                    .begin_command_buffer(command_buffer, &begin_info)
                    .map_err(|e| engine_err!(SOURCE, "Failed to begin upload command buffer: {:?}", e))?;

                let region = vk::BufferCopy::default().size(size);
                self.ctx
                    .device
                    .cmd_copy_buffer(command_buffer, src.buffer, self.buffer, &[region]);

                self.ctx
                    .device
                    .end_command_buffer(command_buffer)
                    .map_err(|e| engine_err!(SOURCE, "Failed to end upload command buffer: {:?}", e))?;

                let command_buffers = [command_buffer];
                let submit_info = vk::SubmitInfo::default().command_buffers(&command_buffers);

                self.ctx
                    .device
                    .queue_submit(self.ctx.graphics_queue, &[submit_info], vk::Fence::null())
                    .map_err(|e| engine_err!(SOURCE, "Failed to submit buffer copy: {:?}", e))?;

                // Blocking transfer: wait for the copy before reusing either buffer
                self.ctx
                    .device
                    .queue_wait_idle(self.ctx.graphics_queue)
                    .map_err(|e| engine_err!(SOURCE, "Failed to wait for buffer copy: {:?}", e))?;

                Ok(())
            })();

            self.ctx
                .device
                .free_command_buffers(*pool, &[command_buffer]);

            result
        }
    }

    /// Fill this buffer from `data` through a staging buffer
    ///
    /// Creates a HOST_VISIBLE staging buffer, writes `data` into it, and
    /// runs a blocking device copy. Intended for DEVICE_LOCAL buffers
    /// created with TRANSFER_DST usage.
    pub fn upload(&self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        let staging = DeviceBuffer::new(
            Arc::clone(&self.ctx),
            data.len() as u64,
            vk::BufferUsageFlags::TRANSFER_SRC,
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
        )?;
        staging.write_mapped(data, 0)?;

        self.copy_from(&staging, data.len() as u64)
    }

    /// Read the buffer contents back to host memory
    ///
    /// Copies into a HOST_VISIBLE readback buffer and maps it. Requires the
    /// buffer to carry TRANSFER_SRC usage. Debug and test path, not meant
    /// for per-frame use.
    pub fn read_back(&self) -> Result<Vec<u8>> {
        let readback = DeviceBuffer::new(
            Arc::clone(&self.ctx),
            self.size,
            vk::BufferUsageFlags::TRANSFER_DST,
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
        )?;
        readback.copy_from(self, self.size)?;

        let mut contents = vec![0u8; self.size as usize];
        unsafe {
            let mapped = readback
                .ctx
                .device
                .map_memory(readback.memory, 0, self.size, vk::MemoryMapFlags::empty())
                .map_err(|e| engine_err!(SOURCE, "Failed to map readback buffer: {:?}", e))?;
            std::ptr::copy_nonoverlapping(mapped as *const u8, contents.as_mut_ptr(), self.size as usize);
            readback.ctx.device.unmap_memory(readback.memory);
        }
        Ok(contents)
    }
}

impl Drop for DeviceBuffer {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_buffer(self.buffer, None);
            self.ctx.device.free_memory(self.memory, None);
        }
    }
}
