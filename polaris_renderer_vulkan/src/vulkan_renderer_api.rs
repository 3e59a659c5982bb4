/// VulkanRendererApi - Vulkan implementation of the RendererApi trait
///
/// Owns the instance, device, and queues, and hands resources a shared
/// GpuContext. State-setting calls (viewport, clear color) update pending
/// state; clear and draw requests are queued and drained when the frame is
/// recorded, because Vulkan draws can only be encoded into the frame's
/// command buffer.

use std::ffi::CString;
use std::sync::Arc;

use ash::vk;
use glam::Vec4;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use polaris_engine::polaris::render::{
    Config, IndexBuffer, RendererApi, UniformBuffer, VertexArray, VertexBuffer,
};
use polaris_engine::polaris::{Error, Result};
use polaris_engine::{engine_error, engine_info, engine_trace};

use crate::vulkan_context::GpuContext;
use crate::vulkan_draw_queue::{DrawCommand, DrawQueue};
use crate::vulkan_index_buffer::VulkanIndexBuffer;
use crate::vulkan_uniform_buffer::VulkanUniformBuffer;
use crate::vulkan_vertex_buffer::VulkanVertexBuffer;

const SOURCE: &str = "polaris::vulkan";

/// Pending viewport rectangle, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingViewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Vulkan rendering backend
///
/// Central object for creating buffer resources and collecting draw
/// commands. Swapchain and presentation live outside this type; the frame
/// recorder drains the queued commands each frame.
pub struct VulkanRendererApi {
    /// Vulkan entry (kept alive for instance function pointers)
    _entry: ash::Entry,
    /// Vulkan instance (destroyed in Drop, after the device)
    instance: ash::Instance,
    /// Physical device the logical device was created from
    #[allow(dead_code)]
    physical_device: vk::PhysicalDevice,
    /// Logical device (also stored in GpuContext; destroyed in Drop)
    device: ash::Device,

    /// Graphics queue (also stored in GpuContext for uploads)
    #[allow(dead_code)]
    graphics_queue: vk::Queue,
    graphics_queue_family: u32,

    /// Command pool for per-frame recording, created in init()
    frame_command_pool: vk::CommandPool,
    /// Primary command buffer the frame recorder encodes into
    frame_command_buffer: vk::CommandBuffer,

    /// Pending viewport, applied when the frame is recorded
    viewport: Option<PendingViewport>,
    /// Color used by queued clear commands
    clear_color: Vec4,
    /// Deferred clear and draw commands, drained per frame
    draw_queue: DrawQueue,

    /// Shared GPU context for all buffer resources
    gpu_context: Arc<GpuContext>,

    #[cfg(feature = "vulkan-validation")]
    debug: Option<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)>,
}

impl VulkanRendererApi {
    pub fn new<W: HasDisplayHandle + HasWindowHandle>(window: &W, config: Config) -> Result<Self> {
        unsafe {
            // Create Vulkan Entry
            let entry = ash::Entry::load().map_err(|e| {
                engine_error!(SOURCE, "Failed to load Vulkan library: {:?}", e);
                Error::InitializationFailed(format!("Failed to load Vulkan library: {:?}", e))
            })?;

            // Application Info
            let app_name = CString::new(config.app_name.clone()).map_err(|e| {
                engine_error!(SOURCE, "Invalid application name: {:?}", e);
                Error::InitializationFailed(format!("Invalid application name: {:?}", e))
            })?;
            let (major, minor, patch) = config.app_version;
            let app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version(vk::make_api_version(0, major, minor, patch))
                .engine_name(c"Polaris")
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_3);

            // Get required extensions
            let display_handle = window.display_handle().map_err(|e| {
                engine_error!(SOURCE, "Failed to get display handle: {}", e);
                Error::InitializationFailed(format!("Failed to get display handle: {}", e))
            })?;
            #[allow(unused_mut)]
            let mut extension_names =
                ash_window::enumerate_required_extensions(display_handle.as_raw())
                    .map_err(|e| {
                        engine_error!(SOURCE, "Failed to get required extensions: {}", e);
                        Error::InitializationFailed(format!(
                            "Failed to get required extensions: {}",
                            e
                        ))
                    })?
                    .to_vec();

            // Validation layers and debug utils extension
            #[allow(unused_mut)]
            let mut layer_names: Vec<*const std::ffi::c_char> = Vec::new();
            #[cfg(feature = "vulkan-validation")]
            if config.enable_validation {
                extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
                layer_names.push(c"VK_LAYER_KHRONOS_validation".as_ptr());
            }

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_names);

            let instance = entry.create_instance(&create_info, None).map_err(|e| {
                engine_error!(SOURCE, "Failed to create Vulkan instance: {:?}", e);
                Error::InitializationFailed(format!("Failed to create instance: {:?}", e))
            })?;

            // Setup debug messenger if validation is enabled
            #[cfg(feature = "vulkan-validation")]
            let debug = if config.enable_validation {
                Some(crate::vulkan_debug::create_debug_messenger(
                    &entry, &instance,
                )?)
            } else {
                None
            };

            // Pick Physical Device
            let physical_devices = instance.enumerate_physical_devices().map_err(|e| {
                engine_error!(SOURCE, "Failed to enumerate physical devices: {:?}", e);
                Error::InitializationFailed(format!(
                    "Failed to enumerate physical devices: {:?}",
                    e
                ))
            })?;

            let physical_device = physical_devices.into_iter().next().ok_or_else(|| {
                engine_error!(SOURCE, "No Vulkan-capable GPU found");
                Error::InitializationFailed("No Vulkan-capable GPU found".to_string())
            })?;

            // Find Graphics Queue Family
            let queue_families =
                instance.get_physical_device_queue_family_properties(physical_device);

            let graphics_family_index = queue_families
                .iter()
                .enumerate()
                .find(|(_, qf)| qf.queue_flags.contains(vk::QueueFlags::GRAPHICS))
                .map(|(i, _)| i as u32)
                .ok_or_else(|| {
                    engine_error!(SOURCE, "No graphics queue family found");
                    Error::InitializationFailed("No graphics queue family found".to_string())
                })?;

            // Create Logical Device
            let queue_priorities = [1.0];
            let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
                .queue_family_index(graphics_family_index)
                .queue_priorities(&queue_priorities)];

            let device_extension_names = vec![ash::khr::swapchain::NAME.as_ptr()];

            let device_create_info = vk::DeviceCreateInfo::default()
                .queue_create_infos(&queue_create_infos)
                .enabled_extension_names(&device_extension_names);

            let device = instance
                .create_device(physical_device, &device_create_info, None)
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to create logical device: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create device: {:?}", e))
                })?;

            let graphics_queue = device.get_device_queue(graphics_family_index, 0);

            // Cache memory properties for all future buffer allocations
            let memory_properties =
                instance.get_physical_device_memory_properties(physical_device);

            // Create upload command pool (TRANSIENT + RESET for reusable one-shot uploads)
            let upload_pool_create_info = vk::CommandPoolCreateInfo::default()
                .queue_family_index(graphics_family_index)
                .flags(
                    vk::CommandPoolCreateFlags::TRANSIENT
                        | vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER,
                );

            let upload_command_pool = device
                .create_command_pool(&upload_pool_create_info, None)
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to create upload command pool: {:?}", e);
                    Error::InitializationFailed(format!(
                        "Failed to create upload command pool: {:?}",
                        e
                    ))
                })?;

            // Create shared GPU context for all buffer resources
            // GpuContext destruction is handled here in Drop
            let gpu_context = Arc::new(GpuContext::new(
                device.clone(),
                physical_device,
                memory_properties,
                graphics_queue,
                graphics_family_index,
                upload_command_pool,
                instance.clone(),
            ));

            engine_info!(SOURCE, "Created Vulkan renderer for '{}'", config.app_name);

            Ok(Self {
                _entry: entry,
                instance,
                physical_device,
                device,
                graphics_queue,
                graphics_queue_family: graphics_family_index,
                frame_command_pool: vk::CommandPool::null(),
                frame_command_buffer: vk::CommandBuffer::null(),
                viewport: None,
                clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
                draw_queue: DrawQueue::new(),
                gpu_context,
                #[cfg(feature = "vulkan-validation")]
                debug,
            })
        }
    }

    /// Shared GPU context used by all resources created by this backend
    pub fn gpu_context(&self) -> Arc<GpuContext> {
        Arc::clone(&self.gpu_context)
    }

    /// Pending viewport, if one has been set since the last frame
    pub fn pending_viewport(&self) -> Option<PendingViewport> {
        self.viewport
    }

    /// Number of queued clear/draw commands
    pub fn pending_commands(&self) -> usize {
        self.draw_queue.len()
    }

    /// Take all queued commands for frame recording
    ///
    /// The frame recorder encodes these into the frame command buffer in
    /// the order they were requested.
    pub fn drain_commands(&self) -> Vec<DrawCommand> {
        self.draw_queue.drain()
    }

    /// Command buffer the frame recorder encodes into
    pub fn frame_command_buffer(&self) -> vk::CommandBuffer {
        self.frame_command_buffer
    }

    /// Block until the device finishes all submitted work
    pub fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.device
                .device_wait_idle()
                .map_err(|e| polaris_engine::engine_err!(SOURCE, "Failed to wait idle: {:?}", e))
        }
    }
}

impl RendererApi for VulkanRendererApi {
    fn init(&mut self) -> Result<()> {
        unsafe {
            // Frame command pool, reset and re-recorded every frame
            let pool_create_info = vk::CommandPoolCreateInfo::default()
                .queue_family_index(self.graphics_queue_family)
                .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER);

            self.frame_command_pool = self
                .device
                .create_command_pool(&pool_create_info, None)
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to create frame command pool: {:?}", e);
                    Error::InitializationFailed(format!(
                        "Failed to create frame command pool: {:?}",
                        e
                    ))
                })?;

            let alloc_info = vk::CommandBufferAllocateInfo::default()
                .command_pool(self.frame_command_pool)
                .level(vk::CommandBufferLevel::PRIMARY)
                .command_buffer_count(1);

            self.frame_command_buffer = self
                .device
                .allocate_command_buffers(&alloc_info)
                .map_err(|e| {
                    engine_error!(SOURCE, "Failed to allocate frame command buffer: {:?}", e);
                    Error::InitializationFailed(format!(
                        "Failed to allocate frame command buffer: {:?}",
                        e
                    ))
                })?[0];
        }

        engine_info!(SOURCE, "Vulkan renderer initialized");
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        self.viewport = Some(PendingViewport {
            x,
            y,
            width,
            height,
        });
        engine_trace!(SOURCE, "Viewport set to {}x{} at ({}, {})", width, height, x, y);
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) -> Result<()> {
        self.clear_color = color;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.draw_queue.push(DrawCommand::Clear {
            color: self.clear_color,
        });
        Ok(())
    }

    fn draw_indexed(&mut self, vertex_array: &Arc<VertexArray>, index_count: u32) -> Result<()> {
        let effective = if index_count == 0 {
            vertex_array.index_count()
        } else {
            if vertex_array.index_buffer().is_none() {
                return Err(Error::InvalidResource(
                    "draw_indexed requires an index buffer".to_string(),
                ));
            }
            index_count
        };

        // Empty geometry draws nothing
        if effective == 0 {
            return Ok(());
        }

        self.draw_queue.push(DrawCommand::DrawIndexed {
            vertex_array: Arc::clone(vertex_array),
            index_count: effective,
        });
        Ok(())
    }

    fn draw_indexed_instanced(
        &mut self,
        _vertex_array: &Arc<VertexArray>,
        _index_count: u32,
        _instance_count: u32,
    ) -> Result<()> {
        Err(Error::Unsupported(
            "instanced drawing on the Vulkan backend".to_string(),
        ))
    }

    fn create_vertex_buffer(&mut self, size: u64) -> Result<Arc<dyn VertexBuffer>> {
        Ok(Arc::new(VulkanVertexBuffer::new(
            Arc::clone(&self.gpu_context),
            size,
        )?))
    }

    fn create_vertex_buffer_with_data(&mut self, data: &[u8]) -> Result<Arc<dyn VertexBuffer>> {
        Ok(Arc::new(VulkanVertexBuffer::with_data(
            Arc::clone(&self.gpu_context),
            data,
        )?))
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        Ok(Arc::new(VulkanIndexBuffer::with_indices(
            Arc::clone(&self.gpu_context),
            indices,
        )?))
    }

    fn create_uniform_buffer(&mut self, size: u64) -> Result<Arc<dyn UniformBuffer>> {
        Ok(Arc::new(VulkanUniformBuffer::new(
            Arc::clone(&self.gpu_context),
            size,
        )?))
    }
}

impl Drop for VulkanRendererApi {
    fn drop(&mut self) {
        unsafe {
            // Wait for device to finish
            self.device.device_wait_idle().ok();

            // Queued commands hold Arc<VertexArray> references; release them
            // while the device is still alive
            let _ = self.draw_queue.drain();

            // 1. Destroy frame command pool (frees its command buffer)
            if self.frame_command_pool != vk::CommandPool::null() {
                self.device.destroy_command_pool(self.frame_command_pool, None);
            }

            // 2. Destroy upload command pool from GpuContext
            {
                let mut pool = self.gpu_context.upload_command_pool.lock().unwrap();
                if *pool != vk::CommandPool::null() {
                    self.device.destroy_command_pool(*pool, None);
                    *pool = vk::CommandPool::null();
                }
            }

            // 3. Destroy debug messenger BEFORE device and instance
            #[cfg(feature = "vulkan-validation")]
            if let Some((debug_utils, messenger)) = &self.debug {
                debug_utils.destroy_debug_utils_messenger(*messenger, None);
            }

            // 4. Destroy device and instance
            self.device.destroy_device(None);
            self.instance.destroy_instance(None);
        }
    }
}
