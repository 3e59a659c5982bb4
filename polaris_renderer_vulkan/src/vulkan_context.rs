/// GpuContext - Shared GPU resources for all Vulkan objects
///
/// Contains everything a buffer resource needs after device creation:
/// - Device for Vulkan API calls
/// - Cached memory properties for allocation decisions
/// - Queue for upload command submission
/// - Command pool for one-shot upload operations

use ash::vk;
use std::sync::Mutex;

/// Shared GPU context for all Vulkan resources.
///
/// This struct is shared (via `Arc`) by all GPU buffer resources to avoid
/// duplicating device/queue references in each resource.
///
/// Note: Device and instance destruction is handled by
/// VulkanRendererApi::drop() to avoid issues with drop ordering; resources
/// holding an `Arc<GpuContext>` must all be dropped before the renderer.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// Physical device the logical device was created from
    pub physical_device: vk::PhysicalDevice,

    /// Memory properties of the physical device, queried once at creation
    pub memory_properties: vk::PhysicalDeviceMemoryProperties,

    /// Graphics queue for upload command submission
    pub graphics_queue: vk::Queue,

    /// Graphics queue family index
    pub graphics_queue_family: u32,

    /// Reusable command pool for one-shot upload operations
    /// (created with TRANSIENT + RESET_COMMAND_BUFFER flags)
    pub upload_command_pool: Mutex<vk::CommandPool>,

    /// Vulkan instance (kept for reference, destroyed by VulkanRendererApi)
    #[allow(dead_code)]
    pub(crate) instance: ash::Instance,
}

impl GpuContext {
    pub fn new(
        device: ash::Device,
        physical_device: vk::PhysicalDevice,
        memory_properties: vk::PhysicalDeviceMemoryProperties,
        graphics_queue: vk::Queue,
        graphics_queue_family: u32,
        upload_command_pool: vk::CommandPool,
        instance: ash::Instance,
    ) -> Self {
        Self {
            device,
            physical_device,
            memory_properties,
            graphics_queue,
            graphics_queue_family,
            upload_command_pool: Mutex::new(upload_command_pool),
            instance,
        }
    }
}

impl Drop for GpuContext {
    fn drop(&mut self) {
        // NOTE: Device and instance destruction is handled by
        // VulkanRendererApi::drop(). This Drop impl intentionally does
        // nothing.
    }
}
