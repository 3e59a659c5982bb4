/// Memory type selection for manual Vulkan allocations
///
/// Every buffer allocation picks its memory type here: the requirement
/// bitmask from `get_buffer_memory_requirements` filters candidate types,
/// and the requested property flags (DEVICE_LOCAL, HOST_VISIBLE, ...) must
/// all be present.

use ash::vk;
use polaris_engine::polaris::{Error, Result};

/// Find the first memory type matching `type_filter` and `required`
///
/// Scans memory types in ascending index order and returns the first one
/// whose bit is set in `type_filter` and whose property flags contain all of
/// `required`. Drivers order types so earlier entries are preferred, so
/// first-match is the right pick.
///
/// # Errors
///
/// Returns [`Error::NoSuitableMemoryType`] when no type qualifies.
pub fn find_memory_type(
    memory_properties: &vk::PhysicalDeviceMemoryProperties,
    type_filter: u32,
    required: vk::MemoryPropertyFlags,
) -> Result<u32> {
    for i in 0..memory_properties.memory_type_count {
        let type_matches = (type_filter & (1 << i)) != 0;
        let property_flags = memory_properties.memory_types[i as usize].property_flags;
        if type_matches && property_flags.contains(required) {
            return Ok(i);
        }
    }
    Err(Error::NoSuitableMemoryType)
}

#[cfg(test)]
#[path = "vulkan_memory_tests.rs"]
mod tests;
