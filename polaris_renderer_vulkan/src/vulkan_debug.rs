/// Vulkan validation layer support (feature "vulkan-validation")
///
/// Routes VK_LAYER_KHRONOS_validation messages into the engine log so
/// validation output carries the same format and severity handling as the
/// rest of the backend.

use std::ffi::CStr;

use ash::vk;
use polaris_engine::engine_err;
use polaris_engine::polaris::Result;
use polaris_engine::{engine_debug, engine_error, engine_info, engine_warn};

const SOURCE: &str = "polaris::vulkan::validation";

/// Message callback handed to the debug messenger
pub(crate) unsafe extern "system" fn vulkan_debug_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    _message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    if p_callback_data.is_null() {
        return vk::FALSE;
    }

    let data = &*p_callback_data;
    let message = if data.p_message.is_null() {
        "<no message>".to_string()
    } else {
        CStr::from_ptr(data.p_message).to_string_lossy().into_owned()
    };

    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        engine_error!(SOURCE, "{}", message);
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        engine_warn!(SOURCE, "{}", message);
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        engine_info!(SOURCE, "{}", message);
    } else {
        engine_debug!(SOURCE, "{}", message);
    }

    // Never abort the triggering Vulkan call
    vk::FALSE
}

/// Create the debug messenger on an instance with debug utils enabled
pub(crate) fn create_debug_messenger(
    entry: &ash::Entry,
    instance: &ash::Instance,
) -> Result<(ash::ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)> {
    let debug_utils = ash::ext::debug_utils::Instance::new(entry, instance);

    let debug_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
        .message_severity(
            vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING,
        )
        .message_type(
            vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        )
        .pfn_user_callback(Some(vulkan_debug_callback));

    let messenger = unsafe {
        debug_utils
            .create_debug_utils_messenger(&debug_info, None)
            .map_err(|e| engine_err!(SOURCE, "Failed to create debug messenger: {:?}", e))?
    };

    Ok((debug_utils, messenger))
}
