/// Renderer module - backend contract, buffer resources, and the render device

// Module declarations
pub mod buffer;
pub mod device;
pub mod renderer_api;
pub mod uniform_queue;
pub mod vertex_array;

// Re-export the contract and registry
pub use renderer_api::*;

// Re-export from other modules
pub use buffer::*;
pub use device::*;
pub use uniform_queue::*;
pub use vertex_array::*;

// Mock backend for unit tests
#[cfg(test)]
pub mod mock_renderer;
