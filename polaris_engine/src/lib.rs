/*!
# Polaris Engine

Core traits and types for the Polaris rendering engine.

This crate provides the backend-agnostic rendering contract using trait-based
dynamic polymorphism. Backend implementations (Vulkan, OpenGL) live in their
own crates and are resolved exactly once at startup, either through the
plugin registry or by wrapping an externally constructed backend.

## Architecture

- **RendererApi**: the draw/clear/viewport contract plus the resource
  creation operations, implemented by each backend
- **RenderDevice**: resource factory dispatching on the resolved backend
- **VertexBuffer / IndexBuffer / UniformBuffer**: GPU buffer resource traits
- **VertexArray**: geometry aggregation referenced by draw calls
- **UniformWriteQueue**: ordered pending-write list for uniform buffers
*/

// Internal modules
mod engine;
mod error;
pub mod log;
pub mod renderer;

// Main polaris namespace module
pub mod polaris {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging host)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: engine_* macros are exported at the crate root, not here
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
