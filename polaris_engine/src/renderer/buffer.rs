/// GPU buffer resource traits - vertex, index, and uniform buffers
///
/// Buffers are created through the `RendererApi` factory operations and are
/// shared as `Arc<dyn ...>`. Writes take `&self`: interior synchronization is
/// the backend's responsibility.

use crate::error::Result;

/// Vertex buffer resource
///
/// Device-local storage for vertex data. Uploads on backends with discrete
/// memory (Vulkan) go through a staging buffer and block until the GPU copy
/// finishes, so the caller's slice can be reused immediately.
pub trait VertexBuffer: Send + Sync {
    /// Replace the buffer contents with `data`
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeExceeded`](crate::polaris::Error::SizeExceeded)
    /// if `data` is larger than the size the buffer was created with.
    fn set_data(&self, data: &[u8]) -> Result<()>;

    /// Write `data` at byte `offset` without touching the rest of the buffer
    ///
    /// Backends without a partial-update path reject this with
    /// [`Error::Unsupported`](crate::polaris::Error::Unsupported).
    fn set_sub_data(&self, data: &[u8], offset: u64) -> Result<()>;

    /// Size in bytes the buffer was created with
    fn size(&self) -> u64;
}

/// Index buffer resource
///
/// Indices are always 32-bit. The element count tracks the most recent
/// upload and is what `draw_indexed` uses when asked for the full buffer.
pub trait IndexBuffer: Send + Sync {
    /// Replace the buffer contents with `indices` and update the count
    fn set_data(&self, indices: &[u32]) -> Result<()>;

    /// Write `indices` at element `offset` without changing the count
    fn set_sub_data(&self, indices: &[u32], offset: u64) -> Result<()>;

    /// Number of indices currently in the buffer
    fn count(&self) -> u32;

    /// Size in bytes the buffer was created with
    fn size(&self) -> u64;
}

/// Uniform buffer resource
///
/// Host-visible and persistently mapped. Besides the immediate `set_data`
/// path, writes can be queued with `enqueue_data` and applied one per frame
/// with `apply_next`, in FIFO order.
pub trait UniformBuffer: Send + Sync {
    /// Write `data` to the mapped memory immediately
    fn set_data(&self, data: &[u8]) -> Result<()>;

    /// Queue `data` to be applied by a later `apply_next` call
    fn enqueue_data(&self, data: &[u8]) -> Result<()>;

    /// Apply the oldest queued write, if any
    ///
    /// No-op when the queue is empty.
    fn apply_next(&self) -> Result<()>;

    /// Number of queued writes not yet applied
    fn pending_writes(&self) -> usize;

    /// Size in bytes the buffer was created with
    fn size(&self) -> u64;
}
