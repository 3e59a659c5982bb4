/// VertexArray - geometry aggregation referenced by draw calls

use std::sync::Arc;

use crate::renderer::{IndexBuffer, VertexBuffer};

/// Vertex buffers plus an optional index buffer, drawn as one unit
///
/// A `VertexArray` owns no GPU state of its own; it is a grouping the
/// backend walks when recording a draw. Built once, then shared with draw
/// calls as `Arc<VertexArray>`.
#[derive(Default)]
pub struct VertexArray {
    vertex_buffers: Vec<Arc<dyn VertexBuffer>>,
    index_buffer: Option<Arc<dyn IndexBuffer>>,
}

impl VertexArray {
    /// Create an empty vertex array
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a vertex buffer
    ///
    /// Buffers are bound in attachment order.
    pub fn add_vertex_buffer(&mut self, buffer: Arc<dyn VertexBuffer>) {
        self.vertex_buffers.push(buffer);
    }

    /// Set the index buffer, replacing any previous one
    pub fn set_index_buffer(&mut self, buffer: Arc<dyn IndexBuffer>) {
        self.index_buffer = Some(buffer);
    }

    /// Attached vertex buffers in attachment order
    pub fn vertex_buffers(&self) -> &[Arc<dyn VertexBuffer>] {
        &self.vertex_buffers
    }

    /// The index buffer, if one has been set
    pub fn index_buffer(&self) -> Option<&Arc<dyn IndexBuffer>> {
        self.index_buffer.as_ref()
    }

    /// Index count of the attached index buffer, 0 when none is set
    pub fn index_count(&self) -> u32 {
        self.index_buffer.as_ref().map_or(0, |ib| ib.count())
    }
}
