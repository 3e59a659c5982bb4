/// DrawQueue - deferred draw submission for the Vulkan backend
///
/// The Vulkan backend cannot encode a draw the moment it is requested: it
/// needs the frame's command buffer, which only exists between frame begin
/// and end. Draw and clear requests are queued here in call order and
/// drained when the frame is recorded.

use std::sync::{Arc, Mutex};

use glam::Vec4;
use polaris_engine::polaris::render::VertexArray;

/// One deferred rendering command
pub enum DrawCommand {
    /// Clear the active render target with `color`
    Clear { color: Vec4 },
    /// Draw `index_count` indices from `vertex_array`
    ///
    /// `index_count` is already resolved: 0 never reaches the queue.
    DrawIndexed {
        vertex_array: Arc<VertexArray>,
        index_count: u32,
    },
}

/// FIFO queue of commands waiting for the next recorded frame
#[derive(Default)]
pub struct DrawQueue {
    commands: Mutex<Vec<DrawCommand>>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command in call order
    pub fn push(&self, command: DrawCommand) {
        self.commands.lock().unwrap().push(command);
    }

    /// Take all queued commands, leaving the queue empty
    pub fn drain(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.lock().unwrap().len()
    }

    /// Whether no commands are queued
    pub fn is_empty(&self) -> bool {
        self.commands.lock().unwrap().is_empty()
    }
}
