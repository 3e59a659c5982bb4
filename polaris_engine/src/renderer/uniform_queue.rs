/// UniformWriteQueue - ordered pending writes for a uniform buffer
///
/// Uniform data produced ahead of the frame that will consume it is parked
/// here and drained one entry per `apply_next`, strictly in submission order.

use std::collections::VecDeque;
use std::sync::Mutex;

/// FIFO queue of pending uniform writes
///
/// Each entry is one full payload to copy into the mapped buffer. The queue
/// is internally synchronized so producers and the frame loop can share it
/// behind an `Arc` or inside a buffer object.
#[derive(Default)]
pub struct UniformWriteQueue {
    pending: Mutex<VecDeque<Vec<u8>>>,
}

impl UniformWriteQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a payload to the back of the queue
    pub fn enqueue(&self, data: &[u8]) {
        self.pending.lock().unwrap().push_back(data.to_vec());
    }

    /// Remove and return the oldest payload, or `None` when empty
    pub fn pop_next(&self) -> Option<Vec<u8>> {
        self.pending.lock().unwrap().pop_front()
    }

    /// Number of payloads waiting to be applied
    pub fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    /// Whether the queue has no pending payloads
    pub fn is_empty(&self) -> bool {
        self.pending.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
#[path = "uniform_queue_tests.rs"]
mod tests;
