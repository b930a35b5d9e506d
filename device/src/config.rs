//! Launch configuration.

use crate::handle::StreamId;

/// Grid and block geometry for one native invocation.
///
/// Constructed by the caller, consumed read-only by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Grid dimensions (number of blocks per axis).
    pub grid: [u32; 3],
    /// Block dimensions (threads per block per axis).
    pub block: [u32; 3],
    /// Dynamic shared memory per block, in bytes.
    pub shared_mem_bytes: u32,
    /// Target stream; `None` means the device's default stream.
    pub stream: Option<StreamId>,
}

impl LaunchConfig {
    pub fn new_1d(grid: u32, block: u32) -> Self {
        Self { grid: [grid, 1, 1], block: [block, 1, 1], ..Self::default() }
    }

    pub fn new_2d(grid: [u32; 2], block: [u32; 2]) -> Self {
        Self { grid: [grid[0], grid[1], 1], block: [block[0], block[1], 1], ..Self::default() }
    }

    pub fn new_3d(grid: [u32; 3], block: [u32; 3]) -> Self {
        Self { grid, block, ..Self::default() }
    }

    pub fn with_shared_mem(mut self, bytes: u32) -> Self {
        self.shared_mem_bytes = bytes;
        self
    }

    pub fn on_stream(mut self, stream: StreamId) -> Self {
        self.stream = Some(stream);
        self
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self { grid: [1, 1, 1], block: [1, 1, 1], shared_mem_bytes: 0, stream: None }
    }
}
