//! Host-memory staging backend.
//!
//! Stands in for a real device in tests and CPU-side pipelines: each
//! allocation is a boxed byte region whose stable host address doubles as
//! the "device" address. Uploads are plain copies, and contents can be
//! read back for inspection.

use std::collections::HashMap;

use parking_lot::Mutex;
use snafu::ensure;

use crate::contract::DeviceMemory;
use crate::error::{Result, UploadFailureSnafu};
use crate::handle::DevicePtr;

#[derive(Debug, Default)]
pub struct HostStagingMemory {
    regions: Mutex<HashMap<u64, Box<[u8]>>>,
}

impl HostStagingMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read back the contents of an allocation, for inspection.
    pub fn read(&self, ptr: DevicePtr, len: usize) -> Option<Vec<u8>> {
        let regions = self.regions.lock();
        let region = regions.get(&ptr.addr())?;
        region.get(..len).map(<[u8]>::to_vec)
    }

    pub fn allocation_count(&self) -> usize {
        self.regions.lock().len()
    }
}

impl DeviceMemory for HostStagingMemory {
    fn alloc(&self, size: usize) -> Result<DevicePtr> {
        // Zero-size requests still get a distinct address.
        let region = vec![0u8; size.max(1)].into_boxed_slice();
        let addr = region.as_ptr() as u64;
        self.regions.lock().insert(addr, region);
        Ok(DevicePtr::new(addr))
    }

    fn upload(&self, dst: DevicePtr, bytes: &[u8]) -> Result<()> {
        let mut regions = self.regions.lock();
        let region = match regions.get_mut(&dst.addr()) {
            Some(region) => region,
            None => {
                return UploadFailureSnafu {
                    ptr: dst,
                    size: bytes.len(),
                    reason: "no allocation at this address".to_string(),
                }
                .fail();
            }
        };
        ensure!(
            bytes.len() <= region.len(),
            UploadFailureSnafu { ptr: dst, size: bytes.len(), reason: "exceeds allocation size".to_string() }
        );
        region[..bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}
