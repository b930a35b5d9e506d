use crate::contract::DeviceMemory;
use crate::error::Error;
use crate::handle::DevicePtr;
use crate::host::HostStagingMemory;

#[test]
fn upload_round_trips() {
    let memory = HostStagingMemory::new();
    let ptr = memory.alloc(16).unwrap();
    let payload: Vec<u8> = (0u8..16).collect();
    memory.upload(ptr, &payload).unwrap();
    assert_eq!(memory.read(ptr, 16).unwrap(), payload);
}

#[test]
fn allocations_are_distinct() {
    let memory = HostStagingMemory::new();
    let a = memory.alloc(8).unwrap();
    let b = memory.alloc(8).unwrap();
    assert_ne!(a, b);
    assert_eq!(memory.allocation_count(), 2);
}

#[test]
fn zero_size_allocations_still_get_addresses() {
    let memory = HostStagingMemory::new();
    let a = memory.alloc(0).unwrap();
    let b = memory.alloc(0).unwrap();
    assert_ne!(a, b);
}

#[test]
fn upload_to_unknown_address_fails() {
    let memory = HostStagingMemory::new();
    let result = memory.upload(DevicePtr::new(0xdead), &[1, 2, 3]);
    assert!(matches!(result, Err(Error::UploadFailure { .. })));
}

#[test]
fn oversized_upload_fails() {
    let memory = HostStagingMemory::new();
    let ptr = memory.alloc(4).unwrap();
    let result = memory.upload(ptr, &[0u8; 8]);
    assert!(matches!(result, Err(Error::UploadFailure { .. })));
}
