//! Runtime argument values, one variant per source type variant.

use smallvec::SmallVec;
use strela_dtype::ScalarType;

use crate::handle::DevicePtr;

/// A host-side scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
}

impl ScalarValue {
    pub const fn scalar_type(&self) -> ScalarType {
        match self {
            Self::Bool(_) => ScalarType::Bool,
            Self::Int8(_) => ScalarType::Int8,
            Self::UInt8(_) => ScalarType::UInt8,
            Self::Int16(_) => ScalarType::Int16,
            Self::UInt16(_) => ScalarType::UInt16,
            Self::Int32(_) => ScalarType::Int32,
            Self::UInt32(_) => ScalarType::UInt32,
            Self::Int64(_) => ScalarType::Int64,
            Self::UInt64(_) => ScalarType::UInt64,
            Self::Float32(_) => ScalarType::Float32,
            Self::Float64(_) => ScalarType::Float64,
        }
    }

    /// Little-endian byte image, sized `self.scalar_type().bytes()`.
    pub fn to_bytes(&self) -> SmallVec<[u8; 8]> {
        match self {
            Self::Bool(v) => SmallVec::from_slice(&[*v as u8]),
            Self::Int8(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::UInt8(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::Int16(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::UInt16(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::Int32(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::UInt32(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::Int64(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::UInt64(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::Float32(v) => SmallVec::from_slice(&v.to_le_bytes()),
            Self::Float64(v) => SmallVec::from_slice(&v.to_le_bytes()),
        }
    }
}

/// A host-level argument value, prior to planning.
///
/// Mirrors `strela_dtype::ArgType` variant for variant; the planner pairs
/// each value with its declared source type.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Scalar(ScalarValue),
    /// Byte image of a composite value, in declaration layout.
    Composite(Box<[u8]>),
    /// Value of a device-resident pointer wrapper.
    DevicePtr(DevicePtr),
    /// Value of a device array wrapper: the base address. Element type and
    /// rank live in the type, not the value.
    DeviceArray { base: DevicePtr },
    /// Raw host address. Classification rejects the type before the value
    /// is ever consumed.
    HostPtr(usize),
    /// Value of a zero-size type.
    Unit,
}

impl ArgValue {
    /// Realize the device representation of this value.
    ///
    /// Classification may narrow a wrapper type to its raw device type;
    /// the matching value change is an unchecked reinterpretation of the
    /// pointer-like payload. All other values are already in device
    /// representation.
    pub fn device_repr(self) -> ArgValue {
        match self {
            ArgValue::DeviceArray { base } => ArgValue::DevicePtr(base),
            other => other,
        }
    }

    /// Byte image of the value as device code will read it. Used when a
    /// value must be staged into device memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            ArgValue::Scalar(s) => s.to_bytes().to_vec(),
            ArgValue::Composite(bytes) => bytes.to_vec(),
            ArgValue::DevicePtr(ptr) => ptr.addr().to_le_bytes().to_vec(),
            ArgValue::DeviceArray { base } => base.addr().to_le_bytes().to_vec(),
            ArgValue::HostPtr(addr) => addr.to_le_bytes().to_vec(),
            ArgValue::Unit => Vec::new(),
        }
    }
}

/// A concrete argument materialized at the invocation boundary.
///
/// Ghosts are already elided; every `CallArg` occupies at most one device
/// word.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    Scalar(ScalarValue),
    Ptr(DevicePtr),
    /// Register-fit composite passed by value.
    Bytes(SmallVec<[u8; 8]>),
}

impl CallArg {
    pub fn size(&self) -> usize {
        match self {
            Self::Scalar(s) => s.scalar_type().bytes(),
            Self::Ptr(_) => std::mem::size_of::<u64>(),
            Self::Bytes(bytes) => bytes.len(),
        }
    }

    /// Owned byte image for native marshaling. Each argument's bytes are
    /// what the `void**` parameter slot points at.
    pub fn as_bytes(&self) -> SmallVec<[u8; 8]> {
        match self {
            Self::Scalar(s) => s.to_bytes(),
            Self::Ptr(ptr) => SmallVec::from_slice(&ptr.addr().to_le_bytes()),
            Self::Bytes(bytes) => bytes.clone(),
        }
    }
}
