pub mod classify;
pub mod error;

#[cfg(test)]
mod test;

pub use classify::classify;
pub use error::{Error, Result};

/// Size of a device word in bytes.
///
/// Pointers and array descriptors materialize as one device word at the
/// call boundary, and the register-fit budget is expressed in this unit.
pub const DEVICE_WORD_BYTES: usize = 8;

/// Scalar data types (base numeric types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::EnumIter, strum::VariantArray)]
pub enum ScalarType {
    Bool,

    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,

    Float32,
    Float64,
}

impl ScalarType {
    pub const fn bytes(&self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Int8 => 1,
            Self::UInt8 => 1,
            Self::Int16 => 2,
            Self::UInt16 => 2,
            Self::Int32 => 4,
            Self::UInt32 => 4,
            Self::Int64 => 8,
            Self::UInt64 => 8,
            Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Natural alignment; scalars are self-aligned on every supported device.
    pub const fn align(&self) -> usize {
        self.bytes()
    }

    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64)
    }

    pub const fn is_int(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub const fn c_style(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "signed char",
            Self::Int16 => "short",
            Self::Int32 => "int",
            Self::Int64 => "long",
            Self::UInt8 => "unsigned char",
            Self::UInt16 => "unsigned short",
            Self::UInt32 => "unsigned int",
            Self::UInt64 => "unsigned long",
            Self::Float32 => "float",
            Self::Float64 => "double",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.c_style())
    }
}

/// In-memory layout of a named aggregate.
///
/// `pointer_free` records whether the layout is fully known and free of
/// host references; only pointer-free layouts are device-representable.
/// A zero-size immutable composite is a ghost: it participates in
/// specialization but is never materialized as a call argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeLayout {
    pub name: String,
    pub size: usize,
    pub align: usize,
    pub pointer_free: bool,
    pub immutable: bool,
}

impl CompositeLayout {
    pub fn new(name: impl Into<String>, size: usize, align: usize) -> Self {
        Self { name: name.into(), size, align, pointer_free: true, immutable: false }
    }

    /// Zero-size immutable marker type.
    pub fn marker(name: impl Into<String>) -> Self {
        Self { name: name.into(), size: 0, align: 1, pointer_free: true, immutable: true }
    }

    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// Mark the layout as containing host references, which makes it
    /// unrepresentable on a device.
    pub fn with_host_refs(mut self) -> Self {
        self.pointer_free = false;
        self
    }

    pub fn is_ghost(&self) -> bool {
        self.size == 0 && self.immutable
    }
}

/// Source argument types, as seen at a call site.
///
/// This is a closed enumeration: every type a host value can carry into a
/// launch is one of these variants, and classification is a total match
/// over them rather than open-ended runtime inspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgType {
    Scalar(ScalarType),
    Composite(CompositeLayout),
    /// Device-resident pointer wrapper parameterized by element type.
    DevicePtr { elem: Box<ArgType> },
    /// Device array wrapper. Element type and rank are type-level
    /// parameters carried into the specialized signature.
    DeviceArray { elem: ScalarType, ndim: usize },
    /// Raw host pointer. Never representable across the boundary.
    HostPtr,
}

impl ArgType {
    pub fn device_ptr(elem: ArgType) -> Self {
        Self::DevicePtr { elem: Box::new(elem) }
    }

    pub fn device_array(elem: ScalarType, ndim: usize) -> Self {
        Self::DeviceArray { elem, ndim }
    }
}

/// Device-representable types: what a compiled routine is specialized
/// against, and what may be materialized at the call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Scalar(ScalarType),
    Composite(CompositeLayout),
    /// Raw device pointer.
    Ptr { elem: Box<DeviceType> },
    /// Raw device array descriptor. The materialized payload is the base
    /// device address only; element type and rank shape the specialized
    /// signature, not the call payload.
    ArrayDescriptor { elem: ScalarType, ndim: usize },
}

impl DeviceType {
    pub fn ptr(elem: DeviceType) -> Self {
        Self::Ptr { elem: Box::new(elem) }
    }

    /// Materialized size at the call boundary, in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Scalar(s) => s.bytes(),
            Self::Composite(c) => c.size,
            Self::Ptr { .. } | Self::ArrayDescriptor { .. } => DEVICE_WORD_BYTES,
        }
    }

    pub fn align(&self) -> usize {
        match self {
            Self::Scalar(s) => s.align(),
            Self::Composite(c) => c.align,
            Self::Ptr { .. } | Self::ArrayDescriptor { .. } => DEVICE_WORD_BYTES,
        }
    }

    /// Whether the in-memory layout is fully known and pointer-free.
    pub fn pointer_free(&self) -> bool {
        match self {
            Self::Composite(c) => c.pointer_free,
            _ => true,
        }
    }

    /// Immutable and zero-sized: specialized against, never materialized.
    pub fn is_ghost(&self) -> bool {
        matches!(self, Self::Composite(c) if c.is_ghost())
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Composite(c) => f.write_str(&c.name),
            Self::Ptr { elem } => write!(f, "{elem}*"),
            Self::ArrayDescriptor { elem, ndim } => write!(f, "{elem}[{ndim}]"),
        }
    }
}
