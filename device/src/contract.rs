//! Collaborator contracts consumed by the launch pipeline.
//!
//! The pipeline itself never talks to a driver: memory, compilation,
//! context identity, and native invocation are all reached through these
//! traits, injected at construction.

use strela_dtype::DeviceType;

use crate::config::LaunchConfig;
use crate::error::Result;
use crate::handle::{ContextId, DeviceId, DevicePtr, FunctionId};
use crate::value::CallArg;

/// A compiled native entry point, specialized against one codegen
/// signature.
///
/// Owned by the compiled-entry cache for the process lifetime and shared
/// out behind `Arc`; never transferred.
#[derive(Debug)]
pub struct NativeEntry {
    handle: u64,
    signature: Box<[DeviceType]>,
}

impl NativeEntry {
    pub fn new(handle: u64, signature: Vec<DeviceType>) -> Self {
        Self { handle, signature: signature.into_boxed_slice() }
    }

    pub fn handle(&self) -> u64 {
        self.handle
    }

    /// The codegen signature this entry was specialized against.
    pub fn signature(&self) -> &[DeviceType] {
        &self.signature
    }
}

/// Device memory allocation and upload, used for staging by-pointer
/// arguments.
///
/// The pipeline never frees what it allocates here: a staged copy must
/// stay valid at least for the duration of the invocation it serves, and
/// no completion point is visible to this core.
pub trait DeviceMemory: Send + Sync + std::fmt::Debug {
    fn alloc(&self, size: usize) -> Result<DevicePtr>;

    fn upload(&self, dst: DevicePtr, bytes: &[u8]) -> Result<()>;
}

/// The device compiler backend.
pub trait DeviceCompiler: Send + Sync {
    /// Compile `function` specialized against `signature` for `device`.
    ///
    /// # Errors
    ///
    /// `CompilationFailure` if the backend rejects the specialized
    /// signature. Failures are never cached by the pipeline; the next call
    /// with the same signature compiles again.
    fn compile(&self, device: DeviceId, function: &FunctionId, signature: &[DeviceType]) -> Result<NativeEntry>;
}

/// The execution queue issuing native invocations.
///
/// Invocation is asynchronous relative to the issuing host thread.
/// Invocations on one stream execute in FIFO order; ordering across
/// streams is the caller's concern.
pub trait ExecutionQueue: Send + Sync {
    fn invoke(&self, entry: &NativeEntry, config: &LaunchConfig, args: &[CallArg]) -> Result<()>;
}

/// Identifies the calling thread's execution context and its device.
pub trait ContextProvider: Send + Sync {
    fn current(&self) -> ContextId;

    fn device_of(&self, context: ContextId) -> DeviceId;
}
