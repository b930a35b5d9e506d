//! Host/device boundary values and collaborator contracts.
//!
//! This crate defines what crosses the boundary (handles, argument values,
//! launch configuration) and the traits the launch pipeline consumes for
//! memory allocation, compilation, context identification, and native
//! invocation. A host-memory staging backend is always available; the
//! `cuda` feature adds cudarc-backed implementations of the same traits.

pub mod config;
pub mod contract;
pub mod error;
pub mod handle;
pub mod host;
pub mod value;

#[cfg(feature = "cuda")]
pub mod cuda;

#[cfg(test)]
mod test;

pub use config::LaunchConfig;
pub use contract::{ContextProvider, DeviceCompiler, DeviceMemory, ExecutionQueue, NativeEntry};
pub use error::{Error, Result};
pub use handle::{ContextId, DeviceId, DevicePtr, FunctionId, StreamId};
pub use host::HostStagingMemory;
pub use value::{ArgValue, CallArg, ScalarValue};
