use snafu::Snafu;

use crate::handle::DevicePtr;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by device collaborators.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Compiler collaborator rejected the specialized signature.
    #[snafu(display("compilation of '{function}' failed: {reason}"))]
    CompilationFailure { function: String, reason: String },

    #[snafu(display("device allocation of {size} bytes failed: {reason}"))]
    AllocationFailure { size: usize, reason: String },

    #[snafu(display("upload of {size} bytes to {ptr:?} failed: {reason}"))]
    UploadFailure { ptr: DevicePtr, size: usize, reason: String },

    #[snafu(display("native invocation failed: {reason}"))]
    InvocationFailure { reason: String },

    #[cfg(feature = "cuda")]
    #[snafu(display("CUDA error: {source}"))]
    Cuda { source: cudarc::driver::DriverError },
}
