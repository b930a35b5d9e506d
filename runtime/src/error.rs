//! Error types for the launch pipeline.

use snafu::Snafu;
use strela_dtype::DeviceType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced synchronously at the call site that triggered them.
///
/// Nothing is retried by the pipeline, and there is no partial-success
/// state: a call either fully plans, stages, compiles-or-fetches, and
/// emits, or aborts before any device invocation occurs.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Argument type cannot cross the host/device boundary.
    #[snafu(display("argument classification failed: {source}"))]
    Classify { source: strela_dtype::Error },

    /// The codegen type has no fully known pointer-free layout.
    #[snafu(display("unrepresentable type '{ty}': no known pointer-free device layout"))]
    UnrepresentableType { ty: DeviceType },

    #[snafu(display("argument staging failed: {source}"))]
    Stage { source: strela_device::Error },

    #[snafu(display("{source}"))]
    Compile { source: strela_device::Error },

    /// A non-ghost zero-size value reached emission.
    #[snafu(display("zero-sized argument at position {index} cannot be materialized"))]
    ZeroSizedArgument { index: usize },

    #[snafu(display(
        "oversized argument at position {index}: {size} bytes exceeds the {budget}-byte register budget"
    ))]
    OversizedArgument { index: usize, size: usize, budget: usize },

    #[snafu(display("native invocation failed: {source}"))]
    Invoke { source: strela_device::Error },
}
