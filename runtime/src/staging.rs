//! Staging: materialize device-resident copies for by-pointer arguments.
//!
//! Every `Indirect` argument gets a fresh device allocation holding a
//! copy of its host value, and its expression is substituted with the
//! resulting handle. Direct and ghost arguments pass through unchanged.
//!
//! Staged memory is never reclaimed by this component: a staged copy must
//! outlive the asynchronous invocation it serves, and no completion point
//! is visible here. Sustained use therefore grows device memory; owners
//! needing reclamation must layer it on the memory collaborator.

use snafu::ResultExt;
use strela_device::{ArgValue, DeviceMemory};
use tracing::debug;

use crate::error::{Result, StageSnafu};
use crate::plan::{CallPlan, PassMode};

/// Substitute every by-pointer argument's value with a device handle to a
/// freshly uploaded copy.
pub fn stage(mut plan: CallPlan, memory: &dyn DeviceMemory) -> Result<CallPlan> {
    for (index, spec) in plan.args.iter_mut().enumerate() {
        if spec.pass != PassMode::Indirect {
            continue;
        }

        let size = spec.codegen.size();
        let bytes = spec.value.to_bytes();
        debug_assert_eq!(bytes.len(), size, "value byte image must match its codegen layout");

        let ptr = memory.alloc(size).context(StageSnafu)?;
        memory.upload(ptr, &bytes).context(StageSnafu)?;

        debug!(index, size, ptr = ?ptr, "staged argument");
        spec.value = ArgValue::DevicePtr(ptr);
    }

    Ok(plan)
}
