//! Argument planning: derive the codegen and call representation of every
//! argument at a call site.
//!
//! A plan is recomputed for every call and never cached; only the
//! compiled entry derived from its codegen signature is.

use smallvec::SmallVec;
use snafu::{ResultExt, ensure};
use strela_device::ArgValue;
use strela_dtype::{ArgType, DEVICE_WORD_BYTES, DeviceType, classify};
use tracing::trace;

use crate::error::{ClassifySnafu, Result, UnrepresentableTypeSnafu};

/// Maximum size, in bytes, a value may have to be passed directly rather
/// than by pointer indirection.
pub const REGISTER_BUDGET: usize = DEVICE_WORD_BYTES;

/// How a planned argument reaches the call boundary.
///
/// Exactly one mode holds per argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// Immutable and zero-sized: contributes to the codegen signature but
    /// is never materialized at the call boundary.
    Ghost,
    /// Fits the register budget: the call type equals the codegen type.
    Direct,
    /// Exceeds the register budget: passed as a pointer to a staged
    /// device-resident copy.
    Indirect,
}

/// Planned descriptor for one argument.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub source: ArgType,
    pub codegen: DeviceType,
    pub pass: PassMode,
    pub value: ArgValue,
}

impl ArgSpec {
    /// The type materialized at the call boundary; `None` for ghosts.
    pub fn call_type(&self) -> Option<DeviceType> {
        match self.pass {
            PassMode::Ghost => None,
            PassMode::Direct => Some(self.codegen.clone()),
            PassMode::Indirect => Some(DeviceType::ptr(self.codegen.clone())),
        }
    }
}

/// An ordered call plan: descriptors plus the signatures derived from
/// them.
#[derive(Debug, Clone)]
pub struct CallPlan {
    pub args: SmallVec<[ArgSpec; 8]>,
}

impl CallPlan {
    /// Ordered codegen types of every argument, ghosts included. This is
    /// what the compiled routine is specialized against.
    pub fn codegen_signature(&self) -> Vec<DeviceType> {
        self.args.iter().map(|spec| spec.codegen.clone()).collect()
    }

    /// Ordered call types of the non-ghost arguments: what is actually
    /// materialized at the boundary.
    pub fn call_signature(&self) -> Vec<DeviceType> {
        self.args.iter().filter_map(ArgSpec::call_type).collect()
    }
}

/// Plan a call site's ordered `(value, source type)` pairs.
///
/// Per argument: classify the source type, require a pointer-free layout,
/// elide zero-size immutable values, and decide direct versus by-pointer
/// passing against the register budget. Any failure aborts the whole
/// plan.
pub fn plan(args: Vec<(ArgValue, ArgType)>) -> Result<CallPlan> {
    let mut specs: SmallVec<[ArgSpec; 8]> = SmallVec::with_capacity(args.len());

    for (value, source) in args {
        let codegen = classify(&source).context(ClassifySnafu)?;
        ensure!(codegen.pointer_free(), UnrepresentableTypeSnafu { ty: codegen.clone() });

        let pass = if codegen.is_ghost() {
            PassMode::Ghost
        } else if codegen.size() <= REGISTER_BUDGET {
            PassMode::Direct
        } else {
            PassMode::Indirect
        };

        trace!(source = ?source, codegen = %codegen, pass = ?pass, "planned argument");

        // Classification may have narrowed a wrapper type; realize the
        // matching representation change on the value.
        let value = value.device_repr();
        specs.push(ArgSpec { source, codegen, pass, value });
    }

    Ok(CallPlan { args: specs })
}
