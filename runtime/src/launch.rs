//! Emission and the launch front door.

use std::sync::Arc;

use smallvec::SmallVec;
use snafu::{ResultExt, ensure};
use strela_device::{
    ArgValue, CallArg, ContextProvider, DeviceCompiler, DeviceMemory, ExecutionQueue, FunctionId, LaunchConfig,
    NativeEntry,
};
use strela_dtype::ArgType;
use tracing::debug;

use crate::cache::{CacheKey, CompiledFunctionCache};
use crate::error::{
    InvokeSnafu, OversizedArgumentSnafu, Result, UnrepresentableTypeSnafu, ZeroSizedArgumentSnafu,
};
use crate::plan::{ArgSpec, CallPlan, PassMode, REGISTER_BUDGET, plan};
use crate::staging::stage;

impl ArgSpec {
    /// Materialize the staged value as a concrete call argument.
    ///
    /// Only meaningful after staging; by then every `Indirect` value is a
    /// device handle.
    fn materialize(&self) -> CallArg {
        match (self.pass, &self.value) {
            (PassMode::Direct, ArgValue::Scalar(s)) => CallArg::Scalar(*s),
            (PassMode::Direct, ArgValue::Composite(bytes)) => CallArg::Bytes(SmallVec::from_slice(bytes)),
            (PassMode::Direct | PassMode::Indirect, ArgValue::DevicePtr(ptr)) => CallArg::Ptr(*ptr),
            (pass, value) => unreachable!("argument value {value:?} does not match its pass mode {pass:?}"),
        }
    }
}

/// Validate the concrete argument list against ABI policy and issue one
/// native invocation.
///
/// Every non-ghost call type must have a known pointer-free layout, a
/// size strictly greater than zero, and a size within the register
/// budget. Any violation aborts before the call is issued.
pub fn emit(queue: &dyn ExecutionQueue, entry: &NativeEntry, config: &LaunchConfig, plan: &CallPlan) -> Result<()> {
    let mut args: SmallVec<[CallArg; 8]> = SmallVec::new();

    for (index, spec) in plan.args.iter().enumerate() {
        let Some(call_ty) = spec.call_type() else {
            // Ghosts are specialized against, never materialized.
            continue;
        };

        ensure!(call_ty.pointer_free(), UnrepresentableTypeSnafu { ty: call_ty.clone() });
        let size = call_ty.size();
        ensure!(size > 0, ZeroSizedArgumentSnafu { index });
        ensure!(size <= REGISTER_BUDGET, OversizedArgumentSnafu { index, size, budget: REGISTER_BUDGET });

        args.push(spec.materialize());
    }

    debug!(
        handle = entry.handle(),
        grid = ?config.grid,
        block = ?config.block,
        stream = ?config.stream,
        args = args.len(),
        "issuing native invocation"
    );
    queue.invoke(entry, config, &args).context(InvokeSnafu)
}

/// The launch front door.
///
/// Owns the injected collaborators and the compiled entry cache; every
/// call runs plan → stage → compile-or-fetch → emit on the calling
/// thread.
pub struct Launcher {
    memory: Arc<dyn DeviceMemory>,
    compiler: Arc<dyn DeviceCompiler>,
    queue: Arc<dyn ExecutionQueue>,
    contexts: Arc<dyn ContextProvider>,
    cache: CompiledFunctionCache,
}

impl Launcher {
    pub fn new(
        memory: Arc<dyn DeviceMemory>,
        compiler: Arc<dyn DeviceCompiler>,
        queue: Arc<dyn ExecutionQueue>,
        contexts: Arc<dyn ContextProvider>,
    ) -> Self {
        Self { memory, compiler, queue, contexts, cache: CompiledFunctionCache::new() }
    }

    pub fn cache(&self) -> &CompiledFunctionCache {
        &self.cache
    }

    /// Invoke `function` with host-level argument values.
    ///
    /// Errors surface synchronously and abort the call before any device
    /// invocation; staged memory already allocated by an aborted call is
    /// not reclaimed.
    pub fn launch(
        &self,
        config: &LaunchConfig,
        function: &FunctionId,
        args: Vec<(ArgValue, ArgType)>,
    ) -> Result<()> {
        debug!(function = %function, args = args.len(), "launch");

        let planned = plan(args)?;
        let staged = stage(planned, self.memory.as_ref())?;

        let context = self.contexts.current();
        let signature = staged.codegen_signature();
        let key = CacheKey::new(function.clone(), &signature, context);
        let device = self.contexts.device_of(context);
        let entry = self
            .cache
            .get_or_compile(key, || self.compiler.compile(device, function, &signature))?;

        emit(self.queue.as_ref(), &entry, config, &staged)
    }
}
