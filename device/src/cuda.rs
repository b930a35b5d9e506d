//! cudarc-backed implementations of the collaborator contracts.
//!
//! Allocation and upload go through the CUDA driver API; compilation goes
//! through NVRTC against source registered per function. Launches use the
//! raw `cuLaunchKernel` entry point because the argument list is only
//! known at runtime.

use std::collections::HashMap;
use std::ffi::{CString, c_void};
use std::sync::Arc;

use cudarc::driver::{CudaContext, sys};
use parking_lot::Mutex;
use smallvec::SmallVec;
use snafu::ResultExt;
use strela_dtype::DeviceType;
use tracing::debug;

use crate::config::LaunchConfig;
use crate::contract::{ContextProvider, DeviceCompiler, DeviceMemory, ExecutionQueue, NativeEntry};
use crate::error::{CompilationFailureSnafu, CudaSnafu, Result};
use crate::handle::{ContextId, DeviceId, DevicePtr, FunctionId};
use crate::value::CallArg;

/// Driver-API device memory.
///
/// Staged allocations are never freed by the pipeline; they are released
/// only when the owning context is destroyed.
#[derive(Debug)]
pub struct CudaMemory {
    context: Arc<CudaContext>,
}

impl CudaMemory {
    pub fn new(context: Arc<CudaContext>) -> Self {
        Self { context }
    }
}

impl DeviceMemory for CudaMemory {
    fn alloc(&self, size: usize) -> Result<DevicePtr> {
        self.context.bind_to_thread().context(CudaSnafu)?;
        let mut dptr: sys::CUdeviceptr = 0;
        // Zero-size requests still get a distinct address.
        unsafe { sys::cuMemAlloc_v2(&mut dptr, size.max(1)) }.result().context(CudaSnafu)?;
        Ok(DevicePtr::new(dptr as u64))
    }

    fn upload(&self, dst: DevicePtr, bytes: &[u8]) -> Result<()> {
        self.context.bind_to_thread().context(CudaSnafu)?;
        unsafe {
            sys::cuMemcpyHtoD_v2(dst.addr() as sys::CUdeviceptr, bytes.as_ptr() as *const c_void, bytes.len())
        }
        .result()
        .context(CudaSnafu)
    }
}

/// NVRTC-backed compiler.
///
/// Device source is registered per function name as CUDA C with an
/// `extern "C" __global__` entry point matching the specialized call
/// signature. `compile` builds the PTX, loads it, and resolves the entry
/// point; the returned entry records the signature it was specialized
/// against.
pub struct NvrtcCompiler {
    context: Arc<CudaContext>,
    sources: Mutex<HashMap<String, String>>,
}

impl NvrtcCompiler {
    pub fn new(context: Arc<CudaContext>) -> Self {
        Self { context, sources: Mutex::new(HashMap::new()) }
    }

    /// Register the CUDA C source providing `function`.
    pub fn register_source(&self, function: &FunctionId, src: impl Into<String>) {
        self.sources.lock().insert(function.name().to_string(), src.into());
    }
}

impl DeviceCompiler for NvrtcCompiler {
    fn compile(&self, device: DeviceId, function: &FunctionId, signature: &[DeviceType]) -> Result<NativeEntry> {
        let src = self.sources.lock().get(function.name()).cloned();
        let Some(src) = src else {
            return CompilationFailureSnafu { function: function.name(), reason: "no source registered" }.fail();
        };

        debug!(function = %function, device = device.0, signature = ?signature, "compiling via nvrtc");

        let ptx = cudarc::nvrtc::compile_ptx(&src).map_err(|e| {
            CompilationFailureSnafu { function: function.name(), reason: e.to_string() }.build()
        })?;

        self.context.bind_to_thread().context(CudaSnafu)?;

        let image = CString::new(ptx.to_src()).map_err(|_| {
            CompilationFailureSnafu { function: function.name(), reason: "PTX contains an embedded nul" }.build()
        })?;
        let mut module: sys::CUmodule = std::ptr::null_mut();
        unsafe { sys::cuModuleLoadData(&mut module, image.as_ptr() as *const c_void) }
            .result()
            .context(CudaSnafu)?;

        let name = CString::new(function.name()).map_err(|_| {
            CompilationFailureSnafu { function: function.name(), reason: "function name contains a nul" }.build()
        })?;
        let mut func: sys::CUfunction = std::ptr::null_mut();
        unsafe { sys::cuModuleGetFunction(&mut func, module, name.as_ptr()) }
            .result()
            .context(CudaSnafu)?;

        Ok(NativeEntry::new(func as usize as u64, signature.to_vec()))
    }
}

/// Raw-driver execution queue.
#[derive(Debug)]
pub struct CudaQueue {
    context: Arc<CudaContext>,
}

impl CudaQueue {
    pub fn new(context: Arc<CudaContext>) -> Self {
        Self { context }
    }
}

impl ExecutionQueue for CudaQueue {
    fn invoke(&self, entry: &NativeEntry, config: &LaunchConfig, args: &[CallArg]) -> Result<()> {
        self.context.bind_to_thread().context(CudaSnafu)?;

        // Each `void**` parameter slot points at that argument's owned bytes.
        let mut storage: Vec<SmallVec<[u8; 8]>> = args.iter().map(CallArg::as_bytes).collect();
        let mut params: Vec<*mut c_void> =
            storage.iter_mut().map(|bytes| bytes.as_mut_ptr() as *mut c_void).collect();

        let stream = config.stream.map_or(std::ptr::null_mut(), |s| s.0 as usize as sys::CUstream);

        debug!(
            handle = entry.handle(),
            grid = ?config.grid,
            block = ?config.block,
            args = args.len(),
            "issuing cuLaunchKernel"
        );

        // SAFETY: the parameter array points at storage owned by this frame
        // for the duration of the call; the entry handle was produced by
        // cuModuleGetFunction on this context.
        unsafe {
            sys::cuLaunchKernel(
                entry.handle() as usize as sys::CUfunction,
                config.grid[0],
                config.grid[1],
                config.grid[2],
                config.block[0],
                config.block[1],
                config.block[2],
                config.shared_mem_bytes,
                stream,
                params.as_mut_ptr(),
                std::ptr::null_mut(),
            )
        }
        .result()
        .context(CudaSnafu)
    }
}

/// Context identity for a single bound CUDA device.
#[derive(Debug)]
pub struct CudaContextProvider {
    ordinal: u32,
}

impl CudaContextProvider {
    pub fn new(ordinal: u32) -> Self {
        Self { ordinal }
    }
}

impl ContextProvider for CudaContextProvider {
    fn current(&self) -> ContextId {
        ContextId(self.ordinal as u64)
    }

    fn device_of(&self, context: ContextId) -> DeviceId {
        DeviceId(context.0 as u32)
    }
}

/// The full collaborator set for one CUDA device ordinal.
pub struct CudaBackend {
    pub memory: Arc<CudaMemory>,
    pub compiler: Arc<NvrtcCompiler>,
    pub queue: Arc<CudaQueue>,
    pub contexts: Arc<CudaContextProvider>,
}

pub fn create_cuda_backend(ordinal: usize) -> Result<CudaBackend> {
    let context = CudaContext::new(ordinal).context(CudaSnafu)?;
    Ok(CudaBackend {
        memory: Arc::new(CudaMemory::new(Arc::clone(&context))),
        compiler: Arc::new(NvrtcCompiler::new(Arc::clone(&context))),
        queue: Arc::new(CudaQueue::new(Arc::clone(&context))),
        contexts: Arc::new(CudaContextProvider::new(ordinal as u32)),
    })
}
