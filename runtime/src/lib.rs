//! Launch pipeline for device functions.
//!
//! A host-level call reaches a native device invocation in four phases:
//! plan (derive codegen and call representations per argument), stage
//! (materialize device copies for by-pointer arguments), compile-or-fetch
//! (at most one compilation per distinct call shape, process-wide), and
//! emit (validate the concrete argument list and issue one invocation).
//!
//! Planning and emission validation are pure and per-call; the compiled
//! entry cache is the only shared mutable state.

pub mod cache;
pub mod error;
pub mod launch;
pub mod plan;
pub mod staging;
pub mod warp;


pub use cache::{CacheKey, CompiledFunctionCache};
pub use error::{Error, Result};
pub use launch::{Launcher, emit};
pub use plan::{ArgSpec, CallPlan, PassMode, REGISTER_BUDGET, plan};
pub use staging::stage;
pub use warp::{align_down, align_up};
