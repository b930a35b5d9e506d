//! Warp-granularity rounding for thread counts.

/// Round `threads` up to the nearest multiple of `warp`.
///
/// Returns `threads` unchanged when already aligned. `warp` must be
/// nonzero; device warp sizes always are.
pub fn align_up(threads: u32, warp: u32) -> u32 {
    debug_assert!(warp > 0, "warp size must be nonzero");
    threads + (warp - threads % warp) % warp
}

/// Round `threads` down to the nearest multiple of `warp`.
pub fn align_down(threads: u32, warp: u32) -> u32 {
    debug_assert!(warp > 0, "warp size must be nonzero");
    threads - threads % warp
}
