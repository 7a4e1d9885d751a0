//! normalise - portable low-level annotations and debug facilities
//!
//! One set of macros for "restrict this reference", "force-inline this
//! function", "never inline this function", "name the enclosing function",
//! "discard this value", "print a debug message", "break into the debugger"
//! and "assert a condition in debug builds only", selected per compiler,
//! OS, architecture and build mode at compile time.
//!
//! ## How it resolves
//!
//! - **Classifier** (`build.rs`): target vendor, toolchain, OS, architecture,
//!   compiler version and the debug marker become normalized flags
//! - **Facility table**: layered, guarded definitions per flag combination
//! - **Fallback**: every facility still undefined gets a neutral definition
//!
//! | Facility | Apple | Microsoft | Anything else |
//! |----------|-------|-----------|---------------|
//! | `restrict!` | exclusive reborrow | exclusive reborrow | plain reborrow |
//! | `force_inline!` / `never_inline!` | `#[inline(always/never)]` | same | no attribute |
//! | `pretty_function!` | enclosing fn path | same | module path |
//! | `breakpoint!` (debug) | `int3` / `brk` | `DebugBreak()` | nothing |
//! | `debug_print!` (debug) | stdout | `OutputDebugStringA` | nothing |
//! | `debug_line!` (debug) | timestamp + `debug_print!` | same | nothing |
//! | `errorif!` (debug) | `debug_print!` + `breakpoint!` | same | nothing |
//!
//! `ignore_unused!` is the same everywhere. Linux is recognized but its
//! branch is reserved, so it gets the neutral column.
//!
//! ## Build mode
//!
//! Debug when `debug_assertions` is on. Set `NORMALISE_BUILD_MODE=debug` or
//! `release` at build time to override. Neutral facilities cost nothing at
//! runtime and their call sites still type-check.
//!
//! ```
//! use normalise::{debug_line, errorif, force_inline};
//!
//! force_inline! {
//!     fn scale(x: f32) -> f32 { x * 2.0 }
//! }
//!
//! let y = scale(1.5);
//! debug_line!("scaled to {}", y);
//! errorif!(y.is_nan(), "scale produced NaN from {}", 1.5);
//! ```

mod macros;

pub mod config;
pub mod env;
pub mod error;
pub mod facility;
pub mod report;
pub mod resolve;
pub mod simulate;
pub mod sink;

#[cfg(normalise_os = "macos")]
mod apple;
#[cfg(all(windows, normalise_os = "windows"))]
mod win32;

// Re-exports
pub use config::SignalProfile;
pub use error::{NormaliseError, NormaliseResult};
pub use report::{Report, ReportFormat};
pub use resolve::{
    classify, ArchFamily, BuildMode, Definition, Edition, Environment, Facility, FacilityTable,
    LanguageTiers, Layer, OsFamily, RustcVersion, Signals,
};
pub use sink::{DebugTarget, Host, NullTarget, HOST};
