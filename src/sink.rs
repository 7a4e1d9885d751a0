//! Print and trap primitives behind the debug facilities.
//!
//! The exported macros always go through [`HOST`]. Its methods are selected
//! by the cfgs the build script emitted, so on targets where the table fell
//! back to neutral definitions they compile to nothing.

use std::fmt;

/// Capacity of the buffer handed to `OutputDebugStringA`, terminator included.
pub const DEBUG_OUTPUT_CAPACITY: usize = 256;

/// Where debug messages and debugger traps go.
pub trait DebugTarget {
    /// Write one formatted message. No newline is appended.
    fn print(&self, args: fmt::Arguments<'_>);

    /// Suspend execution so a debugger can inspect it.
    fn trap(&self);
}

/// Primitives resolved for this build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Host;

/// The target every exported macro writes to.
pub static HOST: Host = Host;

impl DebugTarget for Host {
    #[inline]
    fn print(&self, args: fmt::Arguments<'_>) {
        #[cfg(all(normalise_os = "macos", normalise_debug_print = "stdout"))]
        crate::apple::print_stdout(args);

        #[cfg(all(windows, normalise_os = "windows", normalise_debug_print = "debug-output"))]
        crate::win32::output_debug_string(args);

        #[cfg(not(any(normalise_debug_print = "stdout", normalise_debug_print = "debug-output")))]
        let _ = args;
    }

    #[inline]
    fn trap(&self) {
        #[cfg(all(
            normalise_os = "macos",
            normalise_breakpoint = "trap-int3",
            any(target_arch = "x86", target_arch = "x86_64")
        ))]
        crate::apple::trap_int3();

        #[cfg(all(normalise_os = "macos", normalise_breakpoint = "trap-brk", target_arch = "aarch64"))]
        crate::apple::trap_brk();

        #[cfg(all(windows, normalise_os = "windows", normalise_breakpoint = "debug-break"))]
        crate::win32::debug_break();
    }
}

/// Target that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTarget;

impl DebugTarget for NullTarget {
    #[inline(always)]
    fn print(&self, _args: fmt::Arguments<'_>) {}

    #[inline(always)]
    fn trap(&self) {}
}

/// NUL-terminated copy of `message` that fits `DEBUG_OUTPUT_CAPACITY`.
///
/// Stops at the first interior NUL and never splits a UTF-8 sequence.
#[cfg_attr(not(normalise_debug_print = "debug-output"), allow(dead_code))]
pub(crate) fn ansi_buffer(message: &str) -> Vec<u8> {
    let message = message.split('\0').next().unwrap_or("");

    let mut end = message.len().min(DEBUG_OUTPUT_CAPACITY - 1);
    while !message.is_char_boundary(end) {
        end -= 1;
    }

    let mut buf = Vec::with_capacity(end + 1);
    buf.extend_from_slice(&message.as_bytes()[..end]);
    buf.push(0);
    buf
}
