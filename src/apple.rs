//! Apple toolchain primitives.
//!
//! Debug output goes to stdout; the debugger trap is the architecture's
//! breakpoint instruction, which stops under a debugger and raises SIGTRAP
//! otherwise.

#[cfg(normalise_debug_print = "stdout")]
pub(crate) fn print_stdout(args: std::fmt::Arguments<'_>) {
    use std::io::Write;

    let mut out = std::io::stdout().lock();
    // Nothing useful to do if stdout is gone
    let _ = out.write_fmt(args);
    let _ = out.flush();
}

#[cfg(all(normalise_breakpoint = "trap-int3", any(target_arch = "x86", target_arch = "x86_64")))]
#[inline(always)]
pub(crate) fn trap_int3() {
    unsafe { core::arch::asm!("int3", options(nomem, nostack)) }
}

#[cfg(all(normalise_breakpoint = "trap-brk", target_arch = "aarch64"))]
#[inline(always)]
pub(crate) fn trap_brk() {
    // Same immediate clang uses for __builtin_debugtrap
    unsafe { core::arch::asm!("brk #0xf000", options(nomem, nostack)) }
}
