//! Win32 primitives: `OutputDebugStringA` and `DebugBreak`.

#[cfg(normalise_debug_print = "debug-output")]
pub(crate) fn output_debug_string(args: std::fmt::Arguments<'_>) {
    use ::windows::core::PCSTR;
    use ::windows::Win32::System::Diagnostics::Debug::OutputDebugStringA;

    let buf = match args.as_str() {
        Some(message) => crate::sink::ansi_buffer(message),
        None => crate::sink::ansi_buffer(&args.to_string()),
    };

    unsafe { OutputDebugStringA(PCSTR(buf.as_ptr())) };
}

#[cfg(normalise_breakpoint = "debug-break")]
#[inline(always)]
pub(crate) fn debug_break() {
    use ::windows::Win32::System::Diagnostics::Debug::DebugBreak;

    unsafe { DebugBreak() };
}
