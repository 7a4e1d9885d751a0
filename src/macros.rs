//! The facility macros.
//!
//! Each facility is declared twice: the platform definition under the cfg
//! value the build script resolved for it, then the neutral fallback under
//! the negation of that cfg. Exactly one of each pair is compiled, and the
//! fallback is the one left when no platform layer matched.
//!
//! Neutral forms keep every argument type-checked but never evaluate it, so a
//! call site compiles the same way in debug and release builds.

// ---------------------------------------------------------------------------
// Pointer-aliasing hint
// ---------------------------------------------------------------------------

/// Exclusive reborrow of a mutable place, marked for the optimizer as not
/// aliased.
///
/// ```
/// let mut samples = vec![0.5f32; 4];
/// let out = normalise::restrict!(&mut samples);
/// out[0] = 1.0;
/// assert_eq!(samples[0], 1.0);
/// ```
#[cfg(normalise_restrict = "noalias")]
#[macro_export]
macro_rules! restrict {
    ($place:expr $(,)?) => {
        $crate::facility::exclusive(&mut *$place)
    };
}

/// Exclusive reborrow of a mutable place, marked for the optimizer as not
/// aliased.
#[cfg(not(normalise_restrict = "noalias"))]
#[macro_export]
macro_rules! restrict {
    ($place:expr $(,)?) => {
        &mut *$place
    };
}

// ---------------------------------------------------------------------------
// Inline hints
// ---------------------------------------------------------------------------

/// Force inlining of the wrapped function.
///
/// Works on free functions and on associated functions inside `impl` blocks.
#[cfg(normalise_force_inline = "inline-always")]
#[macro_export]
macro_rules! force_inline {
    ($($item:tt)+) => {
        #[inline(always)]
        $($item)+
    };
}

/// Force inlining of the wrapped function.
#[cfg(not(normalise_force_inline = "inline-always"))]
#[macro_export]
macro_rules! force_inline {
    ($($item:tt)+) => {
        $($item)+
    };
}

/// Keep the wrapped function out of line.
#[cfg(normalise_never_inline = "inline-never")]
#[macro_export]
macro_rules! never_inline {
    ($($item:tt)+) => {
        #[inline(never)]
        $($item)+
    };
}

/// Keep the wrapped function out of line.
#[cfg(not(normalise_never_inline = "inline-never"))]
#[macro_export]
macro_rules! never_inline {
    ($($item:tt)+) => {
        $($item)+
    };
}

// ---------------------------------------------------------------------------
// Pretty function name
// ---------------------------------------------------------------------------

/// Full path of the enclosing function as a `&'static str`.
#[cfg(normalise_pretty_function = "type-name")]
#[macro_export]
macro_rules! pretty_function {
    () => {{
        fn __normalise_probe() {}
        $crate::facility::enclosing_function(::core::any::type_name_of_val(&__normalise_probe))
    }};
}

/// Path of the enclosing module; no function name is available here.
#[cfg(not(normalise_pretty_function = "type-name"))]
#[macro_export]
macro_rules! pretty_function {
    () => {
        ::core::module_path!()
    };
}

// ---------------------------------------------------------------------------
// Unused values and items
// ---------------------------------------------------------------------------

/// Evaluate an expression once and discard the value without an
/// unused-value warning. Defined by the common layer on every target.
///
/// ```
/// #[must_use]
/// fn checksum() -> u32 { 7 }
///
/// normalise::ignore_unused!(checksum());
/// ```
#[macro_export]
macro_rules! ignore_unused {
    ($value:expr $(,)?) => {{
        let _ = $value;
    }};
}

/// Silence unused-item lints on the wrapped item.
#[cfg(normalise_maybe_unused = "allow-unused")]
#[macro_export]
macro_rules! maybe_unused {
    ($($item:tt)+) => {
        #[allow(unused)]
        $($item)+
    };
}

/// Silence unused-item lints on the wrapped item.
#[cfg(not(normalise_maybe_unused = "allow-unused"))]
#[macro_export]
macro_rules! maybe_unused {
    ($($item:tt)+) => {
        $($item)+
    };
}

// ---------------------------------------------------------------------------
// Debugger break
// ---------------------------------------------------------------------------

/// Break into the debugger.
#[cfg(any(
    normalise_breakpoint = "trap-int3",
    normalise_breakpoint = "trap-brk",
    normalise_breakpoint = "debug-break"
))]
#[macro_export]
macro_rules! breakpoint {
    () => {
        $crate::facility::breakpoint(&$crate::sink::HOST)
    };
}

/// Break into the debugger. Not available in this build; does nothing.
#[cfg(not(any(
    normalise_breakpoint = "trap-int3",
    normalise_breakpoint = "trap-brk",
    normalise_breakpoint = "debug-break"
)))]
#[macro_export]
macro_rules! breakpoint {
    () => {
        ()
    };
}

// ---------------------------------------------------------------------------
// Debug output
// ---------------------------------------------------------------------------

/// Print one formatted message to the platform debug sink. No newline is
/// appended.
#[cfg(any(normalise_debug_print = "stdout", normalise_debug_print = "debug-output"))]
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)+) => {
        $crate::facility::debug_print(&$crate::sink::HOST, ::core::format_args!($($arg)+))
    };
}

/// Print one formatted message to the platform debug sink. Not available in
/// this build; arguments are type-checked and never evaluated.
#[cfg(not(any(normalise_debug_print = "stdout", normalise_debug_print = "debug-output")))]
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)+) => {{
        if false {
            $crate::facility::discard_args(::core::format_args!($($arg)+));
        }
    }};
}

/// Print a millisecond timestamp prefix, the formatted message and a line
/// break through the debug print facility.
#[cfg(normalise_debug_line = "timestamped")]
#[macro_export]
macro_rules! debug_line {
    ($($arg:tt)+) => {
        $crate::facility::debug_line(&$crate::sink::HOST, ::core::format_args!($($arg)+))
    };
}

/// Print a timestamped debug line. Not available in this build.
#[cfg(not(normalise_debug_line = "timestamped"))]
#[macro_export]
macro_rules! debug_line {
    ($($arg:tt)+) => {{
        if false {
            $crate::facility::discard_args(::core::format_args!($($arg)+));
        }
    }};
}

// ---------------------------------------------------------------------------
// Conditional assert
// ---------------------------------------------------------------------------

/// When `condition` holds, print the message with a line break and break
/// into the debugger. The message is only formatted if the condition holds.
///
/// ```
/// let frames = 3;
/// normalise::errorif!(frames > 60, "too many frames: {}", frames);
/// ```
#[cfg(normalise_errorif = "conditional-break")]
#[macro_export]
macro_rules! errorif {
    ($condition:expr, $($arg:tt)+) => {{
        if $condition {
            $crate::facility::raise(&$crate::sink::HOST, ::core::format_args!($($arg)+));
        }
    }};
}

/// Conditional assert. Not available in this build; neither the condition
/// nor the message is evaluated.
#[cfg(not(normalise_errorif = "conditional-break"))]
#[macro_export]
macro_rules! errorif {
    ($condition:expr, $($arg:tt)+) => {{
        if false {
            let _: bool = $condition;
            $crate::facility::discard_args(::core::format_args!($($arg)+));
        }
    }};
}
