//! Facility table: one guarded definition per facility.
//!
//! Layers run in a fixed order. A layer only fills facilities that are still
//! undefined, and the fallback layer runs last, so the finished table has
//! exactly one entry per facility.

use std::collections::BTreeMap;
use std::fmt;

use super::classify::{ArchFamily, Environment, OsFamily};

/// A named facility the crate guarantees is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facility {
    /// Pointer-aliasing hint
    Restrict,
    ForceInline,
    NeverInline,
    /// Name of the enclosing function
    PrettyFunction,
    /// Evaluate and discard a value
    IgnoreUnused,
    /// Silence unused-item lints on an item
    MaybeUnused,
    Breakpoint,
    DebugPrint,
    /// Timestamped debug line, built on `DebugPrint`
    DebugLine,
    /// Conditional assert, built on `DebugPrint` and `Breakpoint`
    ErrorIf,
}

impl Facility {
    pub const ALL: [Facility; 10] = [
        Facility::Restrict,
        Facility::ForceInline,
        Facility::NeverInline,
        Facility::PrettyFunction,
        Facility::IgnoreUnused,
        Facility::MaybeUnused,
        Facility::Breakpoint,
        Facility::DebugPrint,
        Facility::DebugLine,
        Facility::ErrorIf,
    ];

    /// Macro name the facility is exported under.
    pub fn name(&self) -> &'static str {
        match self {
            Facility::Restrict => "restrict",
            Facility::ForceInline => "force_inline",
            Facility::NeverInline => "never_inline",
            Facility::PrettyFunction => "pretty_function",
            Facility::IgnoreUnused => "ignore_unused",
            Facility::MaybeUnused => "maybe_unused",
            Facility::Breakpoint => "breakpoint",
            Facility::DebugPrint => "debug_print",
            Facility::DebugLine => "debug_line",
            Facility::ErrorIf => "errorif",
        }
    }

    /// Name of the cfg key the build script emits for this facility.
    pub fn cfg_key(&self) -> &'static str {
        match self {
            Facility::Restrict => "normalise_restrict",
            Facility::ForceInline => "normalise_force_inline",
            Facility::NeverInline => "normalise_never_inline",
            Facility::PrettyFunction => "normalise_pretty_function",
            Facility::IgnoreUnused => "normalise_ignore_unused",
            Facility::MaybeUnused => "normalise_maybe_unused",
            Facility::Breakpoint => "normalise_breakpoint",
            Facility::DebugPrint => "normalise_debug_print",
            Facility::DebugLine => "normalise_debug_line",
            Facility::ErrorIf => "normalise_errorif",
        }
    }

    /// Every definition this facility can ever resolve to.
    pub fn candidates(&self) -> &'static [Definition] {
        match self {
            Facility::Restrict => &[Definition::Noalias, Definition::Neutral],
            Facility::ForceInline => &[Definition::InlineAlways, Definition::Neutral],
            Facility::NeverInline => &[Definition::InlineNever, Definition::Neutral],
            Facility::PrettyFunction => &[Definition::TypeName, Definition::Neutral],
            Facility::IgnoreUnused => &[Definition::Discard, Definition::Neutral],
            Facility::MaybeUnused => &[Definition::AllowUnused, Definition::Neutral],
            Facility::Breakpoint => &[
                Definition::Trap(Trap::Int3),
                Definition::Trap(Trap::Brk),
                Definition::Trap(Trap::DebugBreak),
                Definition::Neutral,
            ],
            Facility::DebugPrint => &[
                Definition::Print(Sink::Stdout),
                Definition::Print(Sink::DebugOutput),
                Definition::Neutral,
            ],
            Facility::DebugLine => &[Definition::TimestampedLine, Definition::Neutral],
            Facility::ErrorIf => &[Definition::ConditionalBreak, Definition::Neutral],
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Debugger trap instruction or API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trap {
    /// x86 `int3`
    Int3,
    /// AArch64 `brk #0xf000`
    Brk,
    /// Win32 `DebugBreak()`
    DebugBreak,
}

/// Where debug output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sink {
    Stdout,
    /// Win32 `OutputDebugStringA`
    DebugOutput,
}

/// Concrete behaviour chosen for a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Definition {
    Noalias,
    InlineAlways,
    InlineNever,
    TypeName,
    Discard,
    AllowUnused,
    Trap(Trap),
    Print(Sink),
    TimestampedLine,
    ConditionalBreak,
    /// Fallback: no effect, arguments still type-check
    Neutral,
}

impl Definition {
    /// Value of the facility's cfg key.
    pub fn cfg_value(&self) -> &'static str {
        match self {
            Definition::Noalias => "noalias",
            Definition::InlineAlways => "inline-always",
            Definition::InlineNever => "inline-never",
            Definition::TypeName => "type-name",
            Definition::Discard => "discard",
            Definition::AllowUnused => "allow-unused",
            Definition::Trap(Trap::Int3) => "trap-int3",
            Definition::Trap(Trap::Brk) => "trap-brk",
            Definition::Trap(Trap::DebugBreak) => "debug-break",
            Definition::Print(Sink::Stdout) => "stdout",
            Definition::Print(Sink::DebugOutput) => "debug-output",
            Definition::TimestampedLine => "timestamped",
            Definition::ConditionalBreak => "conditional-break",
            Definition::Neutral => "neutral",
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Definition::Neutral)
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.cfg_value())
    }
}

/// Table layers, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Common,
    Apple,
    AppleDebug,
    Win32,
    Win32Debug,
    /// Reserved; defines nothing yet
    Linux,
    DebugHelpers,
    Fallback,
}

impl Layer {
    pub const ORDER: [Layer; 8] = [
        Layer::Common,
        Layer::Apple,
        Layer::AppleDebug,
        Layer::Win32,
        Layer::Win32Debug,
        Layer::Linux,
        Layer::DebugHelpers,
        Layer::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Common => "common",
            Layer::Apple => "apple",
            Layer::AppleDebug => "apple-debug",
            Layer::Win32 => "win32",
            Layer::Win32Debug => "win32-debug",
            Layer::Linux => "linux",
            Layer::DebugHelpers => "debug-helpers",
            Layer::Fallback => "fallback",
        }
    }

    pub fn is_active(&self, env: &Environment) -> bool {
        match self {
            Layer::Common | Layer::Fallback => true,
            Layer::Apple => env.os == OsFamily::MacOs,
            Layer::AppleDebug => env.os == OsFamily::MacOs && env.is_debug(),
            Layer::Win32 => env.os == OsFamily::Windows,
            Layer::Win32Debug => env.os == OsFamily::Windows && env.is_debug(),
            Layer::Linux => env.os == OsFamily::Linux,
            // Needs a platform print sink; unrecognized targets keep neutral forms
            Layer::DebugHelpers => {
                env.is_debug() && matches!(env.os, OsFamily::MacOs | OsFamily::Windows)
            }
        }
    }

    /// Definitions this layer offers for `env`, whether or not it is active.
    pub fn definitions(&self, env: &Environment) -> Vec<(Facility, Definition)> {
        match self {
            Layer::Common => {
                let mut defs = vec![(Facility::IgnoreUnused, Definition::Discard)];
                if env.tiers.any() || env.os == OsFamily::MacOs {
                    defs.push((Facility::MaybeUnused, Definition::AllowUnused));
                }
                defs
            }
            Layer::Apple | Layer::Win32 => vec![
                (Facility::Restrict, Definition::Noalias),
                (Facility::NeverInline, Definition::InlineNever),
                (Facility::ForceInline, Definition::InlineAlways),
                (Facility::PrettyFunction, Definition::TypeName),
            ],
            Layer::AppleDebug => {
                let mut defs = Vec::with_capacity(2);
                match env.arch {
                    ArchFamily::X86 => defs.push((Facility::Breakpoint, Definition::Trap(Trap::Int3))),
                    ArchFamily::Arm64 => defs.push((Facility::Breakpoint, Definition::Trap(Trap::Brk))),
                    // No stable arch-independent trap; the fallback supplies a neutral one
                    ArchFamily::Unknown => {}
                }
                defs.push((Facility::DebugPrint, Definition::Print(Sink::Stdout)));
                defs
            }
            Layer::Win32Debug => vec![
                (Facility::Breakpoint, Definition::Trap(Trap::DebugBreak)),
                (Facility::DebugPrint, Definition::Print(Sink::DebugOutput)),
            ],
            Layer::Linux => Vec::new(),
            Layer::DebugHelpers => vec![
                (Facility::DebugLine, Definition::TimestampedLine),
                (Facility::ErrorIf, Definition::ConditionalBreak),
            ],
            Layer::Fallback => Facility::ALL
                .into_iter()
                .map(|f| (f, Definition::Neutral))
                .collect(),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A resolved definition and the layer that supplied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    pub definition: Definition,
    pub layer: Layer,
}

/// Facility table under construction or fully resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityTable {
    entries: BTreeMap<Facility, Entry>,
}

impl FacilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every layer, in order, against `env`.
    pub fn resolve(env: &Environment) -> Self {
        let mut table = Self::new();
        for layer in Layer::ORDER {
            table.apply(layer, env);
        }
        table
    }

    /// Define `facility` unless it already has a definition.
    /// Returns whether the definition was taken.
    pub fn define(&mut self, facility: Facility, definition: Definition, layer: Layer) -> bool {
        if self.entries.contains_key(&facility) {
            return false;
        }
        self.entries.insert(facility, Entry { definition, layer });
        true
    }

    /// Apply one layer. Returns how many facilities it defined.
    pub fn apply(&mut self, layer: Layer, env: &Environment) -> usize {
        if !layer.is_active(env) {
            return 0;
        }
        layer
            .definitions(env)
            .into_iter()
            .filter(|(facility, definition)| self.define(*facility, *definition, layer))
            .count()
    }

    pub fn get(&self, facility: Facility) -> Option<&Entry> {
        self.entries.get(&facility)
    }

    pub fn definition(&self, facility: Facility) -> Option<Definition> {
        self.get(facility).map(|e| e.definition)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Facility, &Entry)> {
        self.entries.iter().map(|(f, e)| (*f, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Facilities without a definition.
    pub fn missing(&self) -> Vec<Facility> {
        Facility::ALL
            .into_iter()
            .filter(|f| !self.entries.contains_key(f))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}
