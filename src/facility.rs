//! Runtime side of the facilities the exported macros expand to.
//!
//! The timestamped line and the conditional assert are built only from
//! [`debug_print`] and [`breakpoint`], so they behave the same on every
//! target as the primitives they wrap.

use std::fmt;

use crate::sink::DebugTarget;

/// Write a formatted message to `target`.
#[inline]
pub fn debug_print<T: DebugTarget + ?Sized>(target: &T, args: fmt::Arguments<'_>) {
    target.print(args);
}

/// Break into the debugger through `target`.
#[inline]
pub fn breakpoint<T: DebugTarget + ?Sized>(target: &T) {
    target.trap();
}

/// Milliseconds since the Unix epoch.
pub fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Print `"{millis}: "` then the message and a line break.
pub fn debug_line<T: DebugTarget + ?Sized>(target: &T, args: fmt::Arguments<'_>) {
    debug_line_at(target, timestamp_millis(), args);
}

/// [`debug_line`] with an explicit timestamp.
pub fn debug_line_at<T: DebugTarget + ?Sized>(target: &T, millis: i64, args: fmt::Arguments<'_>) {
    debug_print(target, format_args!("{}: ", millis));
    debug_print(target, format_args!("{}\n", args));
}

/// Print the message with a line break, then break into the debugger.
pub fn raise<T: DebugTarget + ?Sized>(target: &T, args: fmt::Arguments<'_>) {
    debug_print(target, format_args!("{}\n", args));
    breakpoint(target);
}

/// Type-check a message without doing anything with it.
#[inline(always)]
pub fn discard_args(_args: fmt::Arguments<'_>) {}

/// Reborrow `reference` through a function boundary so the optimizer sees an
/// exclusive, non-aliased pointer at the call site.
#[inline(always)]
pub fn exclusive<T: ?Sized>(reference: &mut T) -> &mut T {
    reference
}

/// Turn the type name of a probe function nested in a function body into
/// the path of the enclosing function.
pub fn enclosing_function(probe: &'static str) -> &'static str {
    let mut name = probe.strip_suffix("::__normalise_probe").unwrap_or(probe);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Print(String),
        Trap,
    }

    /// Records prints and traps in order.
    #[derive(Default)]
    struct Recorder {
        pub events: RefCell<Vec<Event>>,
    }

    impl Recorder {
        pub fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }

        pub fn output(&self) -> String {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Print(s) => Some(s.as_str()),
                    Event::Trap => None,
                })
                .collect()
        }
    }

    impl DebugTarget for Recorder {
        fn print(&self, args: fmt::Arguments<'_>) {
            self.events.borrow_mut().push(Event::Print(args.to_string()));
        }

        fn trap(&self) {
            self.events.borrow_mut().push(Event::Trap);
        }
    }

    #[test]
    fn test_debug_print_no_newline() {
        let rec = Recorder::default();
        debug_print(&rec, format_args!("value={} ok={}", 42, true));
        assert_eq!(rec.events(), vec![Event::Print("value=42 ok=true".into())]);
    }

    #[test]
    fn test_raise_prints_then_traps() {
        let rec = Recorder::default();
        let index = 7;
        raise(&rec, format_args!("index {} out of range", index));
        assert_eq!(
            rec.events(),
            vec![Event::Print("index 7 out of range\n".into()), Event::Trap]
        );
    }

    #[test]
    fn test_debug_line_at() {
        let rec = Recorder::default();
        debug_line_at(&rec, 1234, format_args!("frame {}", 5));
        assert_eq!(
            rec.events(),
            vec![Event::Print("1234: ".into()), Event::Print("frame 5\n".into())]
        );
        assert_eq!(rec.output(), "1234: frame 5\n");
    }

    #[test]
    fn test_debug_line_prefix_non_decreasing() {
        let rec = Recorder::default();
        debug_line(&rec, format_args!("first"));
        debug_line(&rec, format_args!("second"));

        let output = rec.output();
        let stamps: Vec<i64> = output
            .lines()
            .map(|line| line.split(": ").next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(stamps.len(), 2);
        assert!(stamps[0] > 0);
        assert!(stamps[1] >= stamps[0]);
    }

    #[test]
    fn test_enclosing_function() {
        assert_eq!(
            enclosing_function("app::render::draw::__normalise_probe"),
            "app::render::draw"
        );
        assert_eq!(
            enclosing_function("app::run::{{closure}}::{{closure}}::__normalise_probe"),
            "app::run"
        );
        assert_eq!(enclosing_function("plain"), "plain");
    }

    #[test]
    fn test_exclusive_is_same_place() {
        let mut data = [1, 2, 3];
        let r = exclusive(&mut data[..]);
        r[0] = 10;
        assert_eq!(data, [10, 2, 3]);
    }
}
