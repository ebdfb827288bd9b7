//! Span and event macros that vanish without the `tracing` feature.
//!
//! Call sites write `let _span = trace_span!(..).entered();`,
//! `trace_event!(..)` and `trace_warn!(..)` unconditionally. With the feature
//! off a span is a [`NoopSpan`] and event fields are evaluated, then dropped.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Named event through the `tracing` macro `$level` (`info`, `warn`, ...).
#[cfg(feature = "tracing")]
macro_rules! trace_at {
    ($level:ident, $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::$level!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_at {
    ($level:ident, $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

/// Stage measurements: counts, sizes.
macro_rules! trace_event {
    ($name:expr, $($fields:tt)+) => {
        $crate::trace::trace_at!(info, $name, $($fields)+)
    };
}

/// Recoverable misuse: bad channel reads, degenerate normalization.
macro_rules! trace_warn {
    ($name:expr, $($fields:tt)+) => {
        $crate::trace::trace_at!(warn, $name, $($fields)+)
    };
}

pub(crate) use trace_at;
pub(crate) use trace_event;
pub(crate) use trace_span;
pub(crate) use trace_warn;

/// Stand-in for `tracing::Span` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
