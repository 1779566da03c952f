// src/diagnostic.rs
//! Advisory conditions raised by coordinate conversions
//!
//! Conversions never fail. When input is out of range or looks odd, the
//! result carries a list of [`Diagnostic`]s and the caller decides whether to
//! surface them, usually by handing them to a [`DiagnosticSink`].

use crate::latlong::Axis;
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

/// A condition worth reporting that did not stop the conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Input was outside the legal range and was moved to the boundary.
    Clamped {
        axis: Axis,
        original: f64,
        clamped: f64,
    },
    /// Input was NaN; zero was used instead.
    NotFinite { axis: Axis },
    /// A decoded magnitude fell outside 0..=90 or 0..=180.
    OutOfRange { axis: Axis, value: f64 },
    /// The hemisphere field held something other than the two expected
    /// letters or nothing.
    UnexpectedHemisphere { axis: Axis, found: String },
}

impl Diagnostic {
    pub fn axis(&self) -> Axis {
        match self {
            Diagnostic::Clamped { axis, .. }
            | Diagnostic::NotFinite { axis }
            | Diagnostic::OutOfRange { axis, .. }
            | Diagnostic::UnexpectedHemisphere { axis, .. } => *axis,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Clamped {
                axis,
                original,
                clamped,
            } => {
                let relation = if original < clamped { "less" } else { "greater" };
                write!(
                    f,
                    "{} {} is {} than {}. Changing to {}.",
                    axis, original, relation, clamped, clamped
                )
            }
            Diagnostic::NotFinite { axis } => {
                write!(f, "{} is not a number. Changing to 0.", axis)
            }
            Diagnostic::OutOfRange { axis, value } => {
                write!(f, "{} {} not in range of 0 to {}.", axis, value, axis.limit())
            }
            Diagnostic::UnexpectedHemisphere { axis, found } => {
                let (a, b) = match axis {
                    Axis::Latitude => ('N', 'S'),
                    Axis::Longitude => ('E', 'W'),
                };
                write!(f, "{} hemisphere should be {} or {}, got {:?}.", axis, a, b, found)
            }
        }
    }
}

/// A converted value plus whatever was noticed along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Conversion<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with(value: T, diagnostic: Diagnostic) -> Self {
        Self {
            value,
            diagnostics: vec![diagnostic],
        }
    }

    /// True when nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Transform the value, keeping the diagnostics.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Conversion<U> {
        Conversion {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Drop the diagnostics.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Hand every diagnostic to `sink` and return the value.
    pub fn report(self, sink: &dyn DiagnosticSink) -> T {
        for diagnostic in &self.diagnostics {
            sink.report(diagnostic);
        }
        self.value
    }
}

/// Receiver for advisory conditions.
///
/// Implementations must be `Send + Sync` so one sink can be shared by
/// conversions running on several threads.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Sink that forwards to `tracing`.
///
/// Clamped input is a caller bug and logs at error level; decoder
/// complaints about received data log as warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::Clamped { .. } | Diagnostic::NotFinite { .. } => {
                tracing::error!(axis = %diagnostic.axis(), "{}", diagnostic)
            }
            Diagnostic::OutOfRange { .. } | Diagnostic::UnexpectedHemisphere { .. } => {
                tracing::warn!(axis = %diagnostic.axis(), "{}", diagnostic)
            }
        }
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl DiagnosticSink for NoOpSink {
    #[inline]
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Sink that keeps what it is given, for tests and batch summaries.
#[derive(Debug, Default)]
pub struct CollectingSink {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything collected so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        match self.collected.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match self.collected.lock() {
            Ok(mut guard) => guard.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}
