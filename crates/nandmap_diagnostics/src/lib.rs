//! Structured diagnostics for the nandmap technology mapper.
//!
//! Fatal problems (unreadable inputs, exhausted libraries) travel as typed
//! errors. Everything the run can survive, such as swept gates, duplicate
//! library cells, or a node that breaks the critical-path bound after
//! optimization, is reported as a [`Diagnostic`] into a shared
//! [`DiagnosticSink`] and rendered by the CLI at the end of the run.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::{Diagnostic, Location};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
