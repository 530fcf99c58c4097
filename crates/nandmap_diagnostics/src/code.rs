//! Diagnostic codes with category prefixes for structured error identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
    /// Timing diagnostics, prefixed with `T`.
    Timing,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Timing => 'T',
        }
    }
}

/// A category prefix plus a numeric identifier, displayed as e.g. `W001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// A gate that reaches no primary output was removed during mapping.
    pub const DANGLING_GATE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);
    /// The cell library defines the same cell name twice.
    pub const DUPLICATE_CELL: DiagnosticCode = DiagnosticCode::new(Category::Warning, 2);
    /// A primary output is a plain wire from a primary input.
    pub const PASSTHROUGH_OUTPUT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 3);
    /// An optimized node delay exceeds the critical-path delay.
    pub const CRITICAL_PATH_VIOLATION: DiagnosticCode = DiagnosticCode::new(Category::Timing, 1);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
