//! Error types for cell library loading.

use std::path::PathBuf;

/// Errors that make a cell library unusable.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The library file could not be read.
    #[error("cannot read cell library {}: {source}", path.display())]
    Io {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the library text is malformed.
    #[error("cell library line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: u32,
        /// What was wrong with the line.
        message: String,
    },

    /// A cell block ended without its `Timing` or `Area` line.
    #[error("cell `{name}` (line {line}) is missing its {missing} line")]
    IncompleteCell {
        /// Name of the unfinished cell.
        name: String,
        /// Line of the cell's header.
        line: u32,
        /// The keyword that never appeared.
        missing: &'static str,
    },
}

impl LibraryError {
    pub(crate) fn parse(line: u32, message: impl Into<String>) -> Self {
        LibraryError::Parse {
            line,
            message: message.into(),
        }
    }
}
