//! Parser for the line-oriented cell library format.
//!
//! A library is a sequence of blocks, one per cell:
//!
//! ```text
//! INV1
//! Timing 1.0 1.0
//! Area 2.0
//! NAND1
//! Timing 2.0 1.0
//! Area 3.0
//! ```
//!
//! The header token names the cell; `INV` or `NAND` in the name decides its
//! kind. `Timing` gives the fixed and per-fanout delay, and `Area` closes the
//! block. Blank lines are ignored.

use crate::cell::{CellKind, CellSpec};
use crate::error::LibraryError;
use crate::library::Library;
use nandmap_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use std::collections::HashMap;
use std::path::Path;

/// Reads and parses a cell library file.
pub fn load_library(path: &Path, sink: &DiagnosticSink) -> Result<Library, LibraryError> {
    let source = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_library(&source, &path.display().to_string(), sink)
}

/// Parses cell library text into an area-sorted [`Library`].
///
/// `file` is only used to locate diagnostics. Duplicate cell names are kept
/// and reported as warnings; every other irregularity is an error.
pub fn parse_library(
    source: &str,
    file: &str,
    sink: &DiagnosticSink,
) -> Result<Library, LibraryError> {
    let mut cells = Vec::new();
    let mut open: Option<OpenCell> = None;
    let mut first_seen: HashMap<String, u32> = HashMap::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index as u32 + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        let Some(&head) = tokens.first() else {
            continue;
        };

        if let Some(kind) = CellKind::from_cell_name(head) {
            expect_arity(&tokens, 1, line)?;
            if let Some(unfinished) = open.take() {
                return Err(unfinished.incomplete());
            }
            if let Some(&previous) = first_seen.get(head) {
                sink.emit(
                    Diagnostic::warning(
                        DiagnosticCode::DUPLICATE_CELL,
                        format!("cell `{head}` is defined more than once"),
                    )
                    .with_location(Location::new(file, line))
                    .with_note(format!("first definition is on line {previous}")),
                );
            } else {
                first_seen.insert(head.to_string(), line);
            }
            open = Some(OpenCell {
                name: head.to_string(),
                kind,
                line,
                timing: None,
            });
            continue;
        }

        let cell = open
            .as_mut()
            .ok_or_else(|| LibraryError::parse(line, format!("`{head}` outside of a cell block")))?;
        match head {
            "Timing" => {
                expect_arity(&tokens, 3, line)?;
                let fixed = parse_number(tokens[1], line)?;
                let load = parse_number(tokens[2], line)?;
                cell.timing = Some((fixed, load));
            }
            "Area" => {
                expect_arity(&tokens, 2, line)?;
                let area = parse_number(tokens[1], line)?;
                if area < 0.0 {
                    return Err(LibraryError::parse(
                        line,
                        format!("negative area {area} for cell `{}`", cell.name),
                    ));
                }
                let Some((fixed, load)) = cell.timing else {
                    return Err(cell.incomplete());
                };
                cells.push(CellSpec::new(
                    std::mem::take(&mut cell.name),
                    cell.kind,
                    fixed,
                    load,
                    area,
                ));
                open = None;
            }
            other => {
                return Err(LibraryError::parse(
                    line,
                    format!("unknown keyword `{other}`, expected `Timing` or `Area`"),
                ));
            }
        }
    }

    if let Some(unfinished) = open {
        return Err(unfinished.incomplete());
    }
    Ok(Library::new(cells))
}

/// A cell whose header has been read but whose `Area` line has not.
struct OpenCell {
    name: String,
    kind: CellKind,
    line: u32,
    timing: Option<(f64, f64)>,
}

impl OpenCell {
    fn incomplete(&self) -> LibraryError {
        LibraryError::IncompleteCell {
            name: self.name.clone(),
            line: self.line,
            missing: if self.timing.is_none() { "Timing" } else { "Area" },
        }
    }
}

fn expect_arity(tokens: &[&str], expected: usize, line: u32) -> Result<(), LibraryError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(LibraryError::parse(
            line,
            format!(
                "`{}` takes {} value(s), found {}",
                tokens[0],
                expected - 1,
                tokens.len() - 1
            ),
        ))
    }
}

fn parse_number(token: &str, line: u32) -> Result<f64, LibraryError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LibraryError::parse(
            line,
            format!("expected a number, found `{token}`"),
        )),
    }
}
