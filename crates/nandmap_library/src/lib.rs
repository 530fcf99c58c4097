//! Standard-cell library model for NAND/INV technology mapping.
//!
//! A [`Library`] holds two area-sorted lists of characterized cells:
//! inverters and two-input NAND gates. Each cell has a fixed delay, a
//! per-fanout load delay, and an area. Mapping passes query the library
//! through two selections:
//!
//! - [`Library::fastest`] picks the minimum-delay cell (baseline mapping)
//! - [`Library::cheapest_within`] picks the first cell, in ascending-area
//!   order, whose delay fits a slack budget (area recovery)
//!
//! Libraries are read from a line-oriented text format by [`parse_library`].

#![warn(missing_docs)]

pub mod cell;
pub mod error;
pub mod ids;
pub mod library;
pub mod parser;
pub mod select;

pub use cell::{CellKind, CellSpec};
pub use error::LibraryError;
pub use ids::CellId;
pub use library::Library;
pub use parser::{load_library, parse_library};
pub use select::{cheapest_within, fastest};
