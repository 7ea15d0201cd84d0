//! Fixed-width text trace of every body at every step
//!
//! Layout: nine right-aligned columns of [`FIELD_WIDTH`] characters,
//! `Time Body Mass Sx Sy Ux Uy Ax Ay`, reals with [`PRECISION`] decimals.

pub mod file;
pub mod reader;
pub mod writer;

pub const FIELD_WIDTH: usize = 15;
pub const PRECISION: usize = 6;
pub const COLUMNS: [&str; 9] = ["Time", "Body", "Mass", "Sx", "Sy", "Ux", "Uy", "Ax", "Ay"];

/// Default trace location, relative to the working directory
pub const DEFAULT_TRACE_PATH: &str = "data.txt";
