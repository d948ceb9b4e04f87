//! Reading the Buttercup export into line objects

pub mod line_objects;
pub mod matrix;

pub use line_objects::{extract_line_objects, normalize_header};
pub use matrix::{parse_csv_matrix, read_csv_matrix};
