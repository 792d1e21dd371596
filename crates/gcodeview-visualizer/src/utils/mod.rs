//! Utility helpers shared by the visualizer.

pub mod file_io;

pub use file_io::{display_name, has_supported_extension, read_gcode_file, strip_bom};
