//! File I/O
//!
//! Reads G-code sources for the viewer. The whole file is read before any
//! parsing starts, so a read failure can never leave a half-loaded path.

use std::fs;
use std::path::Path;

use gcodeview_core::constants::SUPPORTED_EXTENSIONS;
use gcodeview_core::LoadError;
use tracing::{debug, warn};

/// Files above this size are logged before reading (100 MB)
const LARGE_FILE_BYTES: u64 = 100 * 1024 * 1024;

/// UTF-8 byte order mark as decoded
const BOM: char = '\u{feff}';

/// Drop a leading byte order mark
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Read a G-code file into memory.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; only
/// ASCII tokens matter to the parser. A leading byte order mark is removed.
///
/// # Errors
/// Returns [`LoadError::NotAFile`] for directories and other non-files, and
/// [`LoadError::FileRead`] if the file cannot be opened or read.
pub fn read_gcode_file(path: &Path) -> Result<String, LoadError> {
    let metadata = fs::metadata(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(LoadError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > LARGE_FILE_BYTES {
        warn!(
            "Reading very large file ({}MB) into memory",
            metadata.len() / (1024 * 1024)
        );
    }

    let bytes = fs::read(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let text = String::from_utf8_lossy(&bytes);
    Ok(strip_bom(&text).to_string())
}

/// True if the path has one of the extensions offered by the file picker
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// File name for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
