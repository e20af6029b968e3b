use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, Result};

/// Reads the text of `design_doc_dir/name`.
pub fn read_design_doc(design_doc_dir: &Path, name: &str) -> Result<String> {
    let path = design_doc_dir.join(name);
    if !path.exists() {
        return Err(AppError::DocumentNotFound(path));
    }

    // The file can vanish between the check and the read.
    fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::DocumentNotFound(path),
        _ => AppError::Io(e),
    })
}
