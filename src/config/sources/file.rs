//! TOML file source.

use config::{File, FileFormat, FileSourceFile};
use std::path::Path;

/// Source for an explicitly named file, which must exist.
pub fn source(path: &Path) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(true)
}
