use crate::error::{PkgupError, Result};
use std::path::{Path, PathBuf};

/// Path validation helpers for the inventory root and the files inside it.
pub struct PathValidator;

impl PathValidator {
    /// Validates and canonicalises an incoming inventory root.
    pub fn validate_root_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let canonical = path.canonicalize().map_err(|e| {
            PkgupError::InventoryValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(PkgupError::InventoryValidation(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        // pseudo-filesystems never hold an inventory
        const FORBIDDEN: &[&str] = &["/proc", "/sys", "/dev"];

        for forbidden in FORBIDDEN {
            let forbidden_path = Path::new(forbidden);

            if path.starts_with(forbidden_path) || canonical.starts_with(forbidden_path) {
                return Err(PkgupError::InventoryValidation(format!(
                    "Access to system directory '{}' is not allowed",
                    forbidden
                )));
            }
        }

        Ok(canonical)
    }

    /// Ensures the file path resides inside the provided base directory.
    pub fn validate_file_path(
        file_path: impl AsRef<Path>,
        base_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let file_path = file_path.as_ref();
        let base_dir = base_dir.as_ref();

        let canonical_file = file_path.canonicalize().map_err(|e| {
            PkgupError::InventoryValidation(format!(
                "Invalid file path '{}': {e}",
                file_path.display()
            ))
        })?;

        let canonical_base = base_dir.canonicalize().map_err(|e| {
            PkgupError::InventoryValidation(format!(
                "Invalid base directory '{}': {e}",
                base_dir.display()
            ))
        })?;

        if !canonical_file.starts_with(&canonical_base) {
            return Err(PkgupError::InventoryValidation(
                "File path is outside the inventory root".to_string(),
            ));
        }

        Ok(canonical_file)
    }
}
