use crate::error::{PkgupError, Result};
use crate::utils::PathValidator;
use std::path::{Path, PathBuf};

const INVENTORY_FILE: &str = "inventory.toml";
const COMPS_FILE: &str = "comps.xml";

/// InventoryScanner validates the layout of an inventory root
pub struct InventoryScanner {
    root: PathBuf,
}

impl InventoryScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Validates the inventory root and locates its metadata files
    pub fn validate(&self) -> Result<InventoryLayout> {
        let root = PathValidator::validate_root_path(&self.root)?;

        let inventory_path = root.join(INVENTORY_FILE);
        if !inventory_path.is_file() {
            return Err(PkgupError::InventoryValidation(format!(
                "{} not found in '{}'",
                INVENTORY_FILE,
                root.display()
            )));
        }
        let inventory_path = PathValidator::validate_file_path(&inventory_path, &root)?;

        // Group metadata is optional
        let comps_path = root.join(COMPS_FILE);
        let comps_path = if comps_path.is_file() {
            Some(PathValidator::validate_file_path(&comps_path, &root)?)
        } else {
            None
        };

        Ok(InventoryLayout {
            root,
            inventory_path,
            comps_path,
        })
    }
}

#[derive(Debug, Clone)]
pub struct InventoryLayout {
    pub root: PathBuf,
    pub inventory_path: PathBuf,
    pub comps_path: Option<PathBuf>,
}
