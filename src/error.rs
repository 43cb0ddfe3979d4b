use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgupError {
    #[error("Inventory validation failed: {0}")]
    InventoryValidation(String),

    #[error("Metadata parsing failed: {0}")]
    MetadataParsing(String),

    #[error("Invalid upgrade target: {0}")]
    InvalidTarget(String),

    #[error("No packages marked for upgrade.")]
    NoTargetsMarked,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PkgupError>;
