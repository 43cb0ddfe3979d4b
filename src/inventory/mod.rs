use crate::error::Result;
use crate::rpm::Nevra;
use thiserror::Error;

pub mod comps;
pub mod local;
pub mod transaction;

pub use local::LocalInventory;
pub use transaction::Transaction;

/// A concrete package file resolved from a local path or URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub nevra: Nevra,
    /// The reference the user gave (path or URL).
    pub location: String,
}

impl Artifact {
    pub fn new(nevra: Nevra, location: impl Into<String>) -> Self {
        Self {
            nevra,
            location: location.into(),
        }
    }
}

/// A module stream known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStream {
    pub name: String,
    pub stream: String,
    pub installed: Option<String>,
    pub available: Vec<String>,
}

/// Raised when a spec or artifact matches nothing installed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkingError {
    #[error("No match for argument: {argument}")]
    NoMatch { argument: String },
}

impl MarkingError {
    pub fn no_match(argument: impl Into<String>) -> Self {
        MarkingError::NoMatch {
            argument: argument.into(),
        }
    }
}

/// Package-level marking operations of the inventory.
pub trait Inventory {
    /// Restrict candidates by security advisories. `(false, false)` clears the filter.
    fn apply_security_filter(&mut self, minimal: bool, all: bool);

    /// Resolve file references to artifacts. Unresolvable files are skipped
    /// unless `strict` is set.
    fn resolve_local_files(&mut self, paths: &[String], strict: bool) -> Result<Vec<Artifact>>;

    fn upgrade_artifact(&mut self, artifact: &Artifact) -> std::result::Result<(), MarkingError>;

    fn upgrade_by_spec(&mut self, spec: &str) -> std::result::Result<(), MarkingError>;

    fn upgrade_everything(&mut self);

    /// A known package name equal to `spec` ignoring case, if `spec` itself is unknown.
    fn case_insensitive_hint(&self, _spec: &str) -> Option<String> {
        None
    }
}

pub trait ModuleRegistry {
    /// Exact-key lookup.
    fn lookup(&self, spec: &str) -> Option<&ModuleStream>;

    fn contains(&self, spec: &str) -> bool {
        self.lookup(spec).is_some()
    }

    fn upgrade_streams(&mut self, ids: &[String]);

    fn upgrade_all_streams(&mut self);
}

pub trait GroupCatalog {
    fn load_metadata(&mut self, arch_filter: bool);

    fn upgrade_groups(&mut self, ids: &[String]);
}

/// Everything the upgrade orchestrator talks to.
pub trait UpgradeBackend: Inventory + ModuleRegistry + GroupCatalog {}

impl<T: Inventory + ModuleRegistry + GroupCatalog> UpgradeBackend for T {}
