//! In-memory backend that records every collaborator call.

use crate::error::{PkgupError, Result};
use crate::inventory::{
    Artifact, GroupCatalog, Inventory, MarkingError, ModuleRegistry, ModuleStream,
};
use crate::rpm::Nevra;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SecurityFilter(bool, bool),
    ResolveFiles(Vec<String>, bool),
    UpgradeArtifact(String),
    UpgradeBySpec(String),
    UpgradeEverything,
    UpgradeStreams(Vec<String>),
    UpgradeAllStreams,
    LoadMetadata(bool),
    UpgradeGroups(Vec<String>),
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    modules: Vec<ModuleStream>,
    installed: Vec<String>,
    hints: Vec<(String, String)>,
    fail_resolution: bool,
    pub calls: Vec<Call>,
}

impl FakeBackend {
    pub fn with_modules(mut self, names: &[&str]) -> Self {
        self.modules.extend(names.iter().map(|name| ModuleStream {
            name: name.to_string(),
            stream: "stable".to_string(),
            installed: Some("1".to_string()),
            available: vec!["2".to_string()],
        }));
        self
    }

    /// Package names that `upgrade_by_spec` and `upgrade_artifact` accept.
    pub fn with_installed(mut self, names: &[&str]) -> Self {
        self.installed.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_hint(mut self, spec: &str, suggestion: &str) -> Self {
        self.hints.push((spec.to_string(), suggestion.to_string()));
        self
    }

    pub fn failing_resolution(mut self) -> Self {
        self.fail_resolution = true;
        self
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }
}

impl Inventory for FakeBackend {
    fn apply_security_filter(&mut self, minimal: bool, all: bool) {
        self.calls.push(Call::SecurityFilter(minimal, all));
    }

    /// Every path whose file name parses as a package resolves.
    fn resolve_local_files(&mut self, paths: &[String], strict: bool) -> Result<Vec<Artifact>> {
        self.calls.push(Call::ResolveFiles(paths.to_vec(), strict));
        if self.fail_resolution {
            return Err(PkgupError::InventoryValidation("backend offline".to_string()));
        }

        Ok(paths
            .iter()
            .filter_map(|path| {
                let filename = path.rsplit('/').next().unwrap_or(path);
                Nevra::from_filename(filename).map(|nevra| Artifact::new(nevra, path.clone()))
            })
            .collect())
    }

    fn upgrade_artifact(&mut self, artifact: &Artifact) -> std::result::Result<(), MarkingError> {
        self.calls.push(Call::UpgradeArtifact(artifact.location.clone()));
        if self.installed.contains(&artifact.nevra.name) {
            Ok(())
        } else {
            Err(MarkingError::no_match(&artifact.location))
        }
    }

    fn upgrade_by_spec(&mut self, spec: &str) -> std::result::Result<(), MarkingError> {
        self.calls.push(Call::UpgradeBySpec(spec.to_string()));
        if self.installed.iter().any(|n| n == spec) {
            Ok(())
        } else {
            Err(MarkingError::no_match(spec))
        }
    }

    fn upgrade_everything(&mut self) {
        self.calls.push(Call::UpgradeEverything);
    }

    fn case_insensitive_hint(&self, spec: &str) -> Option<String> {
        self.hints
            .iter()
            .find(|(s, _)| s == spec)
            .map(|(_, suggestion)| suggestion.clone())
    }
}

impl ModuleRegistry for FakeBackend {
    fn lookup(&self, spec: &str) -> Option<&ModuleStream> {
        self.modules.iter().find(|m| m.name == spec)
    }

    fn upgrade_streams(&mut self, ids: &[String]) {
        self.calls.push(Call::UpgradeStreams(ids.to_vec()));
    }

    fn upgrade_all_streams(&mut self) {
        self.calls.push(Call::UpgradeAllStreams);
    }
}

impl GroupCatalog for FakeBackend {
    fn load_metadata(&mut self, arch_filter: bool) {
        self.calls.push(Call::LoadMetadata(arch_filter));
    }

    fn upgrade_groups(&mut self, ids: &[String]) {
        self.calls.push(Call::UpgradeGroups(ids.to_vec()));
    }
}
