use crate::error::{PkgupError, Result};
use crate::inventory::comps::Comps;
use crate::inventory::transaction::{PackageUpgrade, StreamUpgrade, Transaction, UpgradeSource};
use crate::inventory::{
    Artifact, GroupCatalog, Inventory, MarkingError, ModuleRegistry, ModuleStream,
};
use crate::rpm::{Evr, Nevra, VersionComparator};
use crate::utils::SpecMatcher;
use serde::Deserialize;
use std::path::Path;
use url::Url;

const DEFAULT_ARCH: &str = "x86_64";
const DEFAULT_REPO: &str = "available";

/// Which upgrade candidates survive the advisory filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecurityFilter {
    Off,
    /// Lowest version fixing a security advisory.
    Minimal,
    /// Newest version fixing a security advisory.
    All,
}

/// A package offered by a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailablePackage {
    pub nevra: Nevra,
    pub repo: String,
}

/// File-backed inventory: installed and available packages, advisories,
/// module streams and comps groups, marking upgrades into a [`Transaction`].
pub struct LocalInventory {
    arch: String,
    installed: Vec<Nevra>,
    available: Vec<AvailablePackage>,
    security_fixes: Vec<Nevra>,
    modules: Vec<ModuleStream>,
    comps: Comps,
    arch_filter: bool,
    security: SecurityFilter,
    transaction: Transaction,
}

impl LocalInventory {
    /// Load `inventory.toml` and, when present, `comps.xml`.
    pub fn open(inventory_path: impl AsRef<Path>, comps_path: Option<&Path>) -> Result<Self> {
        let inventory_path = inventory_path.as_ref();
        let content = std::fs::read_to_string(inventory_path).map_err(|e| {
            PkgupError::InventoryValidation(format!(
                "Failed to read inventory '{}': {}",
                inventory_path.display(),
                e
            ))
        })?;

        let comps = match comps_path {
            Some(path) => Comps::load(path)?,
            None => Comps::default(),
        };

        Self::from_toml(&content, comps)
    }

    pub fn from_toml(content: &str, comps: Comps) -> Result<Self> {
        let file: InventoryFile = toml::from_str(content)?;

        let mut security_fixes: Vec<Nevra> = Vec::new();
        for advisory in file
            .advisories
            .iter()
            .filter(|a| a.kind == AdvisoryKind::Security)
        {
            for package in &advisory.packages {
                let nevra = Nevra::parse(package).ok_or_else(|| {
                    PkgupError::MetadataParsing(format!(
                        "Advisory '{}' lists invalid package '{}'",
                        advisory.id, package
                    ))
                })?;
                if !security_fixes.contains(&nevra) {
                    security_fixes.push(nevra);
                }
            }
        }

        Ok(Self {
            arch: file.system.arch,
            installed: file.installed.into_iter().map(PackageRecord::into_nevra).collect(),
            available: file
                .available
                .into_iter()
                .map(|record| {
                    let repo = record.repo.clone().unwrap_or_else(|| DEFAULT_REPO.to_string());
                    AvailablePackage {
                        nevra: record.into_nevra(),
                        repo,
                    }
                })
                .collect(),
            security_fixes,
            modules: file
                .modules
                .into_iter()
                .map(|m| ModuleStream {
                    name: m.name,
                    stream: m.stream,
                    installed: m.installed,
                    available: m.available,
                })
                .collect(),
            comps,
            arch_filter: false,
            security: SecurityFilter::Off,
            transaction: Transaction::new(),
        })
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    #[cfg(test)]
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// Pick the upgrade for `installed` among `candidates`, honouring the advisory filter.
    fn best_candidate<'a>(
        &self,
        installed: &Nevra,
        candidates: impl Iterator<Item = &'a AvailablePackage>,
    ) -> Option<&'a AvailablePackage> {
        let newer = candidates.filter(|c| {
            c.nevra.name == installed.name
                && c.nevra.is_arch_compatible(&installed.arch)
                && VersionComparator::is_newer(&c.nevra.evr, &installed.evr)
        });

        match self.security {
            SecurityFilter::Off => newer.max_by(|a, b| a.nevra.evr.cmp(&b.nevra.evr)),
            SecurityFilter::All => newer
                .filter(|c| self.security_fixes.contains(&c.nevra))
                .max_by(|a, b| a.nevra.evr.cmp(&b.nevra.evr)),
            SecurityFilter::Minimal => newer
                .filter(|c| self.security_fixes.contains(&c.nevra))
                .min_by(|a, b| a.nevra.evr.cmp(&b.nevra.evr)),
        }
    }

    fn mark_best(&mut self, installed: &Nevra, matcher: Option<&SpecMatcher>) {
        let candidates = self
            .available
            .iter()
            .filter(|c| matcher.is_none_or(|m| m.matches_any(&c.nevra.spec_forms())));

        let Some(best) = self.best_candidate(installed, candidates).cloned() else {
            return;
        };

        self.transaction.mark_package(PackageUpgrade {
            name: installed.name.clone(),
            arch: installed.arch.clone(),
            from: installed.evr.to_string(),
            to: best.nevra.evr.to_string(),
            source: UpgradeSource::Repository(best.repo),
        });
    }

    fn mark_installed_named(&mut self, name: &str) {
        let targets: Vec<Nevra> = self
            .installed
            .iter()
            .filter(|n| n.name == name)
            .cloned()
            .collect();

        for target in &targets {
            self.mark_best(target, None);
        }
    }

    fn mark_stream(&mut self, module: &ModuleStream) {
        let Some(current) = module.installed.as_deref() else {
            return;
        };

        let newest = module
            .available
            .iter()
            .max_by(|a, b| VersionComparator::compare(a, b));

        if let Some(newest) = newest {
            if VersionComparator::is_newer(&Evr::parse(newest), &Evr::parse(current)) {
                self.transaction.mark_stream(StreamUpgrade {
                    name: module.name.clone(),
                    stream: module.stream.clone(),
                    from: current.to_string(),
                    to: newest.clone(),
                });
            }
        }
    }

    fn resolve_file(path: &str) -> std::result::Result<Artifact, String> {
        let remote = Url::parse(path)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https" | "ftp" | "file"));

        let filename = match remote {
            Some(url) if url.scheme() == "file" => {
                let local = url
                    .to_file_path()
                    .map_err(|_| format!("Invalid file URL: {}", path))?;
                Self::local_filename(&local)?
            }
            Some(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| format!("URL has no file name: {}", path))?,
            None => Self::local_filename(Path::new(path))?,
        };

        let nevra = Nevra::from_filename(&filename)
            .ok_or_else(|| format!("Not a package file name: {}", filename))?;

        Ok(Artifact::new(nevra, path))
    }

    fn local_filename(path: &Path) -> std::result::Result<String, String> {
        if !path.is_file() {
            return Err(format!("Could not open: {}", path.display()));
        }

        path.file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| format!("Invalid file name: {}", path.display()))
    }

    fn all_nevras(&self) -> impl Iterator<Item = &Nevra> {
        self.installed
            .iter()
            .chain(self.available.iter().map(|p| &p.nevra))
    }
}

impl Inventory for LocalInventory {
    fn apply_security_filter(&mut self, minimal: bool, all: bool) {
        self.security = if minimal {
            SecurityFilter::Minimal
        } else if all {
            SecurityFilter::All
        } else {
            SecurityFilter::Off
        };

        self.transaction.security_filter = match self.security {
            SecurityFilter::Off => None,
            SecurityFilter::Minimal => Some("minimal".to_string()),
            SecurityFilter::All => Some("all".to_string()),
        };
    }

    fn resolve_local_files(&mut self, paths: &[String], strict: bool) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::new();

        for path in paths {
            match Self::resolve_file(path) {
                Ok(artifact) => artifacts.push(artifact),
                Err(reason) if strict => return Err(PkgupError::InventoryValidation(reason)),
                Err(_) => self.transaction.unresolved_files.push(path.clone()),
            }
        }

        Ok(artifacts)
    }

    fn upgrade_artifact(&mut self, artifact: &Artifact) -> std::result::Result<(), MarkingError> {
        let targets: Vec<Nevra> = self
            .installed
            .iter()
            .filter(|n| n.name == artifact.nevra.name && artifact.nevra.is_arch_compatible(&n.arch))
            .cloned()
            .collect();

        if targets.is_empty() {
            return Err(MarkingError::no_match(&artifact.location));
        }

        for target in targets {
            if VersionComparator::is_newer(&artifact.nevra.evr, &target.evr) {
                self.transaction.mark_package(PackageUpgrade {
                    name: target.name,
                    arch: target.arch,
                    from: target.evr.to_string(),
                    to: artifact.nevra.evr.to_string(),
                    source: UpgradeSource::LocalFile(artifact.location.clone()),
                });
            }
        }

        Ok(())
    }

    fn upgrade_by_spec(&mut self, spec: &str) -> std::result::Result<(), MarkingError> {
        let matcher = SpecMatcher::new(spec).map_err(|_| MarkingError::no_match(spec))?;

        // An installed package is targeted when the spec names it, or names an
        // available package that could replace it.
        let targets: Vec<Nevra> = self
            .installed
            .iter()
            .filter(|installed| {
                matcher.matches_any(&installed.spec_forms())
                    || self.available.iter().any(|c| {
                        c.nevra.name == installed.name
                            && c.nevra.is_arch_compatible(&installed.arch)
                            && matcher.matches_any(&c.nevra.spec_forms())
                    })
            })
            .cloned()
            .collect();

        if targets.is_empty() {
            return Err(MarkingError::no_match(spec));
        }

        for target in &targets {
            self.mark_best(target, Some(&matcher));
        }

        Ok(())
    }

    fn upgrade_everything(&mut self) {
        self.transaction.upgrade_all = true;

        let targets = self.installed.clone();
        for target in &targets {
            self.mark_best(target, None);
        }
    }

    fn case_insensitive_hint(&self, spec: &str) -> Option<String> {
        if self.all_nevras().any(|n| n.name == spec) {
            return None;
        }

        self.all_nevras()
            .find(|n| n.name.eq_ignore_ascii_case(spec))
            .map(|n| n.name.clone())
    }
}

impl ModuleRegistry for LocalInventory {
    fn lookup(&self, spec: &str) -> Option<&ModuleStream> {
        self.modules.iter().find(|m| m.name == spec)
    }

    fn upgrade_streams(&mut self, ids: &[String]) {
        let streams: Vec<ModuleStream> = ids
            .iter()
            .filter_map(|id| self.lookup(id).cloned())
            .collect();

        for stream in &streams {
            self.mark_stream(stream);
        }
    }

    fn upgrade_all_streams(&mut self) {
        let streams = self.modules.clone();
        for stream in &streams {
            self.mark_stream(stream);
        }
    }
}

impl GroupCatalog for LocalInventory {
    fn load_metadata(&mut self, arch_filter: bool) {
        self.arch_filter = arch_filter;
    }

    fn upgrade_groups(&mut self, ids: &[String]) {
        let arch = self.arch_filter.then_some(self.arch.as_str());

        let mut marked_groups = Vec::new();
        let mut package_names = Vec::new();
        let mut unresolved = Vec::new();

        for id in ids {
            let group_ids: Vec<&str> = if let Some(env) = self.comps.find_environment(id) {
                marked_groups.push(env.id.clone());
                env.groups.iter().map(String::as_str).collect()
            } else if let Some(group) = self.comps.find_group(id) {
                vec![group.id.as_str()]
            } else {
                unresolved.push(id.clone());
                continue;
            };

            for group in group_ids.iter().filter_map(|g| self.comps.find_group(g)) {
                marked_groups.push(group.id.clone());
                package_names.extend(
                    group
                        .upgradable_packages(arch)
                        .into_iter()
                        .map(str::to_string),
                );
            }
        }

        for name in &package_names {
            self.mark_installed_named(name);
        }
        for group in &marked_groups {
            self.transaction.mark_group(group);
        }
        self.transaction.unresolved_groups.extend(unresolved);
    }
}

#[derive(Debug, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    system: SystemConfig,
    #[serde(default)]
    installed: Vec<PackageRecord>,
    #[serde(default)]
    available: Vec<PackageRecord>,
    #[serde(default)]
    advisories: Vec<AdvisoryRecord>,
    #[serde(default)]
    modules: Vec<ModuleRecord>,
}

#[derive(Debug, Deserialize)]
struct SystemConfig {
    #[serde(default = "default_arch")]
    arch: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            arch: default_arch(),
        }
    }
}

fn default_arch() -> String {
    DEFAULT_ARCH.to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct PackageRecord {
    name: String,
    #[serde(default)]
    epoch: u32,
    version: String,
    #[serde(default)]
    release: String,
    #[serde(default = "default_arch")]
    arch: String,
    #[serde(default)]
    repo: Option<String>,
}

impl PackageRecord {
    fn into_nevra(self) -> Nevra {
        Nevra::new(self.name, Evr::new(self.epoch, self.version, self.release), self.arch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum AdvisoryKind {
    Security,
    Bugfix,
    Enhancement,
}

#[derive(Debug, Deserialize)]
struct AdvisoryRecord {
    id: String,
    kind: AdvisoryKind,
    #[serde(default)]
    packages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModuleRecord {
    name: String,
    stream: String,
    #[serde(default)]
    installed: Option<String>,
    #[serde(default)]
    available: Vec<String>,
}
