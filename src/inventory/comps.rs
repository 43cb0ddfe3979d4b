use crate::error::{PkgupError, Result};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::path::Path;

const MAX_COMPS_BYTES: usize = 16 * 1024 * 1024;

/// How strongly a group requires a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    Mandatory,
    Default,
    Conditional,
    Optional,
}

impl RequirementKind {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("default") => RequirementKind::Default,
            Some("conditional") => RequirementKind::Conditional,
            Some("optional") => RequirementKind::Optional,
            _ => RequirementKind::Mandatory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequirement {
    pub name: String,
    pub kind: RequirementKind,
    /// Empty means every architecture.
    pub arches: Vec<String>,
}

impl PackageRequirement {
    fn applies_to(&self, arch: &str) -> bool {
        self.arches.is_empty() || self.arches.iter().any(|a| a == arch || a == "noarch")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub packages: Vec<PackageRequirement>,
}

impl Group {
    /// Names of the non-optional member packages, optionally limited to `arch`.
    pub fn upgradable_packages(&self, arch: Option<&str>) -> Vec<&str> {
        self.packages
            .iter()
            .filter(|p| p.kind != RequirementKind::Optional)
            .filter(|p| arch.is_none_or(|arch| p.applies_to(arch)))
            .map(|p| p.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub groups: Vec<String>,
}

/// Group and environment metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comps {
    pub groups: Vec<Group>,
    pub environments: Vec<Environment>,
}

impl Comps {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PkgupError::MetadataParsing(format!(
                "Failed to read comps '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.len() > MAX_COMPS_BYTES {
            return Err(PkgupError::MetadataParsing(
                "Comps metadata exceeded 16MB limit".to_string(),
            ));
        }

        let document: CompsDocument = from_str(content)
            .map_err(|e| PkgupError::MetadataParsing(format!("Failed to parse comps: {}", e)))?;

        let groups = document
            .groups
            .into_iter()
            .map(|raw| Group {
                name: default_name(&raw.names).unwrap_or_else(|| raw.id.clone()),
                id: raw.id,
                packages: raw
                    .packagelist
                    .map(|list| list.packages)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|req| PackageRequirement {
                        name: req.name.trim().to_string(),
                        kind: RequirementKind::parse(req.kind.as_deref()),
                        arches: split_arches(req.arch.as_deref()),
                    })
                    .collect(),
            })
            .collect();

        let environments = document
            .environments
            .into_iter()
            .map(|raw| Environment {
                name: default_name(&raw.names).unwrap_or_else(|| raw.id.clone()),
                id: raw.id,
                groups: raw
                    .grouplist
                    .map(|list| list.groups)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|g| g.trim().to_string())
                    .collect(),
            })
            .collect();

        Ok(Self {
            groups,
            environments,
        })
    }

    /// Find a group by id, falling back to a case-insensitive name match.
    pub fn find_group(&self, spec: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == spec).or_else(|| {
            self.groups
                .iter()
                .find(|g| g.name.eq_ignore_ascii_case(spec))
        })
    }

    pub fn find_environment(&self, spec: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.id == spec).or_else(|| {
            self.environments
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(spec))
        })
    }
}

fn default_name(names: &[RawText]) -> Option<String> {
    names
        .iter()
        .find(|n| n.lang.is_none())
        .or_else(|| names.first())
        .map(|n| n.text.trim().to_string())
        .filter(|n| !n.is_empty())
}

fn split_arches(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct CompsDocument {
    #[serde(rename = "group", default)]
    groups: Vec<RawGroup>,
    #[serde(rename = "environment", default)]
    environments: Vec<RawEnvironment>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    id: String,
    #[serde(rename = "name", default)]
    names: Vec<RawText>,
    packagelist: Option<RawPackageList>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(rename = "@xml:lang", default)]
    lang: Option<String>,
    #[serde(rename = "$text", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawPackageList {
    #[serde(rename = "packagereq", default)]
    packages: Vec<RawPackageReq>,
}

#[derive(Debug, Deserialize)]
struct RawPackageReq {
    #[serde(rename = "@type", default)]
    kind: Option<String>,
    #[serde(rename = "@arch", default)]
    arch: Option<String>,
    #[serde(rename = "$text")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawEnvironment {
    id: String,
    #[serde(rename = "name", default)]
    names: Vec<RawText>,
    grouplist: Option<RawGroupList>,
}

#[derive(Debug, Deserialize)]
struct RawGroupList {
    #[serde(rename = "groupid", default)]
    groups: Vec<String>,
}
