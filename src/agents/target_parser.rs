use crate::agents::upgrade::{SecurityMode, UpgradeRequest};
use crate::error::{PkgupError, Result};

/// The kind of target a command-line token names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    File(String),
    Group(String),
    Package(String),
}

/// Sorts free-form command-line tokens into file, group and package targets.
pub struct TargetParser;

impl TargetParser {
    /// `@name` is a group, anything ending in `.rpm` is a package file
    /// (local path or URL), everything else is a package spec.
    pub fn classify(token: &str) -> Result<TargetKind> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PkgupError::InvalidTarget(
                "Empty target is not allowed".to_string(),
            ));
        }

        if let Some(group) = token.strip_prefix('@') {
            if group.is_empty() {
                return Err(PkgupError::InvalidTarget(
                    "Group target '@' needs a name".to_string(),
                ));
            }
            return Ok(TargetKind::Group(group.to_string()));
        }

        if token.ends_with(".rpm") {
            return Ok(TargetKind::File(token.to_string()));
        }

        Ok(TargetKind::Package(token.to_string()))
    }

    /// Build a request from tokens, keeping each kind in command-line order.
    pub fn parse<S: AsRef<str>>(tokens: &[S], security: SecurityMode) -> Result<UpgradeRequest> {
        let mut files = Vec::new();
        let mut packages = Vec::new();
        let mut groups = Vec::new();

        for token in tokens {
            match Self::classify(token.as_ref())? {
                TargetKind::File(path) => files.push(path),
                TargetKind::Group(group) => groups.push(group),
                TargetKind::Package(spec) => packages.push(spec),
            }
        }

        Ok(UpgradeRequest::new(security)
            .with_files(files)
            .with_packages(packages)
            .with_groups(groups))
    }
}
