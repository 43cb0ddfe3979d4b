use crate::agents::upgrade::handlers::HandlerKind;
use std::fmt;

/// Security-advisory restriction for one upgrade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecurityMode {
    #[default]
    None,
    /// Lowest versions that fix a security advisory.
    Minimal,
    /// Newest versions among those fixing a security advisory.
    All,
}

impl SecurityMode {
    /// The `(minimal, all)` pair handed to the inventory's security filter.
    pub fn filter_flags(self) -> (bool, bool) {
        (self == SecurityMode::Minimal, self == SecurityMode::All)
    }
}

/// What the user asked to upgrade in one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeRequest {
    pub file_specs: Vec<String>,
    pub package_specs: Vec<String>,
    pub group_specs: Vec<String>,
    pub security: SecurityMode,
}

impl UpgradeRequest {
    pub fn new(security: SecurityMode) -> Self {
        Self {
            security,
            ..Self::default()
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_specs.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_specs.extend(packages.into_iter().map(Into::into));
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_specs.extend(groups.into_iter().map(Into::into));
        self
    }

    /// True when any explicit target was given.
    pub fn has_targets(&self) -> bool {
        !self.file_specs.is_empty() || !self.package_specs.is_empty() || !self.group_specs.is_empty()
    }

    pub fn routing_mode(&self) -> RoutingMode {
        if self.has_targets() {
            RoutingMode::Targeted
        } else {
            RoutingMode::Blanket
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    /// Explicit targets, handlers tried in priority order.
    Targeted,
    /// No targets: upgrade everything.
    Blanket,
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMode::Targeted => f.write_str("targeted"),
            RoutingMode::Blanket => f.write_str("blanket"),
        }
    }
}

/// How a successful run got its changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Blanket,
    Targeted(HandlerKind),
}

impl fmt::Display for UpgradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeOutcome::Blanket => f.write_str("everything"),
            UpgradeOutcome::Targeted(kind) => write!(f, "{} targets", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_flags() {
        assert_eq!(SecurityMode::None.filter_flags(), (false, false));
        assert_eq!(SecurityMode::Minimal.filter_flags(), (true, false));
        assert_eq!(SecurityMode::All.filter_flags(), (false, true));
    }

    #[test]
    fn empty_request_is_blanket() {
        let request = UpgradeRequest::default();
        assert!(!request.has_targets());
        assert_eq!(request.routing_mode(), RoutingMode::Blanket);
    }

    #[test]
    fn any_target_kind_makes_request_targeted() {
        let files = UpgradeRequest::default().with_files(["./bash-5.2-1.x86_64.rpm"]);
        let packages = UpgradeRequest::default().with_packages(["bash"]);
        let groups = UpgradeRequest::default().with_groups(["core"]);
        for request in [files, packages, groups] {
            assert_eq!(request.routing_mode(), RoutingMode::Targeted);
        }
    }
}
