use crate::agents::upgrade::context::UpgradeRequest;
use crate::agents::upgrade::reporter::{ReportEvent, Reporter};
use crate::inventory::ModuleRegistry;

/// Upgrade targets split into disjoint buckets, one per handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetBuckets {
    pub modules: Vec<String>,
    pub files: Vec<String>,
    pub packages: Vec<String>,
    pub groups: Vec<String>,
}

/// Result of scanning one spec list against the module registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModulePartition {
    pub modules: Vec<String>,
    pub remainder: Vec<String>,
}

/// Split `specs` into registry keys and everything else, preserving order.
///
/// The input is never modified; both halves are fresh sequences.
pub fn partition_modules<R>(specs: &[String], registry: &R, reporter: &dyn Reporter) -> ModulePartition
where
    R: ModuleRegistry + ?Sized,
{
    let mut partition = ModulePartition::default();

    for spec in specs {
        if registry.contains(spec) {
            partition.modules.push(spec.clone());
        } else {
            reporter.emit(ReportEvent::NotAModule { spec: spec.clone() });
            partition.remainder.push(spec.clone());
        }
    }

    partition
}

impl TargetBuckets {
    /// Module candidates come from package specs first, then group specs.
    pub fn classify<R>(request: &UpgradeRequest, registry: &R, reporter: &dyn Reporter) -> Self
    where
        R: ModuleRegistry + ?Sized,
    {
        let packages = partition_modules(&request.package_specs, registry, reporter);
        let groups = partition_modules(&request.group_specs, registry, reporter);

        let mut modules: Vec<String> = Vec::new();
        for module in packages.modules.into_iter().chain(groups.modules) {
            if !modules.contains(&module) {
                modules.push(module);
            }
        }

        Self {
            modules,
            files: request.file_specs.clone(),
            packages: packages.remainder,
            groups: groups.remainder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::upgrade::reporter::MemoryReporter;
    use crate::agents::upgrade::testing::FakeBackend;

    fn specs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_into_disjoint_ordered_halves() {
        let backend = FakeBackend::default().with_modules(&["nodejs", "perl"]);
        let reporter = MemoryReporter::default();

        let partition = partition_modules(
            &specs(&["bash", "nodejs", "curl", "perl", "vim"]),
            &backend,
            &reporter,
        );

        assert_eq!(partition.modules, specs(&["nodejs", "perl"]));
        assert_eq!(partition.remainder, specs(&["bash", "curl", "vim"]));
        assert_eq!(
            reporter.events(),
            vec![
                ReportEvent::NotAModule { spec: "bash".to_string() },
                ReportEvent::NotAModule { spec: "curl".to_string() },
                ReportEvent::NotAModule { spec: "vim".to_string() },
            ]
        );
    }

    #[test]
    fn adjacent_matches_are_not_skipped() {
        let backend = FakeBackend::default().with_modules(&["a", "b"]);
        let reporter = MemoryReporter::default();

        let partition = partition_modules(&specs(&["a", "b", "c"]), &backend, &reporter);

        assert_eq!(partition.modules, specs(&["a", "b"]));
        assert_eq!(partition.remainder, specs(&["c"]));
    }

    #[test]
    fn classification_is_idempotent() {
        let backend = FakeBackend::default().with_modules(&["nodejs"]);
        let reporter = MemoryReporter::default();
        let request = UpgradeRequest::default()
            .with_packages(["nodejs", "bash"])
            .with_groups(["core", "nodejs"]);

        let first = TargetBuckets::classify(&request, &backend, &reporter);
        let second = TargetBuckets::classify(&request, &backend, &reporter);

        assert_eq!(first, second);
    }

    #[test]
    fn modules_come_from_packages_then_groups_without_duplicates() {
        let backend = FakeBackend::default().with_modules(&["nodejs", "ruby"]);
        let reporter = MemoryReporter::default();
        let request = UpgradeRequest::default()
            .with_files(["./x-1-1.noarch.rpm"])
            .with_packages(["nodejs", "bash"])
            .with_groups(["ruby", "core", "nodejs"]);

        let buckets = TargetBuckets::classify(&request, &backend, &reporter);

        assert_eq!(buckets.modules, specs(&["nodejs", "ruby"]));
        assert_eq!(buckets.packages, specs(&["bash"]));
        assert_eq!(buckets.groups, specs(&["core"]));
        assert_eq!(buckets.files, specs(&["./x-1-1.noarch.rpm"]));
        // the request itself is untouched
        assert_eq!(request.package_specs, specs(&["nodejs", "bash"]));
    }
}
