use crate::agents::upgrade::classify::TargetBuckets;
use crate::agents::upgrade::handlers::{HandlerKind, UpgradeHandler, report_no_match};
use crate::agents::upgrade::reporter::{ReportEvent, Reporter};
use crate::inventory::{MarkingError, UpgradeBackend};

/// Upgrades installed packages from local (or remote) package files.
///
/// Files that do not resolve are reported and skipped; an artifact with no
/// installed counterpart is reported and the remaining artifacts still run.
pub struct FileHandler;

impl UpgradeHandler for FileHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::File
    }

    fn attempt(
        &self,
        targets: &TargetBuckets,
        backend: &mut dyn UpgradeBackend,
        reporter: &dyn Reporter,
    ) -> bool {
        if targets.files.is_empty() {
            return false;
        }

        let artifacts = match backend.resolve_local_files(&targets.files, false) {
            Ok(artifacts) => artifacts,
            Err(e) => {
                reporter.emit(ReportEvent::ArtifactLoadFailed {
                    reason: e.to_string(),
                });
                return false;
            }
        };

        for location in &targets.files {
            if !artifacts.iter().any(|a| &a.location == location) {
                reporter.emit(ReportEvent::FileSkipped {
                    location: location.clone(),
                });
            }
        }

        let mut success = false;
        for artifact in &artifacts {
            match backend.upgrade_artifact(artifact) {
                Ok(()) => success = true,
                Err(MarkingError::NoMatch { argument }) => {
                    report_no_match(&*backend, reporter, &argument, &artifact.nevra.name);
                }
            }
        }

        success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::upgrade::reporter::MemoryReporter;
    use crate::agents::upgrade::testing::{Call, FakeBackend};

    fn files(paths: &[&str]) -> TargetBuckets {
        TargetBuckets {
            files: paths.iter().map(|p| p.to_string()).collect(),
            ..TargetBuckets::default()
        }
    }

    #[test]
    fn partial_success_reports_each_skipped_artifact() {
        let mut backend = FakeBackend::default().with_installed(&["curl"]);
        let reporter = MemoryReporter::default();
        let targets = files(&[
            "/srv/bash-5.3-1.fc40.x86_64.rpm",
            "/srv/curl-8.5-1.fc40.x86_64.rpm",
            "/srv/zsh-5.9-1.fc40.x86_64.rpm",
        ]);

        assert!(FileHandler.attempt(&targets, &mut backend, &reporter));
        assert_eq!(
            reporter.no_matches(),
            vec![
                "/srv/bash-5.3-1.fc40.x86_64.rpm".to_string(),
                "/srv/zsh-5.9-1.fc40.x86_64.rpm".to_string(),
            ]
        );
        assert_eq!(
            backend.count(|c| matches!(c, Call::UpgradeArtifact(_))),
            3
        );
        assert!(backend.calls.contains(&Call::ResolveFiles(targets.files.clone(), false)));
    }

    #[test]
    fn unresolvable_files_are_reported_one_by_one() {
        let mut backend = FakeBackend::default().with_installed(&["curl"]);
        let reporter = MemoryReporter::default();
        let targets = files(&[
            "/srv/notes.rpm",
            "/srv/curl-8.5-1.fc40.x86_64.rpm",
            "/srv/readme.rpm",
        ]);

        assert!(FileHandler.attempt(&targets, &mut backend, &reporter));
        let skipped: Vec<ReportEvent> = reporter
            .events()
            .into_iter()
            .filter(|e| matches!(e, ReportEvent::FileSkipped { .. }))
            .collect();
        assert_eq!(
            skipped,
            vec![
                ReportEvent::FileSkipped {
                    location: "/srv/notes.rpm".to_string()
                },
                ReportEvent::FileSkipped {
                    location: "/srv/readme.rpm".to_string()
                },
            ]
        );
    }

    #[test]
    fn all_artifacts_unmatched_is_false() {
        let mut backend = FakeBackend::default();
        let reporter = MemoryReporter::default();

        let targets = files(&["/srv/zsh-5.9-1.fc40.x86_64.rpm"]);
        assert!(!FileHandler.attempt(&targets, &mut backend, &reporter));
        assert_eq!(reporter.no_matches().len(), 1);
    }

    #[test]
    fn hint_uses_the_artifact_package_name() {
        let mut backend = FakeBackend::default().with_hint("Zsh", "zsh");
        let reporter = MemoryReporter::default();

        let targets = files(&["/srv/Zsh-5.9-1.fc40.x86_64.rpm"]);
        assert!(!FileHandler.attempt(&targets, &mut backend, &reporter));
        assert!(reporter.events().contains(&ReportEvent::CaseHint {
            argument: "/srv/Zsh-5.9-1.fc40.x86_64.rpm".to_string(),
            suggestion: "zsh".to_string(),
        }));
    }

    #[test]
    fn resolution_failure_is_reported_not_raised() {
        let mut backend = FakeBackend::default().failing_resolution();
        let reporter = MemoryReporter::default();

        let targets = files(&["/srv/bash-5.3-1.fc40.x86_64.rpm"]);
        assert!(!FileHandler.attempt(&targets, &mut backend, &reporter));
        assert!(matches!(
            reporter.events().as_slice(),
            [ReportEvent::ArtifactLoadFailed { .. }]
        ));
    }

    #[test]
    fn no_files_means_no_calls() {
        let mut backend = FakeBackend::default();
        let reporter = MemoryReporter::default();
        assert!(!FileHandler.attempt(&TargetBuckets::default(), &mut backend, &reporter));
        assert!(backend.calls.is_empty());
    }
}
