use crate::agents::upgrade::classify::TargetBuckets;
use crate::agents::upgrade::handlers::{HandlerKind, UpgradeHandler, report_no_match};
use crate::agents::upgrade::reporter::Reporter;
use crate::inventory::{MarkingError, UpgradeBackend};

/// Upgrades each remaining package spec independently.
pub struct PackageHandler;

impl UpgradeHandler for PackageHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Package
    }

    fn attempt(
        &self,
        targets: &TargetBuckets,
        backend: &mut dyn UpgradeBackend,
        reporter: &dyn Reporter,
    ) -> bool {
        let mut success = false;

        for spec in &targets.packages {
            match backend.upgrade_by_spec(spec) {
                Ok(()) => success = true,
                Err(MarkingError::NoMatch { argument }) => {
                    report_no_match(&*backend, reporter, &argument, spec);
                }
            }
        }

        success
    }
}
