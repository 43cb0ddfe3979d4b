use crate::agents::upgrade::classify::TargetBuckets;
use crate::agents::upgrade::handlers::{HandlerKind, UpgradeHandler};
use crate::agents::upgrade::reporter::Reporter;
use crate::inventory::UpgradeBackend;

/// Upgrades all remaining group and environment specs in one batch.
pub struct GroupHandler;

impl UpgradeHandler for GroupHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Group
    }

    fn attempt(
        &self,
        targets: &TargetBuckets,
        backend: &mut dyn UpgradeBackend,
        _reporter: &dyn Reporter,
    ) -> bool {
        if targets.groups.is_empty() {
            return false;
        }

        backend.load_metadata(true);
        backend.upgrade_groups(&targets.groups);
        true
    }
}
