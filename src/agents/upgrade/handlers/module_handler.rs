use crate::agents::upgrade::classify::TargetBuckets;
use crate::agents::upgrade::handlers::{HandlerKind, UpgradeHandler};
use crate::agents::upgrade::reporter::{ReportEvent, Reporter};
use crate::inventory::UpgradeBackend;

/// Upgrades the module streams named among the package and group specs.
pub struct ModuleHandler;

impl UpgradeHandler for ModuleHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Module
    }

    fn attempt(
        &self,
        targets: &TargetBuckets,
        backend: &mut dyn UpgradeBackend,
        reporter: &dyn Reporter,
    ) -> bool {
        if targets.modules.is_empty() {
            return false;
        }

        reporter.emit(ReportEvent::ModulesMatched {
            modules: targets.modules.clone(),
        });
        backend.upgrade_streams(&targets.modules);
        true
    }
}
