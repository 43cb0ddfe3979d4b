use crate::agents::upgrade::classify::TargetBuckets;
use crate::agents::upgrade::context::{RoutingMode, UpgradeOutcome, UpgradeRequest};
use crate::agents::upgrade::handlers::{UpgradeHandler, default_chain};
use crate::agents::upgrade::reporter::{ReportEvent, Reporter};
use crate::error::{PkgupError, Result};
use crate::inventory::UpgradeBackend;

/// Decides which upgrade strategy applies to a request and folds the
/// handlers' outcomes into one verdict.
///
/// With explicit targets the handlers run in chain order and the first one
/// that schedules a change ends the run; later handlers are not consulted,
/// even when their buckets are non-empty. Without targets everything is
/// upgraded.
pub struct UpgradeOrchestrator<'r> {
    reporter: &'r dyn Reporter,
    handlers: Vec<Box<dyn UpgradeHandler>>,
}

impl<'r> UpgradeOrchestrator<'r> {
    pub fn new(reporter: &'r dyn Reporter) -> Self {
        Self::with_handlers(reporter, default_chain())
    }

    pub fn with_handlers(reporter: &'r dyn Reporter, handlers: Vec<Box<dyn UpgradeHandler>>) -> Self {
        Self { reporter, handlers }
    }

    /// Run one upgrade pass. Fails only with [`PkgupError::NoTargetsMarked`].
    pub fn execute(
        &self,
        request: &UpgradeRequest,
        backend: &mut dyn UpgradeBackend,
    ) -> Result<UpgradeOutcome> {
        let (minimal, all) = request.security.filter_flags();
        self.reporter
            .emit(ReportEvent::SecurityFilter { minimal, all });
        backend.apply_security_filter(minimal, all);

        let mode = request.routing_mode();
        self.reporter.emit(ReportEvent::Routing { mode });

        if mode == RoutingMode::Blanket {
            backend.upgrade_all_streams();
            backend.upgrade_everything();
            return Ok(UpgradeOutcome::Blanket);
        }

        let targets = TargetBuckets::classify(request, &*backend, self.reporter);

        for handler in &self.handlers {
            let changed = handler.attempt(&targets, backend, self.reporter);
            self.reporter.emit(ReportEvent::HandlerFinished {
                kind: handler.kind(),
                changed,
            });

            if changed {
                return Ok(UpgradeOutcome::Targeted(handler.kind()));
            }
        }

        Err(PkgupError::NoTargetsMarked)
    }
}
