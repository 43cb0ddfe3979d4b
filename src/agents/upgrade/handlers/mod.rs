// Strategy handlers for the upgrade orchestrator
//
// Each handler owns one target bucket and reports whether it scheduled at
// least one change. The orchestrator tries them in `default_chain` order and
// stops at the first one that reports a change.

pub mod file_handler;
pub mod group_handler;
pub mod module_handler;
pub mod package_handler;

pub use file_handler::FileHandler;
pub use group_handler::GroupHandler;
pub use module_handler::ModuleHandler;
pub use package_handler::PackageHandler;

use crate::agents::upgrade::classify::TargetBuckets;
use crate::agents::upgrade::reporter::{ReportEvent, Reporter};
use crate::inventory::UpgradeBackend;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Module,
    File,
    Package,
    Group,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HandlerKind::Module => "module",
            HandlerKind::File => "file",
            HandlerKind::Package => "package",
            HandlerKind::Group => "group",
        };
        f.write_str(label)
    }
}

/// One upgrade strategy.
pub trait UpgradeHandler {
    fn kind(&self) -> HandlerKind;

    /// Run against this handler's bucket. Returns true iff at least one change
    /// was scheduled. Per-item marking failures are reported, never returned.
    fn attempt(
        &self,
        targets: &TargetBuckets,
        backend: &mut dyn UpgradeBackend,
        reporter: &dyn Reporter,
    ) -> bool;
}

/// Modules, then files, then package specs, then groups.
pub fn default_chain() -> Vec<Box<dyn UpgradeHandler>> {
    vec![
        Box::new(ModuleHandler),
        Box::new(FileHandler),
        Box::new(PackageHandler),
        Box::new(GroupHandler),
    ]
}

/// Report a skipped argument, plus a case-insensitive suggestion when the
/// inventory has one for `name`.
fn report_no_match(backend: &dyn UpgradeBackend, reporter: &dyn Reporter, argument: &str, name: &str) {
    reporter.emit(ReportEvent::NoMatch {
        argument: argument.to_string(),
    });

    if let Some(suggestion) = backend.case_insensitive_hint(name) {
        reporter.emit(ReportEvent::CaseHint {
            argument: argument.to_string(),
            suggestion,
        });
    }
}
