// Upgrade module - routes upgrade targets to strategy handlers
//
// Architecture:
// - UpgradeRequest: What the user asked for (files, package specs, groups, security mode)
// - TargetBuckets: Disjoint per-handler buckets, module candidates split out first
// - Handlers: One strategy per bucket (modules, files, packages, groups)
// - UpgradeOrchestrator: Runs the handlers in priority order and decides the verdict
// - Reporter: Injected sink for everything the above want to tell the user
pub mod classify;
pub mod context;
pub mod handlers;
pub mod orchestrator;
pub mod reporter;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{SecurityMode, UpgradeOutcome, UpgradeRequest};
pub use orchestrator::UpgradeOrchestrator;
pub use reporter::{ConsoleReporter, ReportTarget};
