use crate::agents::upgrade::context::RoutingMode;
use crate::agents::upgrade::handlers::HandlerKind;
use colored::Colorize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportLevel {
    Debug,
    Info,
    Warn,
}

/// Something the orchestrator or a handler wants the user (or a test) to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    SecurityFilter { minimal: bool, all: bool },
    Routing { mode: RoutingMode },
    NotAModule { spec: String },
    ModulesMatched { modules: Vec<String> },
    NoMatch { argument: String },
    FileSkipped { location: String },
    CaseHint { argument: String, suggestion: String },
    ArtifactLoadFailed { reason: String },
    HandlerFinished { kind: HandlerKind, changed: bool },
}

impl ReportEvent {
    pub fn level(&self) -> ReportLevel {
        match self {
            ReportEvent::NoMatch { .. }
            | ReportEvent::FileSkipped { .. }
            | ReportEvent::CaseHint { .. } => ReportLevel::Info,
            ReportEvent::ArtifactLoadFailed { .. } => ReportLevel::Warn,
            _ => ReportLevel::Debug,
        }
    }
}

impl fmt::Display for ReportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportEvent::SecurityFilter { minimal, all } => {
                write!(f, "Security filter: minimal={}, all={}", minimal, all)
            }
            ReportEvent::Routing { mode } => write!(f, "Routing upgrade in {} mode", mode),
            ReportEvent::NotAModule { spec } => write!(f, "Not a valid module: {}", spec),
            ReportEvent::ModulesMatched { modules } => {
                write!(f, "Upgrading module streams: {}", modules.join(", "))
            }
            ReportEvent::NoMatch { argument } => write!(f, "No match for argument: {}", argument),
            ReportEvent::FileSkipped { location } => {
                write!(f, "Could not open package file: {}", location)
            }
            ReportEvent::CaseHint { suggestion, .. } => {
                write!(f, "  * Maybe you meant: {}", suggestion)
            }
            ReportEvent::ArtifactLoadFailed { reason } => {
                write!(f, "Could not load package files: {}", reason)
            }
            ReportEvent::HandlerFinished { kind, changed } => {
                let verdict = if *changed { "marked changes" } else { "nothing marked" };
                write!(f, "{} handler: {}", kind, verdict)
            }
        }
    }
}

/// Sink for [`ReportEvent`]s, injected into the orchestrator and its handlers.
pub trait Reporter {
    fn emit(&self, event: ReportEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    Stdout,
    Stderr,
}

/// Colored terminal output. Debug events are shown only when verbose.
pub struct ConsoleReporter {
    verbose: bool,
    target: ReportTarget,
}

impl ConsoleReporter {
    pub fn new(verbose: bool, target: ReportTarget) -> Self {
        Self { verbose, target }
    }

    fn render(&self, event: &ReportEvent) -> String {
        match event {
            ReportEvent::NoMatch { argument } => {
                format!("No match for argument: {}", argument.bold())
            }
            ReportEvent::FileSkipped { location } => {
                format!("Could not open package file: {}", location.bold())
            }
            ReportEvent::CaseHint { suggestion, .. } => {
                format!("  * Maybe you meant: {}", suggestion.bold())
            }
            other => match other.level() {
                ReportLevel::Warn => format!("{} {}", "Warning:".yellow().bold(), other),
                ReportLevel::Debug => format!("[VERBOSE] {}", other).dimmed().to_string(),
                ReportLevel::Info => other.to_string(),
            },
        }
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, event: ReportEvent) {
        if event.level() == ReportLevel::Debug && !self.verbose {
            return;
        }

        let line = self.render(&event);
        match self.target {
            ReportTarget::Stdout => println!("{}", line),
            ReportTarget::Stderr => eprintln!("{}", line),
        }
    }
}

/// Records events in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryReporter {
    events: std::cell::RefCell<Vec<ReportEvent>>,
}

#[cfg(test)]
impl MemoryReporter {
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.borrow().clone()
    }

    pub fn no_matches(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::NoMatch { argument } => Some(argument.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Reporter for MemoryReporter {
    fn emit(&self, event: ReportEvent) {
        self.events.borrow_mut().push(event);
    }
}
