use crate::agents::upgrade::{
    ConsoleReporter, ReportTarget, SecurityMode, UpgradeOrchestrator, UpgradeOutcome,
};
use crate::agents::{InventoryScanner, TargetParser};
use crate::error::Result;
use crate::inventory::transaction::UpgradeSource;
use crate::inventory::{LocalInventory, Transaction};
use colored::Colorize;
use std::path::Path;

/// Execute the upgrade workflow
pub fn execute_upgrade<P: AsRef<Path>>(
    root: P,
    targets: &[String],
    security: SecurityMode,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let root = root.as_ref();
    let progress = |message: &str| {
        if !json {
            println!("\n{}", message.yellow());
        }
    };

    if !json {
        println!("{}", "Starting package upgrade...".cyan().bold());
    }

    // Step 1: Validate inventory layout
    progress("1. Validating inventory root...");
    let layout = InventoryScanner::new(root).validate()?;
    if !json {
        println!(
            "{}",
            format!("✓ Inventory found at {}", layout.root.display()).green()
        );
    }

    // Step 2: Load inventory and group metadata
    progress("2. Loading package inventory...");
    let mut inventory = LocalInventory::open(&layout.inventory_path, layout.comps_path.as_deref())?;
    if !json {
        println!(
            "   Architecture: {}{}",
            inventory.arch().bright_cyan(),
            if layout.comps_path.is_some() {
                ", group metadata loaded".dimmed().to_string()
            } else {
                String::new()
            }
        );
    }

    // Step 3: Classify command-line targets
    progress("3. Resolving upgrade targets...");
    let request = TargetParser::parse(targets, security)?;

    // Step 4: Mark upgrades
    progress("4. Marking upgrades...");
    let target = if json {
        ReportTarget::Stderr
    } else {
        ReportTarget::Stdout
    };
    let reporter = ConsoleReporter::new(verbose, target);
    let outcome = UpgradeOrchestrator::new(&reporter).execute(&request, &mut inventory)?;

    let transaction = inventory.into_transaction();

    // Step 5: Display summary
    if json {
        println!("{}", serde_json::to_string_pretty(&transaction)?);
    } else {
        print_transaction(&transaction, outcome);
    }

    Ok(())
}

fn print_transaction(transaction: &Transaction, outcome: UpgradeOutcome) {
    println!("{}", format!("✓ Upgraded {}", outcome).green());

    if let Some(filter) = &transaction.security_filter {
        println!("{}", format!("   (security filter: {})", filter).dimmed());
    }

    for group in &transaction.unresolved_groups {
        println!(
            "{} {}",
            "Group not found:".yellow(),
            group.as_str().bold()
        );
    }

    if transaction.is_empty() {
        println!("\n{}", "Nothing to do.".green().bold());
        return;
    }

    println!("\n{}", "📦 Transaction Summary:".cyan().bold());
    println!(
        "{}",
        format!("{} change(s) marked", transaction.total_changes()).yellow()
    );

    if !transaction.modules.is_empty() {
        println!("\n{}:", "Module streams".cyan().bold());
        for module in &transaction.modules {
            println!(
                "  • {}:{} {} → {}",
                module.name.white().bold(),
                module.stream,
                module.from.red(),
                module.to.green().bold()
            );
        }
    }

    if !transaction.packages.is_empty() {
        println!("\n{}:", "Packages".cyan().bold());
        for package in &transaction.packages {
            let source = match &package.source {
                UpgradeSource::Repository(repo) => repo.clone(),
                UpgradeSource::LocalFile(path) => path.clone(),
            };
            println!(
                "  • {}.{} {} → {} ({})",
                package.name.white().bold(),
                package.arch,
                package.from.red(),
                package.to.green().bold(),
                source.dimmed()
            );
        }
    }

    if !transaction.groups.is_empty() {
        println!("\n{}:", "Groups".cyan().bold());
        for group in &transaction.groups {
            println!("  • {}", group.white().bold());
        }
    }
}
