use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pkgup",
    about = "Package upgrade orchestrator - upgrade modules, package files, packages and groups",
    version,
    author
)]
pub struct Cli {
    /// Inventory root containing inventory.toml (and optionally comps.xml)
    #[arg(short, long, default_value = ".")]
    pub root: String,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the resulting transaction as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upgrade a package or packages on your system
    #[command(visible_aliases = ["update", "upgrade-to", "update-to", "up"])]
    Upgrade {
        /// Packages, package files (*.rpm) or @groups to upgrade; nothing means everything
        #[arg(value_name = "PACKAGE")]
        targets: Vec<String>,

        /// Only consider upgrades that fix a security advisory
        #[arg(long)]
        security: bool,
    },

    /// Upgrade, but only to the lowest versions that fix a security advisory
    #[command(visible_alias = "update-minimal")]
    UpgradeMinimal {
        /// Packages, package files (*.rpm) or @groups to upgrade; nothing means everything
        #[arg(value_name = "PACKAGE")]
        targets: Vec<String>,
    },
}
