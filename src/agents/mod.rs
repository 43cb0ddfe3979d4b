pub mod inventory_scanner;
pub mod target_parser;
pub mod upgrade;

pub use inventory_scanner::InventoryScanner;
pub use target_parser::TargetParser;
