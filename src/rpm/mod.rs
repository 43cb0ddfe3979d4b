pub mod nevra;
pub mod version;

pub use nevra::Nevra;
pub use version::{Evr, VersionComparator};
