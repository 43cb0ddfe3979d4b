pub mod glob;
pub mod path_validator;

pub use glob::SpecMatcher;
pub use path_validator::PathValidator;
