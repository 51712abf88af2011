pub mod derive;
pub mod merge;
pub mod provision;
pub mod resolver;
