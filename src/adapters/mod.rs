pub mod base;
pub mod parsers;
