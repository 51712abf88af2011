pub mod base_config;
pub mod parser;
