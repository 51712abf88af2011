pub mod default_base;
pub mod toml_base;

pub use default_base::DefaultBase;
pub use toml_base::TomlBase;
