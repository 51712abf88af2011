pub mod env_file;
pub mod env_snapshot;
pub mod merge_step;
pub mod profile;
pub mod resolved;
pub mod settings;
