pub mod app_config;
pub mod constants;
pub mod profiles;
