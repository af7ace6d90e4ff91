pub mod overrides;
pub mod settings;
