//! Settings loading and flag configuration merging
//!
//! `loader` layers global settings (file, environment, CLI). `merge` builds
//! the configuration update payload from a YAML document plus per-field
//! overrides, using the lenient parsers in `parse`.

pub mod loader;
pub mod merge;
pub mod parse;

pub use loader::{load_settings, Settings, SettingsOverrides};
pub use merge::{merge_flag_config, ConfigOverrides};
