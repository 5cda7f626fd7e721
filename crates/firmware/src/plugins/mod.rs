//! Keyboard plugins
//!
//! Plugins hook into firmware startup and the Focus command stream. Each
//! one owns at most one slice of the persistent settings area.

pub mod spacecadet_config;

pub use spacecadet_config::{SpaceCadetConfig, CMD_MODE, CMD_TIMEOUT};
