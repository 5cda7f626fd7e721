//! Core firmware infrastructure
//!
//! Firmware-specific support code shared by the plugins. Pure settings and
//! protocol types come from `spacecadet_core` and are re-exported here so
//! firmware code can use `crate::core::X`.

pub mod logging;

// Re-export pure types from spacecadet_core
pub use spacecadet_core::focus;
pub use spacecadet_core::settings;
pub use spacecadet_core::spacecadet;
pub use spacecadet_core::traits;
