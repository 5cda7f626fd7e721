//! Core traits for platform-agnostic plugin functionality.
//!
//! This module provides trait abstractions that decouple the settings logic
//! from platform-specific storage backends.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Flash-backed implementations live in the firmware crate

pub mod storage;

pub use storage::{MockStorage, Storage};
