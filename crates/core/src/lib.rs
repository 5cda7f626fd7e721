//! spacecadet_core - Pure no_std logic for the Space Cadet settings plugin
//!
//! This crate contains the platform-agnostic types used to persist and
//! remotely configure Space Cadet Shift. It can be tested on host without
//! any feature flags or firmware dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Storage and Focus injected via traits
//!
//! # Modules
//!
//! - [`spacecadet`]: Mode enumeration, settings record and live state
//! - [`settings`]: Storage slice allocation and the fixed-size record codec
//! - [`traits`]: Storage abstraction with an in-memory mock
//! - [`focus`]: Focus command protocol trait and line implementation

#![no_std]

pub mod focus;
pub mod settings;
pub mod spacecadet;
pub mod traits;
