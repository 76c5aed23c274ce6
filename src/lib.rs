//! i18n-inline - build-time translation inliner
//!
//! Replaces calls to the translate functions (`__` and `__n` by default) in
//! JavaScript and TypeScript sources with the localized string, so the
//! shipped bundle carries no lookup table. Keys without a translation fall
//! back to the key itself and are reported once per module, as a warning or,
//! with `failOnMissing`, as an error.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, report printing)
//! - `config`: Configuration file loading and parsing
//! - `core`: Transform engine (call matching, lookup, substitution, driver)
//! - `issues`: Module diagnostic types

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
