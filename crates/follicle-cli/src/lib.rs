//! follicle-cli library root.
//!
//! Exposes the config, answer sheet and command modules so integration
//! tests can exercise them without going through argument parsing.

pub mod answers;
pub mod commands;
pub mod config;
