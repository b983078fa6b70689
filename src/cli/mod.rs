//! CLI module for recap
//!
//! Contains argument parsing and command implementations.

pub mod args;
pub mod commands;

pub use args::{CacheCommand, Cli, Commands, ConfigCommand};
