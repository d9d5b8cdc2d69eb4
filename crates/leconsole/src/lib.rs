// leconsole - Command Line
//
// *La Console* (The Console) - CLI and project configuration for LeRendu

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

//! Command-line front end for the `lerendu` syntax tree renderer.
//!
//! The `lerendu` binary parses source files with tree-sitter and prints
//! their trees as indented text, JSON records or HTML. Defaults come from
//! `.lerendu/config.toml` and can be overridden per invocation.

/// Command-line interface
pub mod cli;

/// Project configuration
pub mod config;

pub use cli::{Cli, Commands};
pub use config::{OutputFormat, ProjectConfig, RenderConfig};
