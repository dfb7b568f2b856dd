//! # agentmeta-cli
//!
//! Command-line interface for agent definition metadata:
//! - `parse`: print the metadata and body of one document
//! - `agent`: print one document as a typed agent definition
//! - `check`: validate many documents
//! - `list`: tabulate the agents in a directory
//! - `config`: show the configuration file path and effective settings

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command, ConfigAction, OutputFormat};
pub use commands::run;
pub use config::AgentmetaConfig;
pub use error::{Error, Result};
