//! Handler functions for CLI commands.
//!
//! Handlers write their regular output to the supplied writer so they can
//! be driven from tests; notices meant for humans go to stderr.

use std::io::Write;
use std::path::{Path, PathBuf};

use agentmeta_content::{AgentDefinition, load_agent, load_agents_dir, parse_agent_file};
use agentmeta_core::Error as CoreError;

use crate::cli::{Cli, Command, ConfigAction, OutputFormat};
use crate::config::{AgentmetaConfig, resolve_config_path};
use crate::error::{Error, Result};
use crate::output;

// ============================================================================
// Command dispatch
// ============================================================================

/// Run the parsed command line, writing results to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config_path = cli.config.as_deref();
    let load = || AgentmetaConfig::load(config_path);

    match &cli.command {
        Command::Parse {
            file,
            format,
            allow,
            allow_any,
        } => cmd_parse(&load()?, file, *format, allow, *allow_any, out),
        Command::Agent { file } => cmd_agent(&load()?, file, out),
        Command::Check { files } => cmd_check(&load()?, files, out),
        Command::List { dir } => cmd_list(&load()?, dir, out),
        Command::Config { action } => handle_config_command(config_path, action, out),
    }
}

/// Handle a `config` subcommand.
pub fn handle_config_command<W: Write>(
    config_path: Option<&Path>,
    action: &ConfigAction,
    out: &mut W,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out),
        ConfigAction::Show => {
            let config = AgentmetaConfig::load(config_path)?;
            cmd_config_show(&config, out)
        }
    }
}

// ============================================================================
// Document commands
// ============================================================================

/// Print the parse result of one document.
///
/// A document without a metadata block is not a failure.
pub fn cmd_parse<W: Write>(
    config: &AgentmetaConfig,
    file: &Path,
    format: Option<OutputFormat>,
    allow: &[String],
    allow_any: bool,
    out: &mut W,
) -> Result<()> {
    let validator = config.validator(allow, allow_any);
    match parse_agent_file(file, Some(&*validator))? {
        Some(doc) => {
            let format = format.unwrap_or(config.output.format);
            out.write_all(output::render(&doc, format)?.as_bytes())?;
        }
        None => eprintln!("No metadata block found in {}", file.display()),
    }
    Ok(())
}

/// Print one document as a typed agent definition.
pub fn cmd_agent<W: Write>(config: &AgentmetaConfig, file: &Path, out: &mut W) -> Result<()> {
    let validator = config.validator(&[], false);
    let agent = load_agent(file, Some(&*validator))?.ok_or_else(|| Error::NoMetadata {
        path: file.to_path_buf(),
    })?;
    out.write_all(output::render(&agent, OutputFormat::Json)?.as_bytes())?;
    Ok(())
}

/// Check every file, report each outcome, and fail if any file failed.
pub fn cmd_check<W: Write>(config: &AgentmetaConfig, files: &[PathBuf], out: &mut W) -> Result<()> {
    let validator = config.validator(&[], false);
    let mut failed = 0;

    for file in files {
        match parse_agent_file(file, Some(&*validator)) {
            Ok(Some(doc)) => {
                let agent = AgentDefinition::from_document(&doc, file);
                match agent {
                    Ok(_) => writeln!(
                        out,
                        "ok    {} ({} keys)",
                        file.display(),
                        doc.metadata().count()
                    )?,
                    Err(e) => {
                        failed += 1;
                        writeln!(out, "FAIL  {}: {e}", file.display())?;
                    }
                }
            }
            Ok(None) => writeln!(out, "skip  {} (no metadata block)", file.display())?,
            Err(e) => {
                failed += 1;
                writeln!(out, "FAIL  {}: {}", file.display(), describe(&e))?;
            }
        }
    }

    log::debug!("Checked {} files, {failed} failed", files.len());
    if failed > 0 {
        return Err(Error::CheckFailed {
            failed,
            total: files.len(),
        });
    }
    Ok(())
}

/// List the agents defined in a directory.
pub fn cmd_list<W: Write>(config: &AgentmetaConfig, dir: &Path, out: &mut W) -> Result<()> {
    let validator = config.validator(&[], false);
    let agents = load_agents_dir(dir, Some(&*validator))?;
    if agents.is_empty() {
        eprintln!("No agents found in {}", dir.display());
        return Ok(());
    }
    out.write_all(output::agent_table(&agents).as_bytes())?;
    Ok(())
}

/// Short description of a parse failure, without repeating the path.
fn describe(err: &CoreError) -> String {
    match err {
        CoreError::MalformedBlock { .. } => "unterminated metadata block".to_string(),
        CoreError::InvalidKey { key, .. } => format!("invalid key '{key}'"),
        CoreError::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// Config commands
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path<W: Write>(config_path: Option<&Path>, out: &mut W) -> Result<()> {
    let path = resolve_config_path(config_path).ok_or_else(|| {
        CoreError::config("Could not determine config directory for this platform")
    })?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        eprintln!("(file does not exist; defaults are in effect)");
    }
    Ok(())
}

/// Show the effective configuration.
pub fn cmd_config_show<W: Write>(config: &AgentmetaConfig, out: &mut W) -> Result<()> {
    out.write_all(config.to_toml_string()?.as_bytes())?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
