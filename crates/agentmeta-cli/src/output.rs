//! Rendering of parse results and agent tables.

use std::path::{Path, PathBuf};

use agentmeta_content::AgentDefinition;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Render any serializable value in the requested format.
///
/// The result always ends with a newline.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Render agents as an aligned table, one row per agent.
pub fn agent_table(agents: &[(PathBuf, AgentDefinition)]) -> String {
    const HEADERS: [&str; 4] = ["NAME", "MODEL", "TOOLS", "FILE"];

    let rows: Vec<[String; 4]> = agents
        .iter()
        .map(|(path, agent)| {
            [
                agent.name.clone(),
                agent.model.clone().unwrap_or_else(|| "-".to_string()),
                if agent.tools.is_empty() {
                    "-".to_string()
                } else {
                    agent.tools.join(",")
                },
                file_name(path),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    let header = HEADERS.map(String::from);
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        table.push_str(line.trim_end());
        table.push('\n');
    }
    table
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
