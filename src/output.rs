use std::collections::BTreeMap;

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::error::Result;
use crate::tasks::CreateIssueOutput;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Tabled)]
struct IdRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Pretty JSON of a task output.
pub fn to_json<T: Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Name/ID table for the search task outputs.
pub fn ids_table(ids: &BTreeMap<String, String>) -> String {
    let rows = ids.iter().map(|(name, id)| IdRow {
        name: name.clone(),
        id: id.clone(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One-line status of a create run.
pub fn created_line(output: &CreateIssueOutput) -> String {
    match &output.issue_id {
        Some(id) if output.is_success => format!("{} issue {id}", "Created".green().bold()),
        _ => format!("{} issue was not created", "Failed:".red().bold()),
    }
}

/// Print a task output in the chosen format; `table` renders via `to_table`.
pub fn print<T: Serialize>(
    output: &T,
    format: OutputFormat,
    to_table: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(output)?),
        OutputFormat::Table => println!("{}", to_table(output)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_table_lists_every_pair() {
        let mut ids = BTreeMap::new();
        ids.insert("Bug".to_string(), "L1".to_string());
        ids.insert("Infra".to_string(), "L2".to_string());

        let table = ids_table(&ids);
        assert!(table.contains("Name"));
        assert!(table.contains("Bug"));
        assert!(table.contains("L2"));
    }

    #[test]
    fn created_line_reports_both_outcomes() {
        colored::control::set_override(false);

        let created = CreateIssueOutput {
            is_success: true,
            issue_id: Some("I1".into()),
        };
        assert_eq!(created_line(&created), "Created issue I1");

        let failed = CreateIssueOutput {
            is_success: false,
            issue_id: None,
        };
        assert_eq!(created_line(&failed), "Failed: issue was not created");
    }

    #[test]
    fn json_uses_task_field_names() {
        let failed = CreateIssueOutput {
            is_success: false,
            issue_id: None,
        };
        assert_eq!(to_json(&failed).unwrap(), "{\n  \"isSuccess\": false\n}");
    }
}
