use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "linear-task")]
#[command(about = "Run a Linear workflow task: create an issue or look up team and label ids", version)]
#[command(after_help = "EXAMPLES:
    linear-task issue create --team Core -t \"Workflow failed\" --label Bug
    linear-task teams --name Core --name Platform
    linear-task labels -o json
    linear-task --var run=42 issue create --team Core -t \"Run {{ run }} failed\"")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Linear API token, sent as-is in the Authorization header (template)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Template variable available to every input (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", global = true, value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Debug logging and full error chains
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage issues
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// Look up team ids by name
    #[command(after_help = "EXAMPLES:
    linear-task teams
    linear-task teams --name Core")]
    Teams {
        /// Team name to keep (repeatable, case sensitive); all teams if omitted
        #[arg(long = "name")]
        names: Vec<String>,
    },
    /// Look up label ids by name
    #[command(after_help = "EXAMPLES:
    linear-task labels
    linear-task labels --name Bug --name Workflow")]
    Labels {
        /// Label name to keep (repeatable, case sensitive); all labels if omitted
        #[arg(long = "name")]
        names: Vec<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// Open an issue in a team
    #[command(after_help = "EXAMPLES:
    linear-task issue create --team Core -t \"Workflow failed\"
    linear-task issue create --team core -t \"Nightly\" -d \"{{ env.RUN_URL }}\" --label Bug --label Workflow")]
    Create(IssueCreateArgs),
}

#[derive(Args)]
pub struct IssueCreateArgs {
    /// Team name (case insensitive)
    #[arg(long)]
    pub team: String,

    /// Issue title
    #[arg(long, short)]
    pub title: String,

    /// Issue description
    #[arg(long, short, default_value = "")]
    pub description: String,

    /// Label name (repeatable, case sensitive); unknown names are skipped
    #[arg(long = "label")]
    pub labels: Vec<String>,
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_repeated_labels() {
        let cli = Cli::try_parse_from([
            "linear-task",
            "--var",
            "run=42",
            "issue",
            "create",
            "--team",
            "Core",
            "-t",
            "Run {{ run }} failed",
            "--label",
            "Bug",
            "--label",
            "Infra",
        ])
        .unwrap();

        assert_eq!(cli.vars, vec![("run".to_string(), "42".to_string())]);
        match cli.command {
            Commands::Issue {
                action: IssueCommands::Create(args),
            } => {
                assert_eq!(args.team, "Core");
                assert_eq!(args.description, "");
                assert_eq!(args.labels, vec!["Bug", "Infra"]);
            }
            _ => panic!("expected issue create"),
        }
    }

    #[test]
    fn search_names_default_to_empty() {
        let cli = Cli::try_parse_from(["linear-task", "labels", "-o", "json"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Labels { names } if names.is_empty()));
    }

    #[test]
    fn var_requires_a_key() {
        assert!(parse_var("=value").is_err());
        assert!(parse_var("novalue").is_err());
        assert_eq!(parse_var("a=b=c").unwrap(), ("a".into(), "b=c".into()));
    }
}
