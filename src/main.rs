use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use linear_tasks::cli::{Cli, Commands, IssueCommands};
use linear_tasks::config::Config;
use linear_tasks::output;
use linear_tasks::{
    Context, CreateIssue, Result, RunContext, SearchLabels, SearchTeams,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "linear-task", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let token = config.token(cli.token.as_deref())?;

    let mut renderer = Context::new();
    renderer.extend(config.vars.clone());
    renderer.extend(cli.vars);
    let ctx = RunContext::new(renderer, config.endpoint()?);

    match cli.command {
        Commands::Issue {
            action: IssueCommands::Create(args),
        } => {
            let task = CreateIssue {
                token,
                team: args.team,
                title: args.title,
                description: args.description,
                labels: args.labels,
            };
            let result = task.run(&ctx).await?;
            output::print(&result, cli.output, output::created_line)?;
        }
        Commands::Teams { names } => {
            let task = SearchTeams {
                token,
                team_names: Some(names),
            };
            let result = task.run(&ctx).await?;
            output::print(&result, cli.output, |r| output::ids_table(&r.teams_ids))?;
        }
        Commands::Labels { names } => {
            let task = SearchLabels {
                token,
                labels: Some(names),
            };
            let result = task.run(&ctx).await?;
            output::print(&result, cli.output, |r| output::ids_table(&r.labels_ids))?;
        }
        Commands::Completions { .. } => {
            // Already handled above
        }
    }

    Ok(())
}
