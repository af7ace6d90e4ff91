use anyhow::Result;

use neighbourhood_ranking::cli::{Cli, Command};
use neighbourhood_ranking::{
    build_config, handle_completions, handle_diff, handle_rank, handle_roster, handle_sync,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let Cli { data_dir, command } = cli;
    match command {
        Command::Rank {
            reference,
            overrides,
            parallel,
            json,
            items,
        } => handle_rank(build_config(data_dir, reference), overrides, parallel, json, items),
        Command::Sync => handle_sync(build_config(data_dir, None)),
        Command::Roster => handle_roster(build_config(data_dir, None)),
        Command::Diff { reference, out } => handle_diff(build_config(data_dir, reference), out),
        Command::Completions { shell } => handle_completions(shell),
    }
}
