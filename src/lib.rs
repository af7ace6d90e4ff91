pub mod cli;
pub mod config;
pub mod errors;
pub mod ingestion;
pub mod ranking;
pub mod services;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::config::overrides::{get_overrides, SpecialOverrides};
use crate::config::settings::AppConfig;
use crate::services::ranking::RankingService;
use crate::services::report;
use crate::services::sync::SyncService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn build_config(data_dir: Option<PathBuf>, reference: Option<PathBuf>) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(dir) = data_dir {
        config.data.data_dir = dir;
    }
    if let Some(path) = reference {
        config.data.reference_file = path;
    }
    config
}

pub fn handle_rank(
    mut config: AppConfig,
    overrides: Option<PathBuf>,
    parallel: bool,
    json: Option<PathBuf>,
    items: bool,
) -> Result<()> {
    config.ranking.parallel = parallel;
    let overrides = match overrides {
        Some(path) => SpecialOverrides::load(path)?,
        None => get_overrides(),
    };

    let service = RankingService::new(config, overrides);
    let outcome = service.run()?;
    report::print_ranking(&outcome);
    if items {
        report::print_item_coverage(&outcome);
    }

    if let Some(path) = json {
        RankingService::write_json(&outcome, &path)?;
    }
    Ok(())
}

pub fn handle_sync(config: AppConfig) -> Result<()> {
    let service = SyncService::new(config);
    let changes = service.promote(Local::now().date_naive())?;
    report::print_changes(&changes);
    Ok(())
}

pub fn handle_roster(config: AppConfig) -> Result<()> {
    let service = SyncService::new(config);
    let roster = service.check_roster()?;
    report::print_roster(&roster);
    Ok(())
}

pub fn handle_diff(config: AppConfig, out: Option<PathBuf>) -> Result<()> {
    let service = RankingService::new(config, SpecialOverrides::empty());
    let diff = service.differences()?;
    report::print_differences(&diff);

    if let Some(dir) = out {
        diff.write_csv(&dir)?;
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
