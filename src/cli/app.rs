//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{course, task, today};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "studyplan")]
#[command(author, version, about = "A console study planner with prerequisite-aware courses")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Planner state file (overrides the configured default)
    #[arg(long, short = 'F', global = true, env = "STUDYPLAN_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage courses and their prerequisites
    #[command(subcommand)]
    Course(course::CourseCommands),

    /// Manage the task backlog
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Work through today's queue
    #[command(subcommand)]
    Today(today::TodayCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("studyplan starting");

    let config = Config::load()?;
    let state_path = config.state_file(cli.file);
    output.verbose(&format!("State file: {}", state_path.display()));

    match cli.command {
        Commands::Course(cmd) => course::run(cmd, &output, &state_path)?,
        Commands::Task(cmd) => task::run(cmd, &output, &state_path)?,
        Commands::Today(cmd) => today::run(cmd, &output, &state_path)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
