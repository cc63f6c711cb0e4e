// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use roiguard_core::MouseButton;

#[derive(Debug, Parser)]
#[command(name = "roiguard", version, about = "Replay guarded-ROI sessions on a headless canvas.")]
pub struct Args {
    /// Log to stderr at debug level (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/roiguard/roiguard.log)
    #[arg(long, conflicts_with = "no_log_file")]
    pub log_file: Option<PathBuf>,

    /// Do not write a log file; log to stderr only
    #[arg(long)]
    pub no_log_file: bool,

    /// Override config path (default: $XDG_CONFIG_HOME/roiguard/roiguard.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Replay a scenario script ("-" reads stdin)
    Run {
        script: PathBuf,

        /// Button treated as the pass-through click (overrides config)
        #[arg(long, value_enum)]
        alternate: Option<MouseButton>,
    },

    /// Load the configuration and print the effective values
    CheckConfig,
}
