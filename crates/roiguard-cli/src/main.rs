// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod script;
mod session;

use std::io::Read;
use std::path::Path;

use clap::Parser;
use eventline::{debug, error, info};

use roiguard::logging::{self, LogOptions};
use roiguard::{RoiFactory, RoiguardConfig, config};

use crate::cli::{Args, Cmd};
use crate::session::Session;

fn main() {
    let args = Args::parse();

    let file = if args.no_log_file {
        None
    } else {
        Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| logging::default_log_path("roiguard.log")),
        )
    };

    let opts = LogOptions {
        file,
        verbose: args.verbose,
    };
    if let Err(e) = logging::init_logging(&opts) {
        // Logging may not be up yet; stderr is the only channel left.
        eprintln!("roiguard: failed to init logging: {e}");
        std::process::exit(1);
    }

    info!("roiguard starting");
    debug!("parsed args: {:?}", args.cmd);

    if let Err(e) = run(args) {
        error!("{e}");
        eprintln!("roiguard: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let cfg = match args.config.as_deref() {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };

    match args.cmd {
        Cmd::CheckConfig => {
            print_config(&cfg);
            Ok(())
        }

        Cmd::Run { script, alternate } => {
            let mut cfg = cfg;
            if let Some(b) = alternate {
                cfg.alternate_button = b;
            }

            let text = read_script(&script)?;
            let lines = script::parse(&text).map_err(|e| e.to_string())?;
            info!("replaying {} command(s)", lines.len());

            let mut session = Session::new(RoiFactory::from_config(&cfg));
            for line in &lines {
                let out = session.apply(line).map_err(|e| e.to_string())?;
                for l in out {
                    println!("{l}");
                }
            }
            Ok(())
        }
    }
}

fn read_script(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("read stdin: {e}"))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))
}

fn print_config(cfg: &RoiguardConfig) {
    println!("offset: ({}, {})", cfg.offset_x, cfg.offset_y);
    println!("tag: {}", cfg.tag);
    println!("metadata_key: {}", cfg.metadata_key);
    println!("marker_label: {}", cfg.marker_label);
    println!("marker_colour: 0x{:08X}", cfg.marker_colour);
    println!("alternate_button: {:?}", cfg.alternate_button);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_script_from_file() {
        let mut f = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(f, "create 1 1 5 5").expect("write");
        let text = read_script(f.path()).expect("readable");
        assert_eq!(script::parse(&text).map(|l| l.len()), Ok(1));
    }

    #[test]
    fn missing_script_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_script(&dir.path().join("nope.txt")).expect_err("missing");
        assert!(err.starts_with("read "));
    }

    #[test]
    fn missing_config_path_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = Args::parse_from([
            "roiguard",
            "--config",
            dir.path().join("none.rune").to_str().expect("utf8"),
            "check-config",
        ]);
        assert!(run(args).is_ok());
    }

    #[test]
    fn log_flags_conflict() {
        let parsed = Args::try_parse_from(["roiguard", "--log-file", "x.log", "--no-log-file", "check-config"]);
        assert!(parsed.is_err());
    }
}
