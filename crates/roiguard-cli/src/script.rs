// Author: Dustin Pilgrim
// License: MIT
//
// Line-oriented scenario scripts:
//
//   # comment
//   bounds 0 200 0 100
//   image scan
//   create 190 10 30 20
//   create-cancel
//   drag 1 50 50 30 20
//   move 1 50 50 30 20
//   click 1 secondary
//   activate 1
//   delete 1
//   show

use roiguard_core::{MouseButton, Position};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command \"{cmd}\"")]
    UnknownCommand { line: usize, cmd: String },

    #[error("line {line}: {cmd} expects {expected} argument(s), got {got}")]
    Arity {
        line: usize,
        cmd: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: invalid number \"{value}\"")]
    Number { line: usize, value: String },

    #[error("line {line}: invalid roi reference \"{value}\" (1-based)")]
    RoiRef { line: usize, value: String },

    #[error("line {line}: invalid button \"{value}\" (primary|secondary|middle)")]
    Button { line: usize, value: String },

    #[error("line {line}: no roi #{roi}")]
    NoSuchRoi { line: usize, roi: usize },

    #[error("line {line}: {message}")]
    Rejected { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bounds { x: (f64, f64), y: (f64, f64) },
    Image { name: String },
    Create(Position),
    CreateCancel,
    Drag { roi: usize, to: Position },
    Move { roi: usize, to: Position },
    Click { roi: usize, button: MouseButton },
    Activate { roi: usize },
    Delete { roi: usize },
    Show,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub command: Command,
}

pub fn parse(text: &str) -> Result<Vec<Line>, ScriptError> {
    let mut out = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut words = content.split_whitespace();
        let Some(head) = words.next() else { continue };
        let args: Vec<&str> = words.collect();

        let command = parse_command(number, head, &args)?;
        out.push(Line { number, command });
    }

    Ok(out)
}

fn parse_command(line: usize, head: &str, args: &[&str]) -> Result<Command, ScriptError> {
    let cmd = match head {
        "bounds" => {
            arity(line, "bounds", args, 4)?;
            let v = numbers(line, args)?;
            Command::Bounds {
                x: (v[0], v[1]),
                y: (v[2], v[3]),
            }
        }
        "image" => {
            arity(line, "image", args, 1)?;
            Command::Image {
                name: args[0].to_string(),
            }
        }
        "create" => {
            arity(line, "create", args, 4)?;
            Command::Create(rect(line, args)?)
        }
        "create-cancel" => {
            arity(line, "create-cancel", args, 0)?;
            Command::CreateCancel
        }
        "drag" => {
            arity(line, "drag", args, 5)?;
            Command::Drag {
                roi: roi_ref(line, args[0])?,
                to: rect(line, &args[1..])?,
            }
        }
        "move" => {
            arity(line, "move", args, 5)?;
            Command::Move {
                roi: roi_ref(line, args[0])?,
                to: rect(line, &args[1..])?,
            }
        }
        "click" => {
            arity(line, "click", args, 2)?;
            let button = MouseButton::parse(args[1]).ok_or_else(|| ScriptError::Button {
                line,
                value: args[1].to_string(),
            })?;
            Command::Click {
                roi: roi_ref(line, args[0])?,
                button,
            }
        }
        "activate" => {
            arity(line, "activate", args, 1)?;
            Command::Activate {
                roi: roi_ref(line, args[0])?,
            }
        }
        "delete" => {
            arity(line, "delete", args, 1)?;
            Command::Delete {
                roi: roi_ref(line, args[0])?,
            }
        }
        "show" => {
            arity(line, "show", args, 0)?;
            Command::Show
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                cmd: other.to_string(),
            });
        }
    };
    Ok(cmd)
}

fn arity(line: usize, cmd: &'static str, args: &[&str], expected: usize) -> Result<(), ScriptError> {
    if args.len() != expected {
        return Err(ScriptError::Arity {
            line,
            cmd,
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn numbers(line: usize, args: &[&str]) -> Result<Vec<f64>, ScriptError> {
    args.iter()
        .map(|a| {
            a.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ScriptError::Number {
                    line,
                    value: a.to_string(),
                })
        })
        .collect()
}

fn rect(line: usize, args: &[&str]) -> Result<Position, ScriptError> {
    let v = numbers(line, args)?;
    Ok(Position::new(v[0], v[1], v[2], v[3]))
}

fn roi_ref(line: usize, s: &str) -> Result<usize, ScriptError> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ScriptError::RoiRef {
            line,
            value: s.to_string(),
        }),
    }
}
