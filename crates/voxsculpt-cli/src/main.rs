//! `voxsculpt` – command line host for the sculpting core.
//!
//! ```text
//! voxsculpt replay <capture.jsonl> [--config <path>] [--out <snapshot.json>]
//! voxsculpt init-config [--config <path>]
//! ```
//!
//! `replay` pushes a recorded tracker capture through an interaction
//! session, printing every mode change and a final summary.  `init-config`
//! writes the default configuration so it can be tuned by hand.
//!
//! Ctrl-C stops a replay after the current frame; the summary is still
//! printed.

mod replay;

use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use voxsculpt_runtime::{InteractionSession, SculptConfig, config, telemetry};
use voxsculpt_types::SculptError;

#[derive(Debug, PartialEq)]
enum Command {
    Replay {
        capture: PathBuf,
        config: Option<PathBuf>,
        out: Option<PathBuf>,
    },
    InitConfig {
        config: Option<PathBuf>,
    },
    Help,
}

fn main() -> ExitCode {
    telemetry::init_tracing("voxsculpt");

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{}: {}", "error".red().bold(), msg);
            print_usage();
            return ExitCode::from(2);
        }
    };

    let result = match command {
        Command::Help => {
            print_banner();
            print_usage();
            Ok(())
        }
        Command::InitConfig { config } => init_config(config),
        Command::Replay {
            capture,
            config,
            out,
        } => {
            print_banner();
            run_replay(capture, config, out)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

fn run_replay(
    capture: PathBuf,
    config_path: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<(), SculptError> {
    // ── Shared shutdown flag ──────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – stopping replay …".yellow().bold());
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; replay cannot be interrupted");
    }

    let cfg = load_config(config_path.as_deref())?;
    let frames = replay::read_capture(&capture)?;
    println!(
        "  Replaying {} frame(s) from {}\n",
        frames.len(),
        capture.display().to_string().bold()
    );

    let mut session = InteractionSession::new(cfg)?;
    let summary = replay::replay(&mut session, &frames, &shutdown, |t| {
        println!(
            "  {:>6}  {} {} {}",
            format!("#{}", t.frame).dimmed(),
            t.from.as_str().dimmed(),
            "→".dimmed(),
            t.to.as_str().bold()
        );
    });

    println!();
    if summary.interrupted {
        println!("  {}", "Replay interrupted.".yellow());
    }
    println!("  Frames processed : {}", summary.frames);
    println!("  Mode changes     : {}", summary.transitions.len());
    println!("  Final mode       : {}", summary.last.mode.as_str().bold());
    println!("  Voxels           : {}", summary.last.voxel_count);
    println!(
        "  Active colour    : {} (#{})",
        summary.last.active_color, summary.last.palette_index
    );

    if let Some(out) = out {
        let json = serde_json::to_string_pretty(&summary.last)
            .map_err(|e| SculptError::Io(e.to_string()))?;
        std::fs::write(&out, json)
            .map_err(|e| SculptError::Io(format!("cannot write {}: {e}", out.display())))?;
        println!(
            "\n  {} Snapshot written to {}",
            "✓".green().bold(),
            out.display().to_string().bold()
        );
    }
    Ok(())
}

fn init_config(custom: Option<PathBuf>) -> Result<(), SculptError> {
    let path = custom.clone().unwrap_or_else(config::config_path);
    if path.exists() {
        println!(
            "  Config already present at {}",
            path.display().to_string().bold()
        );
        return Ok(());
    }
    let defaults = SculptConfig::default();
    match custom {
        Some(p) => config::save_to(&defaults, &p)?,
        None => config::save(&defaults)?,
    }
    println!(
        "  {} Config saved to {}",
        "✓".green().bold(),
        path.display().to_string().bold()
    );
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<SculptConfig, SculptError> {
    let cfg = match path {
        Some(p) => config::load_from(p)?,
        None => config::load()?,
    };
    let shown = path.map_or_else(config::config_path, std::path::Path::to_path_buf);
    println!("  Config from {}", shown.display().to_string().dimmed());
    Ok(cfg)
}

// ─────────────────────────────────────────────────────────────────────────────
// Arguments
// ─────────────────────────────────────────────────────────────────────────────

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let Some(sub) = args.next() else {
        return Ok(Command::Help);
    };

    let mut positional = Vec::new();
    let mut config = None;
    let mut out = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(args.next().ok_or("--config needs a path")?));
            }
            "--out" => {
                out = Some(PathBuf::from(args.next().ok_or("--out needs a path")?));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }

    match sub.as_str() {
        "replay" => {
            let mut positional = positional.into_iter();
            let capture = positional.next().ok_or("replay needs a capture file")?;
            if positional.next().is_some() {
                return Err("replay takes a single capture file".to_string());
            }
            Ok(Command::Replay {
                capture,
                config,
                out,
            })
        }
        "init-config" => {
            if !positional.is_empty() || out.is_some() {
                return Err("init-config only accepts --config".to_string());
            }
            Ok(Command::InitConfig { config })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(format!("unknown command {other}")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("{}", r#"  _  _         ___           _      _   "#.bold().cyan());
    println!("{}", r#" | || |_____ _/ __| __ _  _ | |_ __| |_ "#.bold().cyan());
    println!("{}", r#" | \/ / _ \ \ \__ \/ _| || || | '_ \  _|"#.bold().cyan());
    println!("{}", r#"  \__/\___/_\_\___/\__|\_,_||_| .__/\__|"#.bold().cyan());
    println!("{}", r#"                               |_|      "#.bold().cyan());
    println!();
    println!(
        "  {} {}",
        "voxsculpt".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Gesture-driven voxel sculpting");
    println!();
}

fn print_usage() {
    println!("  Usage:");
    println!(
        "    {} <capture.jsonl> [--config <path>] [--out <snapshot.json>]",
        "voxsculpt replay".bold()
    );
    println!("    {} [--config <path>]", "voxsculpt init-config".bold());
    println!();
}
