//! # Glass Replay
//!
//! Headless driver for the glass engine. Builds a demo page, replays a
//! scripted interaction session against it and prints the render commands of
//! every `render` step.
//!
//! ```bash
//! # Built-in tour with default constants
//! glass_replay
//!
//! # Custom constants and session, with engine logs
//! RUST_LOG=glass_ui=trace glass_replay --config glass.toml --session sessions/tour.toml
//! ```

mod demo;
mod logging;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use glass_ui::{GlassConfig, GlassError, GlassResult};

use crate::demo::Demo;
use crate::script::Session;

/// Session replayed when none is given.
const TOUR: &str = include_str!("../sessions/tour.toml");

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    session: Option<PathBuf>,
    verbose: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> GlassResult<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => parsed.config = Some(Self::value(&arg, args.next())?),
                "--session" | "-s" => parsed.session = Some(Self::value(&arg, args.next())?),
                "--verbose" | "-v" => parsed.verbose = true,
                other => {
                    return Err(GlassError::InvalidConfig(format!("unknown argument `{other}`")));
                }
            }
        }
        Ok(parsed)
    }

    fn value(flag: &str, value: Option<String>) -> GlassResult<PathBuf> {
        value
            .map(PathBuf::from)
            .ok_or_else(|| GlassError::InvalidConfig(format!("`{flag}` expects a path")))
    }
}

fn load_session(path: Option<&PathBuf>) -> GlassResult<Session> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| GlassError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Session::from_toml_str(&text)
        }
        None => Session::from_toml_str(TOUR),
    }
}

fn run(args: &Args) -> GlassResult<usize> {
    let config = match &args.config {
        Some(path) => GlassConfig::load(path)?,
        None => GlassConfig::default(),
    };
    let session = load_session(args.session.as_ref())?;
    tracing::info!(
        "replaying {} steps over {} ms (reduced motion: {})",
        session.steps.len(),
        session.duration_ms(),
        config.reduced_motion
    );

    let mut demo = Demo::build(config)?;
    for step in &session.steps {
        tracing::debug!("t={} ms {:?}", step.at_ms, step.action);
        if let Some(commands) = demo.apply(step)? {
            println!("--- frame @ {} ms (viewport {}) ---", step.at_ms, demo.viewport_width());
            for command in &commands {
                println!("{command:?}");
            }
        }
    }

    for label in ["nav", "hero", "specs", "cta"] {
        if let Some(overlay) = demo.surface(label).and_then(|surface| surface.overlay()) {
            tracing::debug!("{label} overlay at end: {:?}", overlay.state());
        }
    }
    tracing::info!(
        "active tab {}, headline {}, {} tasks before shutdown",
        demo.tabs().active(),
        if demo.typewriter().is_finished() { "typed" } else { "still typing" },
        demo.scheduler().active_tasks()
    );

    let leaked = demo.shutdown();
    tracing::info!("session finished, {} elements in tree", demo.tree().len());
    Ok(leaked)
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("glass_replay: {err}");
            eprintln!("usage: glass_replay [--config PATH] [--session PATH] [--verbose]");
            return ExitCode::from(2);
        }
    };
    logging::init(args.verbose);

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(leaked) => {
            tracing::error!("{leaked} tasks still scheduled after shutdown");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("replay failed: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> GlassResult<Args> {
        Args::parse(list.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["-c", "glass.toml", "--verbose"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("glass.toml")));
        assert!(parsed.session.is_none());
        assert!(parsed.verbose);
    }

    #[test]
    fn test_missing_value_and_unknown_flag() {
        assert!(args(&["--session"]).is_err());
        assert!(args(&["--fast"]).is_err());
    }

    #[test]
    fn test_builtin_tour_replays_cleanly() {
        let leaked = run(&Args::default()).unwrap();
        assert_eq!(leaked, 0);
    }
}
