use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use evaluation::EngineSettings;

#[derive(Parser, Debug)]
#[command(name = "Fickle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "UCI chess bot that alternates between best, worst, capturing and random moves")]
pub struct Args {
    /// UCI engine used to evaluate positions.
    #[arg(short, long)]
    pub engine: PathBuf,

    /// Argument passed to the engine on startup. Repeatable.
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// Engine option as NAME=VALUE, sent with setoption after startup. Repeatable.
    #[arg(long = "engine-option", value_parser = parse_engine_option)]
    pub engine_options: Vec<(String, String)>,

    /// Extra time allowed past each requested search before the engine is considered stuck.
    #[arg(long, default_value_t = 500)]
    pub eval_grace_ms: u64,

    /// Seed for reproducible strategy and move choices.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log UCI communication to a file for debugging.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Write the strategy behind each move to this file.
    #[arg(short, long)]
    pub report_file: Option<PathBuf>,
}

impl Args {
    pub fn engine_settings(&self) -> EngineSettings {
        let mut settings = EngineSettings::new(&self.engine);
        settings.args = self.engine_args.clone();
        settings.options = self.engine_options.clone();
        settings.grace = Duration::from_millis(self.eval_grace_ms);
        settings
    }
}

fn parse_engine_option(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing option name in '{}'", s));
    }

    Ok((name.to_string(), value.trim().to_string()))
}
