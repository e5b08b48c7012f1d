mod args;
mod bot;
mod report;
mod worker;

use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use args::Args;
use bot::Fickle;
use clap::Parser;
use evaluation::EngineClient;
use log::{info, LevelFilter};
use report::ReportFile;
use selector::{MoveSelector, SelectorConfig};
use simplelog::{Config, WriteLogger};

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let client = EngineClient::spawn(args.engine_settings())?;
    info!("Evaluating with {}", args.engine.display());

    let config = SelectorConfig::default();
    let mut selector = MoveSelector::new(Arc::new(client), config.build_strategy()?);
    if let Some(seed) = args.seed {
        selector = selector.with_seed(seed);
    }

    let report_file = args.report_file.clone().map(ReportFile::new);

    Fickle::new(config, selector, report_file).run()
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(log_file)?,
        )?;
    }

    Ok(args)
}
