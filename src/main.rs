use anyhow::{Context, Result};
use clap::Parser;
use radon_report::{Config, Error, manager::Manager};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Semicolon-delimited sensor export to report on.
    input_file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        let code = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<Error>())
            .map_or(1, Error::exit_code);
        std::process::exit(code);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::debug!("{args:#?}");

    let input_file = args
        .input_file
        .ok_or_else(|| Error::usage("please specify the input file as argument"))?;

    let cfg = Config::from_env().context("failed to load config")?;
    log::debug!("{cfg:#?}");

    let mgr = Manager::new(input_file, cfg);
    mgr.run_report().context("failed to produce radon report")?;

    Ok(())
}
