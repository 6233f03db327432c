extern crate env_logger;
#[macro_use]
extern crate log;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

mod alarm;
mod cli;
mod cutoff;
mod io;
mod stats;

use cli::Cli;

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("seedcut v{}", cli::VERSION);

    let stats_text = io::read_stats_text(&cli.stats)?;

    let target = cutoff::coverage_target(cli.genome_size.0, cli.coverage)?;
    let cutoff = cutoff::compute(target, &stats_text).with_context(|| {
        format!(
            "User-provided genome_size: {}\nDesired coverage: {}",
            cli.genome_size, cli.coverage
        )
    })?;

    info!(
        "Length cutoff for {}× coverage of a {}-base genome: {}",
        cli.coverage, cli.genome_size, cutoff
    );

    // the numeral alone, so that `$(seedcut ...)` substitutes cleanly
    let mut writer = io::get_writer(&cli.output)?;
    write!(writer, "{cutoff}")?;
    writer.flush()?;

    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        // leave a structured record behind for any supervising pipeline
        if let Err(alarm_err) = alarm::AlarmSink::from_env().report(&err) {
            warn!("Could not write alarm file: {}", alarm_err);
        }

        std::process::exit(1);
    }
}
