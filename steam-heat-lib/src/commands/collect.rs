use super::Host;
use super::ProgressReporter;
use super::common::{ColorMode, LogLevel, init_logging};
use crate::Result;
use crate::catalog::Collector;
use crate::config::Config;
use crate::ranking::RankedRecord;
use crate::reports::{generate_console, generate_csv, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError};
use std::fs;
use std::io::{BufWriter, Write};

/// Report file written when no report path is given.
pub const DEFAULT_CSV_FILE: &str = "steam_1500_games_metrics_with_heat.csv";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Path to configuration file (default is `steam-heat.toml` if present)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Number of games in the catalog
    #[arg(long, value_name = "COUNT")]
    pub target_count: Option<usize>,

    /// First listing page to request
    #[arg(long, value_name = "PAGE")]
    pub start_page: Option<u32>,

    /// Pause between listing pages (e.g. `65s`)
    #[arg(long, value_name = "DURATION", value_parser = humantime_serde::re::humantime::parse_duration)]
    pub page_delay: Option<Duration>,

    /// Pause after each achievements request (e.g. `200ms`)
    #[arg(long, value_name = "DURATION", value_parser = humantime_serde::re::humantime::parse_duration)]
    pub item_delay: Option<Duration>,

    /// Write the catalog to a CSV file (default when no other report is requested)
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Write the catalog to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Number of top-ranked games to print to the console (0 to disable)
    #[arg(long, value_name = "COUNT", default_value_t = 15, help_heading = "Report Output")]
    pub top: usize,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl CollectArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(target_count) = self.target_count {
            config.target_count = target_count;
        }
        if let Some(start_page) = self.start_page {
            config.start_page = start_page;
        }
        if let Some(page_delay) = self.page_delay {
            config.page_delay = page_delay;
        }
        if let Some(item_delay) = self.item_delay {
            config.item_delay = item_delay;
        }
    }

    /// CSV destination, falling back to the default file when no report is requested.
    fn csv_path(&self) -> Option<Utf8PathBuf> {
        match (&self.csv, &self.json) {
            (Some(path), _) => Some(path.clone()),
            (None, None) => Some(Utf8PathBuf::from(DEFAULT_CSV_FILE)),
            (None, Some(_)) => None,
        }
    }
}

pub async fn process_collect<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    init_logging(args.log_level);

    let mut config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let progress = ProgressReporter::new(args.log_level == LogLevel::None, args.color.for_stderr());
    let collector = Collector::new(&config, progress)?;

    let records = match collector.collect().await {
        Ok(records) => records,
        Err(e) => {
            let _ = writeln!(host.error(), "Unable to build the catalog: {e:#}");
            return Err(e);
        }
    };

    report(host, args, &records)
}

fn report<H: Host>(host: &mut H, args: &CollectArgs, records: &[RankedRecord]) -> Result<()> {
    if args.top > 0 && !records.is_empty() {
        let mut console_output = String::new();
        generate_console(records, args.top, args.color.for_stdout(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(path) = args.csv_path() {
        let file = fs::File::create(&path).into_app_err_with(|| format!("creating CSV report '{path}'"))?;
        generate_csv(records, BufWriter::new(file)).map_err(|e| e.enrich_with(|| format!("writing CSV report '{path}'")))?;
        let _ = writeln!(host.output(), "Wrote {} games to {path}", records.len());
    }

    if let Some(path) = &args.json {
        let mut json_output = String::new();
        generate_json(records, &mut json_output)?;
        fs::write(path, json_output).into_app_err_with(|| format!("writing JSON report '{path}'"))?;
        let _ = writeln!(host.output(), "Wrote {} games to {path}", records.len());
    }

    Ok(())
}
