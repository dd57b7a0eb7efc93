//! Command dispatch logic for steam-heat

use super::{CollectArgs, InitArgs, ValidateArgs, init_config, process_collect, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "steam-heat", version, author, long_about = None)]
#[command(about = "Build a ranked catalog of popular Steam games")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: HeatSubcommand,
}

#[derive(Subcommand, Debug)]
enum HeatSubcommand {
    /// Collect, enrich, and rank the catalog, then write reports
    Collect(Box<CollectArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This is called from `main.rs` with the program arguments. The first item
/// is the program name, as with `std::env::args()`.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match Cli::parse_from(args).command {
        HeatSubcommand::Collect(collect_args) => process_collect(host, &collect_args).await,
        HeatSubcommand::Init(init_args) => init_config(host, &init_args),
        HeatSubcommand::Validate(validate_args) => validate_config(host, &validate_args),
    }
}
