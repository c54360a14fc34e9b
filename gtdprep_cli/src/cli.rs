use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use enum_dispatch::enum_dispatch;
use gtdprep::{
    audit::MissingValueReport, config::Config, country_names::CountryNameMapping,
    encoding::SourceEncoding, formatters::OutputFormat, Pipeline,
};
use itertools::Itertools;
use log::{debug, info};
use spinners::{Spinner, Spinners};

use crate::display::{display_country_names, display_missing_values, display_preview};
use crate::error::GtdPrepCliResult;

const DEFAULT_PROGRESS_SPINNER: Spinners = Spinners::Dots;
const COMPLETE_PROGRESS_STRING: &str = "✔";
const RUNNING_TAIL_STRING: &str = "...";
const LOADING_STRING: &str = "Loading incidents";

/// Runs `f` while showing a progress spinner, unless `quiet` is set.
fn with_spinner<T>(quiet: bool, f: impl FnOnce() -> T) -> T {
    let sp = (!quiet).then(|| {
        Spinner::with_timer(
            DEFAULT_PROGRESS_SPINNER,
            LOADING_STRING.to_string() + RUNNING_TAIL_STRING,
        )
    });
    let result = f();
    if let Some(mut s) = sp {
        s.stop_with_symbol(COMPLETE_PROGRESS_STRING);
    }
    result
}

/// Trait that defines what to run when a given subcommand is invoked.
#[enum_dispatch]
pub trait RunCommand {
    fn run(&self, config: Config) -> GtdPrepCliResult<()>;
}

/// Options shared by every command that reads the GTD export. Each overrides the matching
/// config field when given.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(short = 'i', long, help = "GTD export to read")]
    input: Option<PathBuf>,
    #[arg(
        short = 'e',
        long,
        value_name = "LABEL",
        help = "Encoding of the input, e.g. latin1 or utf-8"
    )]
    encoding: Option<SourceEncoding>,
    #[arg(long, help = "Keep `country_txt` as spelled in the GTD")]
    no_country_names: bool,
}

impl InputArgs {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if self.no_country_names {
            config.country_names = CountryNameMapping::empty();
        }
        config
    }
}

/// The `clean` command runs the whole pipeline and writes the cleaned incidents.
#[derive(Args, Debug, Default)]
pub struct CleanCommand {
    #[command(flatten)]
    input_args: InputArgs,
    #[arg(short = 'o', long, help = "Output file to place the cleaned data")]
    output: Option<PathBuf>,
    #[arg(
        short = 'f',
        long,
        value_name = "csv|parquet",
        help = "Output format for the cleaned data"
    )]
    output_format: Option<OutputFormat>,
    #[arg(long, help = "Number of rows to preview")]
    preview_rows: Option<usize>,
    #[arg(from_global)]
    quiet: bool,
}

impl CleanCommand {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Self::default()
        }
    }

    fn config(&self, config: Config) -> Config {
        let mut config = self.input_args.apply(config);
        if let Some(output) = &self.output {
            config.output_path = Some(output.clone());
        }
        if let Some(output_format) = self.output_format {
            config.output_format = output_format;
        }
        if let Some(preview_rows) = self.preview_rows {
            config.preview_rows = preview_rows;
        }
        config
    }
}

impl RunCommand for CleanCommand {
    fn run(&self, config: Config) -> GtdPrepCliResult<()> {
        info!("Running `clean` subcommand");
        let pipeline = Pipeline::new(self.config(config));
        let incidents = with_spinner(self.quiet, || pipeline.load())?;
        let preview = pipeline.preview(&incidents);
        display_preview(&preview)?;
        let outcome = pipeline.finish(incidents, preview)?;
        debug!("{outcome:#?}");
        display_missing_values(&outcome.missing_values);
        info!(
            "Wrote {} rows ({} country names renamed) to {}",
            outcome.rows_written,
            outcome.countries_renamed,
            outcome.output_path.display()
        );
        Ok(())
    }
}

/// The `audit` command reports missing values in the cleaned data without writing it.
#[derive(Args, Debug)]
pub struct AuditCommand {
    #[command(flatten)]
    input_args: InputArgs,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
    #[arg(from_global)]
    quiet: bool,
}

impl RunCommand for AuditCommand {
    fn run(&self, config: Config) -> GtdPrepCliResult<()> {
        info!("Running `audit` subcommand");
        let pipeline = Pipeline::new(self.input_args.apply(config));
        let cleaned = with_spinner(self.quiet, || pipeline.prepare())?;
        let report = MissingValueReport::from_df(&cleaned);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            display_missing_values(&report);
        }
        Ok(())
    }
}

/// The `preview` command prints the first rows of the data as loaded.
#[derive(Args, Debug)]
pub struct PreviewCommand {
    #[command(flatten)]
    input_args: InputArgs,
    #[arg(short = 'n', long, help = "Number of rows to show")]
    rows: Option<usize>,
    #[arg(from_global)]
    quiet: bool,
}

impl RunCommand for PreviewCommand {
    fn run(&self, config: Config) -> GtdPrepCliResult<()> {
        info!("Running `preview` subcommand");
        let rows = self.rows.unwrap_or(config.preview_rows);
        let pipeline = Pipeline::new(self.input_args.apply(config));
        let incidents = with_spinner(self.quiet, || pipeline.load())?;
        display_preview(&incidents.head(Some(rows)))?;
        Ok(())
    }
}

/// The `country-names` command lists the country name mapping in use.
#[derive(Args, Debug)]
pub struct CountryNamesCommand;

impl RunCommand for CountryNamesCommand {
    fn run(&self, config: Config) -> GtdPrepCliResult<()> {
        info!("Running `country-names` subcommand");
        if config.country_names.is_empty() {
            println!("No country names are renamed.");
        } else {
            println!(
                "\nThe following {} country names are renamed:",
                config.country_names.len()
            );
            display_country_names(&config.country_names);
        }
        debug!(
            "keys: {}",
            config.country_names.iter().map(|(from, _)| from).join(", ")
        );
        Ok(())
    }
}

/// The entrypoint for the CLI.
#[derive(Parser, Debug)]
#[command(version, about="Clean a Global Terrorism Database export for mapping", long_about = None, name="gtdprep")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[arg(
        short = 'c',
        long,
        help = "Config file to use instead of the one in the user config directory",
        global = true
    )]
    pub config: Option<PathBuf>,
    #[arg(
        short = 'q',
        long = "quiet",
        help = "\
            Do not print progress spinner to stdout. Results and logs (when `RUST_LOG`\n\
            is set) will still be printed.",
        global = true
    )]
    pub quiet: bool,
}

/// Commands contains the list of subcommands avaliable for use in the CLI.
/// Each command should implement the RunCommand trait and specify the list
/// of required args for that command.
#[derive(Subcommand, Debug)]
#[enum_dispatch(RunCommand)]
pub enum Commands {
    /// Clean the GTD export and write the result (the default)
    Clean(CleanCommand),
    /// Report missing values in the cleaned data without writing it
    Audit(AuditCommand),
    /// Show the first rows of the data as loaded
    Preview(PreviewCommand),
    /// List the country name mapping
    CountryNames(CountryNamesCommand),
}
