// src/cli.rs
//! `cdms` command line. Built with the `cli` feature.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::catalog::Catalog;
use crate::config::consts::{DEFAULT_MATCH_LIMIT, DEFAULT_SPLINE_DEGREE};
use crate::config::options::{ClientOptions, ExportFormat, ExportOptions, QueryOptions};
use crate::core::Http;
use crate::export;
use crate::partition::{self, PartitionInterpolator};
use crate::query::{self, QueryRequest};

#[derive(Parser, Debug)]
#[command(name = "cdms", version, about = "Query the CDMS molecular spectroscopy catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Catalog base URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra attempts after a failed request.
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every species in the catalog.
    Molecules(OutputArgs),

    /// Fuzzy-match a species name against the catalog.
    Find {
        name: String,
        /// Minimum similarity ratio (0..=1).
        #[arg(long, default_value_t = DEFAULT_MATCH_LIMIT)]
        limit: f64,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Lines in a frequency window.
    Lines {
        /// GHz
        #[arg(long)]
        min: f64,
        /// GHz
        #[arg(long)]
        max: f64,
        /// Species id or name; repeatable.
        #[arg(long = "molecule", short = 'm', required = true)]
        molecules: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_MATCH_LIMIT)]
        limit: f64,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Full catalog file of one species.
    Species {
        /// Species id or name.
        molecule: String,
        #[arg(long, default_value_t = DEFAULT_MATCH_LIMIT)]
        limit: f64,
        #[command(flatten)]
        out: OutputArgs,
    },

    /// Partition function table, or Q at one temperature.
    Partition {
        /// Species id or name.
        molecule: String,
        /// Interpolate Q at this temperature (K).
        #[arg(long)]
        at: Option<f64>,
        /// Spline degree for --at.
        #[arg(long, default_value_t = DEFAULT_SPLINE_DEGREE)]
        degree: usize,
        #[arg(long, default_value_t = DEFAULT_MATCH_LIMIT)]
        limit: f64,
        #[command(flatten)]
        out: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Omit the header row.
    #[arg(long)]
    pub no_headers: bool,

    /// Write here instead of stdout.
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Tsv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

impl OutputArgs {
    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            format: self.format.into(),
            include_headers: !self.no_headers,
            out_path: self.out.clone(),
            ..Default::default()
        }
    }
}

impl Cli {
    fn client_options(&self) -> ClientOptions {
        let mut opts = ClientOptions::default();
        if let Some(url) = &self.base_url {
            opts.base_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            opts.timeout = Duration::from_secs(secs);
        }
        if let Some(n) = self.retries {
            opts.retries = n;
        }
        opts
    }

    fn level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over -v/-q.
pub fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.level());
    let http = Http::new(cli.client_options()).wrap_err("building HTTP client")?;
    dispatch(&http, cli.command)
}

fn dispatch(http: &Http, command: Command) -> Result<()> {
    match command {
        Command::Molecules(out) => {
            let catalog = Catalog::load(http)?;
            let entries: Vec<_> = catalog.iter().collect();
            emit(&out, "molecules", |w, o| export::write_catalog(w, &entries, o))
        }
        Command::Find { name, limit, out } => {
            let catalog = Catalog::load(http)?;
            let found = catalog.require_match(&name, limit)?;
            emit(&out, "matches", |w, o| export::write_catalog(w, &found, o))
        }
        Command::Lines { min, max, molecules, limit, out } => {
            let catalog = Catalog::load(http)?;
            let mut request = QueryRequest::new(min, max);
            for m in &molecules {
                request = request.molecule(catalog.resolve(m, limit)?);
            }
            let table = query::query_lines(http, &request, &QueryOptions::default())?;
            emit(&out, "lines", |w, o| export::write_lines(w, &table, o))
        }
        Command::Species { molecule, limit, out } => {
            let catalog = Catalog::load(http)?;
            let entry = catalog.resolve(&molecule, limit)?;
            let table = query::species_lines(http, entry)?;
            emit(&out, &join!("c", &entry.id), |w, o| export::write_lines(w, &table, o))
        }
        Command::Partition { molecule, at, degree, limit, out } => {
            let catalog = Catalog::load(http)?;
            let entry = catalog.resolve(&molecule, limit)?;
            let table = partition::get_partition_table(http, entry)?;
            match at {
                Some(t) => {
                    let q = PartitionInterpolator::from_table(table, degree)?;
                    println!("{}", q.value_at(t));
                    Ok(())
                }
                None => emit(&out, &join!("q", &entry.id), |w, o| export::write_partition(w, &table, o)),
            }
        }
    }
}

/// Write to `-o` when given, stdout otherwise.
fn emit<F>(out: &OutputArgs, stem: &str, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write, &ExportOptions) -> crate::error::Result<()>,
{
    let opts = out.export_options();
    if opts.out_path.is_some() {
        let path = export::export_to_path(&opts, stem, |w, o| write(w, o))?;
        eprintln!("wrote {}", path.display());
        return Ok(());
    }
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write(&mut lock, &opts)?;
    lock.flush()?;
    Ok(())
}
