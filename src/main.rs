use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use mort_reader::error::util::ensure_directory;
use mort_reader::utils::logging::console::print_scan_report;
use mort_reader::{
    MissingTerritoryPolicy, MortalityConfig, ResidentStatusScope, TerritoryBasis, process_files,
    write_code_detail_csv, write_summary_csv,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Death statistics for US territories from CDC multiple-cause mortality files")]
struct Cli {
    /// Fixed-width mortality files, e.g. VS23MORT.DPSMCPUB_r20241030
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// JSON configuration file; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for CSV output
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Data year used in output file names
    #[arg(short, long, default_value_t = 2023)]
    year: u16,

    /// Keep foreign residents (resident status 4) in the counts
    #[arg(long)]
    include_foreign: bool,

    /// Classify on the underlying cause only
    #[arg(long)]
    underlying_only: bool,

    /// Geography that assigns a record to a territory
    #[arg(long, value_enum)]
    basis: Option<BasisArg>,

    /// Output treatment of territories with no records
    #[arg(long, value_enum)]
    missing: Option<MissingArg>,

    /// Records tallied in the resident-status breakdown
    #[arg(long, value_enum)]
    status_scope: Option<StatusScopeArg>,

    /// Do not draw a progress spinner
    #[arg(long)]
    no_progress: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BasisArg {
    Occurrence,
    Residence,
}

impl From<BasisArg> for TerritoryBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Occurrence => Self::Occurrence,
            BasisArg::Residence => Self::Residence,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MissingArg {
    /// N/A in every column
    NotAvailable,
    Zero,
    Omit,
}

impl From<MissingArg> for MissingTerritoryPolicy {
    fn from(arg: MissingArg) -> Self {
        match arg {
            MissingArg::NotAvailable => Self::NotAvailable,
            MissingArg::Zero => Self::Zero,
            MissingArg::Omit => Self::Omit,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusScopeArg {
    /// Records outside the configured territories
    National,
    Territories,
    All,
}

impl From<StatusScopeArg> for ResidentStatusScope {
    fn from(arg: StatusScopeArg) -> Self {
        match arg {
            StatusScopeArg::National => Self::National,
            StatusScopeArg::Territories => Self::Territories,
            StatusScopeArg::All => Self::All,
        }
    }
}

impl Cli {
    fn load_config(&self) -> Result<MortalityConfig> {
        let mut config = match &self.config {
            Some(path) => MortalityConfig::from_json_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => MortalityConfig::default().with_progress(true),
        };

        if self.include_foreign {
            config = config.with_foreign_residents_excluded(false);
        }
        if self.underlying_only {
            config = config.with_multiple_causes(false);
        }
        if let Some(basis) = self.basis {
            config = config.with_territory_basis(basis.into());
        }
        if let Some(missing) = self.missing {
            config = config.with_missing_territory(missing.into());
        }
        if let Some(scope) = self.status_scope {
            config = config.with_resident_status_scope(scope.into());
        }
        if self.no_progress {
            config = config.with_progress(false);
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let start = Instant::now();

    let report = process_files(&cli.inputs, &config).context("scanning mortality data")?;
    print_scan_report(&report, &config);

    ensure_directory(&cli.output_dir, "csv output")
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;

    let summary_path = cli
        .output_dir
        .join(format!("territory_mortality_summary_{}.csv", cli.year));
    write_summary_csv(&report, &config, &summary_path)
        .with_context(|| format!("writing {}", summary_path.display()))?;

    let codes_path = cli
        .output_dir
        .join(format!("territory_icd10_codes_{}.csv", cli.year));
    write_code_detail_csv(&report, &config, &codes_path)
        .with_context(|| format!("writing {}", codes_path.display()))?;

    info!("Completed in {:?}", start.elapsed());
    Ok(())
}
