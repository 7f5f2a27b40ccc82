use clap::{Parser, Subcommand};
use paperspec::config::Config;
use paperspec::sheet;
use paperspec::units::{self, Family, SmoothnessReading, SmoothnessUnit, UnitFormatter};
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "paperspec")]
#[command(about = "Paper technical data sheet unit normalizer", long_about = None)]
struct Cli {
    /// Config file (default: paperspec.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a measurement to its family's canonical unit
    Convert {
        /// Family (thickness, tensile, tear, stiffness, smoothness)
        family: Family,

        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Unit token (e.g. "N/15mm", "gf", "mil")
        unit: String,
    },

    /// Equivalent PPS micrometers for a Bekk reading
    BekkToPps {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },

    /// Equivalent Bekk seconds for a PPS reading
    PpsToBekk {
        #[arg(allow_negative_numbers = true)]
        micrometers: f64,
    },

    /// Smoothness method a unit token belongs to
    Method {
        /// Smoothness unit token ("sec", "ml/min", "µm")
        unit: String,
    },

    /// List families, canonical units and accepted unit tokens
    Units {
        family: Option<Family>,
    },

    /// Normalize a spec sheet (or a directory of sheets) to canonical JSON
    Normalize {
        /// Sheet file (.json/.toml) or directory
        path: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paperspec=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = Config::discover(cli.config.as_deref(), ".")
        .map_err(Into::into)
        .and_then(|config| run(cli.command, &config));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let formatter = UnitFormatter::new(config.unit_preferences());

    match command {
        Commands::Convert {
            family,
            value,
            unit,
        } => convert_value(&formatter, family, value, &unit),
        Commands::BekkToPps { seconds } => {
            let pps = units::bekk_to_pps(seconds)?;
            println!("{}", formatter.format_canonical(Family::Smoothness, pps));
            Ok(())
        }
        Commands::PpsToBekk { micrometers } => {
            let bekk = units::pps_to_bekk(micrometers)?;
            println!("{}", formatter.format_canonical(Family::Smoothness, bekk));
            Ok(())
        }
        Commands::Method { unit } => {
            let unit: SmoothnessUnit = unit.parse()?;
            println!("{}", units::smoothness_method(unit));
            Ok(())
        }
        Commands::Units { family } => {
            list_units(family);
            Ok(())
        }
        Commands::Normalize { path, output } => normalize(config, &path, output.as_deref()),
    }
}

fn convert_value(
    formatter: &UnitFormatter,
    family: Family,
    value: f64,
    unit: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if family == Family::Smoothness {
        let reading = SmoothnessReading::new(value, unit.parse()?)?;
        println!("{}", formatter.format_smoothness(&reading));
    } else {
        let canonical = units::convert(family, value, unit)?;
        println!("{}", formatter.format_canonical(family, canonical));
    }
    Ok(())
}

fn list_units(family: Option<Family>) {
    let infos = match family {
        Some(family) => vec![units::FamilyInfo::of(family)],
        None => units::families(),
    };

    for info in infos {
        let canonical = info.canonical_unit.unwrap_or("(kept in source unit)");
        println!("{} -> {}", info.family, canonical);
        println!("  accepts: {}", info.units.join(", "));
    }
}

fn normalize(
    config: &Config,
    path: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let normalizer = sheet::SheetNormalizer::new(config.normalize.clone());

    let json = if path.is_dir() {
        let (raw_sheets, mut validation) = sheet::load_sheets_from_directory(path)?;

        let mut records = serde_json::Map::new();
        for (name, raw) in raw_sheets {
            match normalizer.normalize(&raw) {
                Ok((canonical, warnings)) => {
                    prefix_locations(&mut validation, warnings, &name);
                    records.insert(name, serde_json::to_value(&canonical)?);
                }
                Err(sheet::NormalizeError::Rejected(report)) => {
                    prefix_locations(&mut validation, report, &name);
                }
                Err(e) => validation.add_error(e.to_string(), Some(name)),
            }
        }

        if validation.has_issues() {
            eprintln!("{}", validation);
        }
        if !validation.is_valid() {
            return Err(format!("{} error(s) in {}", validation.errors.len(), path.display()).into());
        }
        serde_json::to_string_pretty(&records)?
    } else {
        let raw = sheet::load_sheet_from_file(path)?;
        let (canonical, validation) = match normalizer.normalize(&raw) {
            Ok(result) => result,
            Err(sheet::NormalizeError::Rejected(report)) => {
                eprintln!("{}", report);
                return Err(format!("{} rejected", path.display()).into());
            }
            Err(e) => return Err(e.into()),
        };
        if validation.has_issues() {
            eprintln!("{}", validation);
        }
        serde_json::to_string_pretty(&canonical)?
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, json)?;
        println!("Canonical sheet written to {}", output_path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn prefix_locations(into: &mut sheet::ValidationResult, mut other: sheet::ValidationResult, name: &str) {
    for issue in other.errors.iter_mut().chain(other.warnings.iter_mut()) {
        issue.location = Some(match issue.location.take() {
            Some(loc) => format!("{}/{}", name, loc),
            None => name.to_string(),
        });
    }
    into.merge(other);
}
