//! normalise - inspect and simulate the facility decision table

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use normalise::resolve::{self, RustcVersion, Signals};
use normalise::{env, simulate, Report, ReportFormat, SignalProfile};

#[derive(Parser)]
#[command(name = "normalise")]
#[command(about = "Inspect the compile-time facility table", long_about = None)]
struct Cli {
    /// Log resolver details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the environment and table this build resolved
    Status {
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Resolve the table for a simulated target
    Resolve {
        /// Signal profile to start from (defaults to the user profile, then this build)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// target_vendor, e.g. apple, pc, unknown
        #[arg(long)]
        vendor: Option<String>,

        /// target_env, e.g. msvc, gnu
        #[arg(long)]
        target_env: Option<String>,

        /// target_os, e.g. macos, windows, linux
        #[arg(long)]
        os: Option<String>,

        /// target_arch, e.g. x86_64, aarch64
        #[arg(long)]
        arch: Option<String>,

        /// debug or release
        #[arg(long)]
        mode: Option<String>,

        /// Compiler version, e.g. 1.80.0
        #[arg(long)]
        rustc: Option<String>,

        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Resolve every known target and check each table is complete
    Matrix {
        /// Compiler version to simulate (defaults to this build's)
        #[arg(long)]
        rustc: Option<String>,
    },

    /// Write this build's signals as a profile
    Profile {
        /// Output file (defaults to the user profile location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn starting_signals(profile: Option<PathBuf>) -> Result<Signals, Box<dyn std::error::Error>> {
    if let Some(path) = profile {
        return Ok(SignalProfile::load(&path)?.to_signals()?);
    }
    if let Some(path) = SignalProfile::default_path().filter(|p| p.exists()) {
        return Ok(SignalProfile::load(&path)?.to_signals()?);
    }
    Ok(env::signals())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Status { format } => {
            let report = Report::new(&env::signals(), &env::environment(), env::table());
            print!("{}", report.render(format)?);
        }

        Commands::Resolve {
            profile,
            vendor,
            target_env,
            os,
            arch,
            mode,
            rustc,
            format,
        } => {
            let mut signals = starting_signals(profile)?;

            if vendor.is_some() {
                signals.target_vendor = vendor;
            }
            if target_env.is_some() {
                signals.target_env = target_env;
            }
            if os.is_some() {
                signals.target_os = os;
            }
            if arch.is_some() {
                signals.target_arch = arch;
            }
            if let Some(mode) = mode {
                signals.override_build_mode(&mode)?;
            }
            if let Some(version) = rustc {
                signals.rustc_version = Some(RustcVersion::parse(&version)?);
            }

            let (environment, table) = resolve::resolve(&signals);
            let report = Report::new(&signals, &environment, &table);
            print!("{}", report.render(format)?);
        }

        Commands::Matrix { rustc } => {
            let version = match rustc {
                Some(v) => Some(RustcVersion::parse(&v)?),
                None => env::signals().rustc_version,
            };

            let cases = simulate::matrix(version);
            for case in &cases {
                let neutral = case
                    .table
                    .entries()
                    .filter(|(_, e)| e.definition.is_neutral())
                    .count();
                println!(
                    "  {:<36} {:<12} {:<8} {} neutral",
                    case.label, case.environment.os, case.environment.arch, neutral
                );
            }

            let checked = simulate::verify_matrix(version)?;
            println!("{} targets resolved, every facility defined", checked);
        }

        Commands::Profile { output } => {
            let path = output
                .or_else(SignalProfile::default_path)
                .ok_or("no config directory; pass --output")?;
            let profile = SignalProfile::from_signals(&env::signals());
            profile.save(&path)?;
            info!("Profile written to {}", path.display());
        }
    }

    Ok(())
}
