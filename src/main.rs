use calcgen::config::{Config, RunArgs};
use calcgen::error::Error;
use calcgen::generator::{generate_with_options, TestRecord};
use calcgen::suite::calculator_suite;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Parser)]
#[command(name = "calcgen", about = "Randomized test records for a four-function calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the calculator suite, one invocation per generated record
    Test {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Print generated records without running anything
    Generate {
        #[command(flatten)]
        run: RunArgs,
        #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Csv,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Command::Test { run } => {
            let config = Config::from(run);
            let report = calculator_suite().run(&config, &mut config.rng())?;
            println!("{}", report);
            Ok(report.exit_code())
        }
        Command::Generate { run, format } => {
            let config = Config::from(run);
            let mut rng = config.rng();
            let records = generate_with_options(&mut rng, config.num_records, config.generator)
                .collect::<Result<Vec<_>>>()?;
            let stdout = io::stdout();
            write_records(&mut stdout.lock(), &records, format)?;
            Ok(0)
        }
    }
}

fn write_records<W: Write>(out: &mut W, records: &[TestRecord], format: Format) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        Format::Csv => {
            writeln!(out, "index,a,b,operation,expected")?;
            for r in records {
                writeln!(out, "{},{},{},{},{}", r.index, r.a, r.b, r.operation, r.expected)?;
            }
        }
        Format::Text => {
            for r in records {
                writeln!(out, "{:>4}  {} {} {} => {}", r.index, r.operation, r.a, r.b, r.expected)?;
            }
        }
    }
    Ok(())
}
