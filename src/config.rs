use crate::generator::GeneratorOptions;
use crate::rng::RecordRng;
use clap::Args;
use tracing::{info, warn};

pub const DEFAULT_NUM_RECORDS: usize = 10;

/// Options shared by every command that generates records.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Number of test records to generate per parametrized test
    #[arg(
        long = "num_records",
        visible_alias = "num-records",
        default_value_t = DEFAULT_NUM_RECORDS as i64,
        allow_negative_numbers = true
    )]
    pub num_records: i64,
    /// Seed for the record generator; omitted means a fresh seed every run
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,
    /// Let zero divisors reach divide instead of replacing them with one
    #[arg(long = "no-zero-substitution")]
    pub no_zero_substitution: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub num_records: usize,
    pub seed: Option<u64>,
    pub generator: GeneratorOptions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_records: DEFAULT_NUM_RECORDS,
            seed: None,
            generator: GeneratorOptions::default(),
        }
    }
}

impl Config {
    /// A negative count means no records rather than an error.
    pub fn with_requested_count(requested: i64) -> Self {
        let num_records = if requested < 0 {
            warn!(requested, "negative record count, generating none");
            0
        } else {
            requested as usize
        };
        Config {
            num_records,
            ..Config::default()
        }
    }

    pub fn rng(&self) -> RecordRng {
        let rng = match self.seed {
            Some(seed) => RecordRng::new(seed),
            None => RecordRng::from_os_entropy(),
        };
        info!(seed = rng.seed(), "record generator seeded");
        rng
    }
}

impl From<RunArgs> for Config {
    fn from(args: RunArgs) -> Self {
        Config {
            seed: args.seed,
            generator: GeneratorOptions {
                substitute_zero_divisor: !args.no_zero_substitution,
            },
            ..Config::with_requested_count(args.num_records)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let argv = std::iter::once("calcgen").chain(args.iter().copied());
        Harness::try_parse_from(argv).map(|h| Config::from(h.run))
    }

    #[test]
    fn defaults_to_ten_records() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.num_records, 10);
    }

    #[test]
    fn underscore_and_dash_spellings() {
        assert_eq!(parse(&["--num_records", "25"]).unwrap().num_records, 25);
        assert_eq!(parse(&["--num-records", "3"]).unwrap().num_records, 3);
    }

    #[test]
    fn negative_count_clamps_to_zero() {
        assert_eq!(parse(&["--num_records", "-4"]).unwrap().num_records, 0);
        assert_eq!(Config::with_requested_count(-1).num_records, 0);
    }

    #[test]
    fn non_integer_count_is_rejected() {
        assert!(parse(&["--num_records", "ten"]).is_err());
        assert!(parse(&["--num_records", "2.5"]).is_err());
    }

    #[test]
    fn seed_and_policy_flags() {
        let config = parse(&["--seed", "42", "--no-zero-substitution"]).unwrap();
        assert_eq!(config.seed, Some(42));
        assert!(!config.generator.substitute_zero_divisor);
        assert_eq!(config.rng(), RecordRng::new(42));
    }
}
