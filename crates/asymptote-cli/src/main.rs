//! Asymptote command line tool.

use std::path::PathBuf;
use std::process::ExitCode;

use asymptote_benchmark::{format_duration, BenchmarkSeries};
use asymptote_config::{ConfigError, SuiteConfig};
use asymptote_core::{AsymptoteError, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

mod suite;

use suite::Suite;

#[derive(Parser)]
#[command(name = "asymptote")]
#[command(
    author,
    version,
    about = "Empirical complexity benchmarks: P vs NP-complete algorithms"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Suite configuration file (TOML or YAML); built-in defaults otherwise
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory receiving reports
    #[arg(short, long, value_name = "DIR", global = true)]
    output: Option<PathBuf>,

    /// Random seed for instance generation
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify correctness, then run every benchmark
    All {
        /// Also run exhaustive search on adversarial instances (slow)
        #[arg(long)]
        worst_case: bool,
    },

    /// Run the Subset Sum (NP-complete) benchmarks
    SubsetSum {
        /// Also run exhaustive search on adversarial instances (slow)
        #[arg(long)]
        worst_case: bool,
    },

    /// Run the shortest path (P) benchmark
    ShortestPath,

    /// Compare every Subset Sum solver against Dijkstra
    Compare,

    /// Check every algorithm against fixed cases
    Verify,
}

fn load_config(cli: &Cli) -> Result<SuiteConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if is_yaml {
                SuiteConfig::from_yaml_file(path)?
            } else {
                SuiteConfig::from_toml_file(path)?
            }
        }
        None => match SuiteConfig::load("asymptote.toml") {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => SuiteConfig::default(),
            Err(e) => return Err(e.into()),
        },
    };

    if let Some(dir) = &cli.output {
        config.output_dir = dir.to_string_lossy().into_owned();
    }
    if cli.seed.is_some() {
        config.random_seed = cli.seed;
    }
    Ok(config)
}

fn print_summary(series: &[BenchmarkSeries]) {
    println!();
    for s in series {
        let growth = s
            .growth()
            .exponent()
            .map_or_else(|| "N/A".to_string(), |k| format!("O(n^{k:.2})"));
        println!(
            "{} {} │ empirical {} │ theoretical {} │ {}",
            "●".bright_cyan(),
            s.name.white().bold(),
            growth.bright_magenta(),
            s.expected.to_string().bright_yellow(),
            format_duration(s.elapsed),
        );
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let suite = Suite::new(config)?;

    let series = match cli.command.unwrap_or(Commands::All { worst_case: false }) {
        Commands::All { worst_case } => suite.all(worst_case)?,
        Commands::SubsetSum { worst_case } => suite.subset_sum(worst_case)?,
        Commands::ShortestPath => vec![suite.shortest_path()?],
        Commands::Compare => suite.compare()?,
        Commands::Verify => {
            let report = suite.verify()?;
            for case in &report.cases {
                println!("{} {}", "✓".bright_green(), case.name);
            }
            println!(
                "{} of {} cases passed",
                report.passed(),
                report.cases.len()
            );
            return Ok(());
        }
    };

    print_summary(&series);
    println!(
        "\nReports written to {}",
        suite.output_dir().display().bright_white()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    asymptote_console::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AsymptoteError::Usage(msg)) => {
            eprintln!("{} {}", "usage error:".bright_red().bold(), msg);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["asymptote", "--seed", "9", "subset-sum", "--worst-case"]);
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(
            cli.command,
            Some(Commands::SubsetSum { worst_case: true })
        ));

        let cli = Cli::parse_from(["asymptote", "shortest-path", "--output", "out"]);
        assert_eq!(cli.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::parse_from(["asymptote", "--output", "elsewhere", "--seed", "3", "verify"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.output_dir, "elsewhere");
        assert_eq!(config.random_seed, Some(3));
    }
}
