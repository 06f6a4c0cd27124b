//! Command line front end for the backtracking puzzle solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use backtrack_search::{
    config::{CliOverrides, OutputFormat, Settings},
    engine::SearchMode,
    logging::{init_logging, LogConfig},
    puzzles::create_example_puzzles,
    solver::PuzzleRun,
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "backtrack_search")]
#[command(about = "Generic backtracking search over classic puzzles")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle file
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Search mode: first, count or all (overrides config)
        #[arg(long)]
        mode: Option<SearchMode>,

        /// Maximum solutions to collect in `all` mode (overrides config)
        #[arg(short, long)]
        max_solutions: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: text or json (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Force memoization on
        #[arg(long, conflicts_with = "no_memo")]
        memoize: bool,

        /// Force memoization off
        #[arg(long)]
        no_memo: bool,

        /// Order candidates with the puzzle's default heuristic
        #[arg(long)]
        heuristic: bool,

        /// Explore root candidates in parallel
        #[arg(long)]
        parallel: bool,

        /// Print the edit trail of each solution
        #[arg(long)]
        show_trails: bool,

        /// Increase log verbosity (-v info, -vv debug, -vvv trace)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Estimate how hard a puzzle is under the current settings
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            mode,
            max_solutions,
            output,
            format,
            memoize,
            no_memo,
            heuristic,
            parallel,
            show_trails,
            verbose,
        } => {
            let overrides = CliOverrides {
                mode,
                memoize: memo_override(memoize, no_memo),
                heuristic: heuristic.then_some(true),
                parallel: parallel.then_some(true),
                max_solutions,
                puzzle_file: puzzle,
                output_dir: output,
                format,
            };
            let settings = load_settings(&config, &overrides)?;
            setup_logging(&settings, verbose)?;
            solve_command(settings, show_trails)
        }
        Commands::Setup { directory, force } => {
            init_logging(&LogConfig::from_verbosity(0))?;
            setup_command(directory, force)
        }
        Commands::Analyze { config, puzzle } => {
            let overrides = CliOverrides {
                puzzle_file: puzzle,
                ..CliOverrides::default()
            };
            let settings = load_settings(&config, &overrides)?;
            setup_logging(&settings, 0)?;
            analyze_command(settings)
        }
    }
}

fn memo_override(memoize: bool, no_memo: bool) -> Option<bool> {
    match (memoize, no_memo) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Load the config file (or defaults when it is missing), apply overrides
/// and validate the result
fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!("Config file {} not found, using defaults", config_path.display()))
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

/// `-v` flags win over the configured level
fn setup_logging(settings: &Settings, verbose: u8) -> Result<()> {
    let config = if verbose > 0 {
        LogConfig::from_verbosity(verbose)
    } else {
        let level = tracing::Level::from_str(&settings.logging.level)
            .with_context(|| format!("Unknown log level: {}", settings.logging.level))?;
        LogConfig::default().with_level(level)
    };
    init_logging(&config.with_format(settings.logging.format))
}

fn solve_command(settings: Settings, show_trails: bool) -> Result<()> {
    println!(
        "{}",
        ColorOutput::info(&format!("Solving {}", settings.input.puzzle_file.display()))
    );

    let run = PuzzleRun::new(settings).context("Failed to create puzzle run")?;
    let report = run.solve().context("Failed to solve puzzle")?;

    if report.is_empty() {
        println!("{}", ColorOutput::warning("No solutions found"));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} solution(s) in {:.3}s",
            report.count,
            report.solve_time.as_secs_f64()
        ))
    );

    if show_trails {
        for solution in &report.solutions {
            println!("\n{}", SolutionFormatter::format_solution(solution, true));
        }
    } else {
        println!("\n{}", SolutionFormatter::format_report_summary(&report));
        if report.solutions.len() <= 3 {
            for solution in &report.solutions {
                println!("{}", SolutionFormatter::format_solution(solution, false));
            }
        }
    }
    println!("{}", report.statistics);

    let output = &run.settings().output;
    SolutionFormatter::save_report(&report, &output.output_directory, output.format)
        .context("Failed to save solutions")?;
    println!(
        "{}",
        ColorOutput::success(&format!("Solutions saved to {}", output.output_directory.display()))
    );

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    // One config per search mode, each pointing at a puzzle that suits it
    let examples_dir = config_dir.join("examples");
    let variants = [
        ("first.yaml", SearchMode::First, "knights_tour", true),
        ("count.yaml", SearchMode::Count, "word_break", false),
        ("all.yaml", SearchMode::All, "expression", false),
    ];
    for (file, mode, kind, heuristic) in variants {
        let mut settings = Settings::default();
        settings.search.mode = mode;
        settings.search.heuristic = heuristic;
        settings.input.puzzle_file = PathBuf::from(format!("input/puzzles/{}.yaml", kind));
        settings.to_file(&examples_dir.join(file))?;
    }
    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add puzzles to {}", input_dir.display());
    println!("3. Run: backtrack_search solve --config config/default.yaml");

    Ok(())
}

fn analyze_command(settings: Settings) -> Result<()> {
    println!(
        "{}",
        ColorOutput::info(&format!("Analyzing {}", settings.input.puzzle_file.display()))
    );

    let run = PuzzleRun::new(settings).context("Failed to load puzzle for analysis")?;
    println!("Puzzle kind: {}", run.spec().kind());
    println!("\n{}", run.estimate());

    Ok(())
}
