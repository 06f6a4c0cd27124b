//! Configuration settings for the puzzle solver

use crate::engine::{SearchConfig, SearchMode, DEFAULT_DEPTH_LIMIT};
use crate::logging::LogFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub search: SearchSettings,
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub mode: SearchMode,
    pub memoize: bool,
    /// Order candidates with the puzzle's default heuristic
    pub heuristic: bool,
    /// Explore root candidates on the rayon pool
    pub parallel: bool,
    #[serde(default)]
    pub max_solutions: Option<usize>,
    #[serde(default = "default_depth_limit")]
    pub depth_limit: usize,
    #[serde(default)]
    pub verify_undo: bool,
}

fn default_depth_limit() -> usize {
    DEFAULT_DEPTH_LIMIT
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// error, warn, info, debug or trace
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search: SearchSettings {
                mode: SearchMode::All,
                memoize: true,
                heuristic: false,
                parallel: false,
                max_solutions: Some(100),
                depth_limit: DEFAULT_DEPTH_LIMIT,
                verify_undo: false,
            },
            input: InputConfig {
                puzzle_file: PathBuf::from("input/puzzles/maze.yaml"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/solutions"),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file. Call [`Settings::validate`] once
    /// command line overrides are merged.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.search.depth_limit == 0 {
            anyhow::bail!("Depth limit must be positive");
        }

        if self.search.max_solutions == Some(0) {
            anyhow::bail!("Maximum solutions must be positive when set");
        }

        if tracing::Level::from_str(&self.logging.level).is_err() {
            anyhow::bail!("Unknown log level: {}", self.logging.level);
        }

        if !self.input.puzzle_file.exists() {
            anyhow::bail!("Puzzle file does not exist: {}", self.input.puzzle_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(mode) = cli_overrides.mode {
            self.search.mode = mode;
        }
        if let Some(memoize) = cli_overrides.memoize {
            self.search.memoize = memoize;
        }
        if let Some(heuristic) = cli_overrides.heuristic {
            self.search.heuristic = heuristic;
        }
        if let Some(parallel) = cli_overrides.parallel {
            self.search.parallel = parallel;
        }
        if let Some(max_solutions) = cli_overrides.max_solutions {
            self.search.max_solutions = Some(max_solutions);
        }
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }

    /// Engine options for these settings
    pub fn engine_config(&self) -> SearchConfig {
        SearchConfig {
            mode: self.search.mode,
            memoize: self.search.memoize,
            max_solutions: self.search.max_solutions,
            depth_limit: self.search.depth_limit,
            verify_undo: self.search.verify_undo,
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub mode: Option<SearchMode>,
    pub memoize: Option<bool>,
    pub heuristic: Option<bool>,
    pub parallel: Option<bool>,
    pub max_solutions: Option<usize>,
    pub puzzle_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}
