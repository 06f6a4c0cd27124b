//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::solver::{RunReport, Solution};
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a single solution for console output
    pub fn format_solution(solution: &Solution, show_trail: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ({}) ===\n", solution.index, solution.id));
        output.push_str(&format!("Depth: {}\n", solution.depth()));
        if !solution.validated {
            output.push_str("Validation: FAILED\n");
        }
        output.push_str(&solution.rendered);
        if !solution.rendered.ends_with('\n') {
            output.push('\n');
        }

        if show_trail {
            output.push_str("Trail:\n");
            for (step, edit) in solution.trail.iter().enumerate() {
                output.push_str(&format!("  {:3}. {}\n", step + 1, edit));
            }
        }

        output
    }

    /// Format a run as a summary table, one row per solution
    pub fn format_report_summary(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", report));
        if report.solutions.is_empty() {
            return output;
        }

        output.push_str("#    | ID           | Depth | Solution\n");
        output.push_str("-----|--------------|-------|----------\n");
        for solution in &report.solutions {
            let first_line = solution.rendered.lines().next().unwrap_or("");
            output.push_str(&format!(
                "{:4} | {:12} | {:5} | {}\n",
                solution.index,
                &solution.id[..12.min(solution.id.len())],
                solution.depth(),
                first_line
            ));
        }

        let distinct = report.distinct_renderings().len();
        if distinct < report.solutions.len() {
            output.push_str(&format!("({} distinct renderings)\n", distinct));
        }

        output
    }

    /// Save a run report in the requested format
    pub fn save_report<P: AsRef<Path>>(report: &RunReport, output_dir: P, format: OutputFormat) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                for solution in &report.solutions {
                    let filepath = output_dir.join(format!("solution_{:03}.txt", solution.index));
                    std::fs::write(&filepath, Self::format_solution(solution, true))
                        .with_context(|| format!("Failed to write {}", filepath.display()))?;
                }
                let summary = format!("{}\n{}", Self::format_report_summary(report), report.statistics);
                std::fs::write(output_dir.join("summary.txt"), summary).context("Failed to write summary.txt")?;
            }
            OutputFormat::Json => {
                report
                    .save_to_file(output_dir.join("report.json"))
                    .context("Failed to write report.json")?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SearchMode, SearchStatistics};
    use crate::puzzles::PuzzleKind;
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample_report() -> RunReport {
        let solutions = vec![
            Solution::new(PuzzleKind::Maze, 1, "DR".into(), vec!["down".into(), "right".into()], true),
            Solution::new(PuzzleKind::Maze, 2, "RD".into(), vec!["right".into(), "down".into()], true),
        ];
        RunReport {
            kind: PuzzleKind::Maze,
            mode: SearchMode::All,
            count: 2,
            solutions,
            truncated: false,
            parallel: false,
            statistics: SearchStatistics::default(),
            solve_time: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_solution_formatting() {
        let report = sample_report();
        let text = SolutionFormatter::format_solution(&report.solutions[0], true);
        assert!(text.contains("Depth: 2"));
        assert!(text.contains("  1. down"));
        assert!(!SolutionFormatter::format_solution(&report.solutions[0], false).contains("Trail"));
    }

    #[test]
    fn test_summary_table() {
        let summary = SolutionFormatter::format_report_summary(&sample_report());
        assert!(summary.contains("maze (all mode): 2 solution(s)"));
        assert_eq!(summary.lines().filter(|l| l.contains(" | ")).count(), 3);
    }

    #[test]
    fn test_save_report_formats() {
        let temp_dir = tempdir().unwrap();
        let report = sample_report();

        SolutionFormatter::save_report(&report, temp_dir.path().join("text"), OutputFormat::Text).unwrap();
        assert!(temp_dir.path().join("text/solution_001.txt").exists());
        assert!(temp_dir.path().join("text/solution_002.txt").exists());
        assert!(temp_dir.path().join("text/summary.txt").exists());

        SolutionFormatter::save_report(&report, temp_dir.path().join("json"), OutputFormat::Json).unwrap();
        let loaded = RunReport::load_from_file(temp_dir.path().join("json/report.json")).unwrap();
        assert_eq!(loaded.solutions, report.solutions);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
