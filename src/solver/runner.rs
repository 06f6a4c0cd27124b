//! Solver runs: load a puzzle, search it, validate and package the results

use super::solution::{RunReport, Solution};
use super::validator::TrailValidator;
use crate::config::Settings;
use crate::engine::{search_parallel, EditOf, SearchEngine, SearchMode};
use crate::puzzles::{load_puzzle_from_file, AnyPuzzle, Puzzle, PuzzleShape, PuzzleSpec};
use anyhow::{Context, Result};
use std::fmt;
use std::time::Instant;

/// A puzzle paired with the settings to solve it
pub struct PuzzleRun {
    settings: Settings,
    spec: PuzzleSpec,
    puzzle: AnyPuzzle,
}

impl PuzzleRun {
    /// Load the puzzle named by `settings.input.puzzle_file`
    pub fn new(settings: Settings) -> Result<Self> {
        let spec = load_puzzle_from_file(&settings.input.puzzle_file).context("Failed to load puzzle file")?;
        Self::with_puzzle(settings, spec)
    }

    /// Use an explicit puzzle definition
    pub fn with_puzzle(settings: Settings, spec: PuzzleSpec) -> Result<Self> {
        let puzzle = spec
            .build()
            .with_context(|| format!("Invalid {} puzzle", spec.kind()))?;
        Ok(Self {
            settings,
            spec,
            puzzle,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn spec(&self) -> &PuzzleSpec {
        &self.spec
    }

    pub fn puzzle(&self) -> &AnyPuzzle {
        &self.puzzle
    }

    /// Search the puzzle and validate every reported trail
    pub fn solve(&self) -> Result<RunReport> {
        let report = match &self.puzzle {
            AnyPuzzle::Maze(p) => self.run(p),
            AnyPuzzle::KnightsTour(p) => self.run(p),
            AnyPuzzle::Coloring(p) => self.run(p),
            AnyPuzzle::WordBreak(p) => self.run(p),
            AnyPuzzle::Expression(p) => self.run(p),
            AnyPuzzle::Parentheses(p) => self.run(p),
            AnyPuzzle::KSwaps(p) => self.run(p),
        };

        let invalid = report.solutions.iter().filter(|s| !s.validated).count();
        if invalid > 0 {
            anyhow::bail!("{} of {} reported trails failed validation", invalid, report.solutions.len());
        }
        Ok(report)
    }

    fn run<Z>(&self, puzzle: &Z) -> RunReport
    where
        Z: Puzzle,
        Z::Workspace: Send + Sync,
        EditOf<Z>: Send + Sync,
    {
        let search = &self.settings.search;
        let config = self.settings.engine_config();
        let heuristic = if search.heuristic { puzzle.heuristic() } else { None };
        if search.heuristic && heuristic.is_none() {
            tracing::info!(kind = %Z::KIND, "no default heuristic, using generation order");
        }

        let (mut workspace, budget) = puzzle.initial();
        let start = Instant::now();
        let report = if search.parallel {
            search_parallel(puzzle, &workspace, budget, &config, heuristic.as_deref())
        } else {
            SearchEngine::new(puzzle)
                .with_config(config)
                .with_heuristic(heuristic.as_deref())
                .search(&mut workspace, budget)
        };
        let solve_time = start.elapsed();

        let validator = TrailValidator::new(puzzle);
        let solutions: Vec<Solution> = report
            .trails
            .iter()
            .zip(report.outcome.solutions())
            .enumerate()
            .map(|(i, (trail, snapshot))| {
                let result = validator.validate(trail, Some(snapshot));
                if let Some(error) = &result.error_message {
                    tracing::error!(solution = i + 1, %error, "trail failed validation");
                }
                Solution::new(
                    Z::KIND,
                    i + 1,
                    puzzle.render(snapshot),
                    trail.iter().map(|edit| format!("{:?}", edit)).collect(),
                    result.is_valid,
                )
            })
            .collect();

        let count = report.outcome.count();
        tracing::info!(
            kind = %Z::KIND,
            mode = %search.mode,
            solutions = count,
            nodes = report.statistics.nodes,
            elapsed_ms = solve_time.as_millis() as u64,
            "run finished"
        );

        RunReport {
            kind: Z::KIND,
            mode: search.mode,
            count,
            solutions,
            truncated: report.truncated,
            parallel: search.parallel,
            statistics: report.statistics,
            solve_time,
        }
    }

    /// Rough difficulty of the puzzle under the current settings
    pub fn estimate(&self) -> DifficultyEstimate {
        let shape = self.puzzle.shape();
        let has_heuristic = match &self.puzzle {
            AnyPuzzle::Maze(p) => p.heuristic().is_some(),
            AnyPuzzle::KnightsTour(p) => p.heuristic().is_some(),
            AnyPuzzle::Coloring(p) => p.heuristic().is_some(),
            AnyPuzzle::WordBreak(p) => p.heuristic().is_some(),
            AnyPuzzle::Expression(p) => p.heuristic().is_some(),
            AnyPuzzle::Parentheses(p) => p.heuristic().is_some(),
            AnyPuzzle::KSwaps(p) => p.heuristic().is_some(),
        };

        // log10 of branching^depth, the size of the unpruned tree
        let tree_size_log10 = shape.depth_bound as f64 * (shape.max_branching.max(1) as f64).log10();
        let level = if tree_size_log10 < 4.0 {
            DifficultyLevel::Trivial
        } else if tree_size_log10 < 8.0 {
            DifficultyLevel::Moderate
        } else if tree_size_log10 < 16.0 {
            DifficultyLevel::Hard
        } else {
            DifficultyLevel::Explosive
        };

        let recommendations = self.generate_recommendations(&shape, level, has_heuristic);
        DifficultyEstimate {
            kind: self.puzzle.kind(),
            shape,
            tree_size_log10,
            level,
            has_heuristic,
            recommendations,
        }
    }

    fn generate_recommendations(&self, shape: &PuzzleShape, level: DifficultyLevel, has_heuristic: bool) -> Vec<String> {
        let search = &self.settings.search;
        let mut recommendations = Vec::new();

        if shape.memoizable && !search.memoize {
            recommendations.push("Sub-problems repeat; enable memoization".to_string());
        }
        if !shape.memoizable && search.memoize {
            recommendations.push("This puzzle is path dependent; memoization will be skipped".to_string());
        }
        if has_heuristic && !search.heuristic && search.mode == SearchMode::First {
            recommendations.push("Enable the heuristic to reach a first solution sooner".to_string());
        }
        if level >= DifficultyLevel::Hard {
            if search.mode == SearchMode::All && search.max_solutions.is_none() {
                recommendations.push("Set max_solutions to bound the collected solutions".to_string());
            }
            if !search.parallel {
                recommendations.push("Enable parallel search to spread root branches over threads".to_string());
            }
        }
        if recommendations.is_empty() {
            recommendations.push("Current settings look reasonable".to_string());
        }
        recommendations
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DifficultyLevel {
    Trivial,
    Moderate,
    Hard,
    Explosive,
}

/// Output of [`PuzzleRun::estimate`]
#[derive(Debug, Clone)]
pub struct DifficultyEstimate {
    pub kind: crate::puzzles::PuzzleKind,
    pub shape: PuzzleShape,
    pub tree_size_log10: f64,
    pub level: DifficultyLevel,
    pub has_heuristic: bool,
    pub recommendations: Vec<String>,
}

impl fmt::Display for DifficultyEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Difficulty Estimate ({}):", self.kind)?;
        writeln!(f, "  Input size: {}", self.shape.size)?;
        writeln!(f, "  Max branching: {}", self.shape.max_branching)?;
        writeln!(f, "  Depth bound: {}", self.shape.depth_bound)?;
        writeln!(f, "  Unpruned tree: ~10^{:.1} nodes", self.tree_size_log10)?;
        writeln!(f, "  Level: {:?}", self.level)?;
        writeln!(f, "  Memoizable: {}", self.shape.memoizable)?;
        writeln!(f, "  Default heuristic: {}", self.has_heuristic)?;
        writeln!(f, "  Recommendations:")?;
        for rec in &self.recommendations {
            writeln!(f, "    - {}", rec)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(mode: SearchMode) -> Settings {
        let mut settings = Settings::default();
        settings.search.mode = mode;
        settings.search.verify_undo = true;
        settings
    }

    fn run(spec: PuzzleSpec, settings: Settings) -> RunReport {
        PuzzleRun::with_puzzle(settings, spec).unwrap().solve().unwrap()
    }

    #[test]
    fn test_all_mode_reports_validated_solutions() {
        let report = run(
            PuzzleSpec::Expression {
                digits: "123".into(),
                target: 6,
            },
            settings(SearchMode::All),
        );
        assert_eq!(report.count, 2);
        assert!(report.all_validated());
        let rendered: Vec<&str> = report.solutions.iter().map(|s| s.rendered.as_str()).collect();
        assert_eq!(rendered, vec!["1+2+3 = 6", "1*2*3 = 6"]);
    }

    #[test]
    fn test_count_mode_has_no_snapshots() {
        let report = run(
            PuzzleSpec::WordBreak {
                text: "aaaa".into(),
                dictionary: vec!["a".into(), "aa".into()],
            },
            settings(SearchMode::Count),
        );
        assert_eq!(report.count, 5);
        assert!(report.solutions.is_empty());
    }

    #[test]
    fn test_parallel_run_matches_sequential() {
        let spec = PuzzleSpec::Maze {
            grid: vec!["1111".into(), "1011".into(), "1111".into()],
        };
        let sequential = run(spec.clone(), settings(SearchMode::All));
        let mut parallel_settings = settings(SearchMode::All);
        parallel_settings.search.parallel = true;
        let parallel = run(spec, parallel_settings);

        assert!(parallel.parallel);
        assert_eq!(sequential.count, parallel.count);
        assert_eq!(sequential.solutions, parallel.solutions);
    }

    #[test]
    fn test_heuristic_run_for_knights_tour() {
        let mut s = settings(SearchMode::First);
        s.search.heuristic = true;
        let report = run(PuzzleSpec::KnightsTour { size: 6, start: None }, s);
        assert_eq!(report.count, 1);
        assert_eq!(report.solutions[0].depth(), 35);
    }

    #[test]
    fn test_max_solutions_truncates() {
        let mut s = settings(SearchMode::All);
        s.search.max_solutions = Some(2);
        let report = run(
            PuzzleSpec::Coloring {
                vertices: 3,
                edges: vec![(0, 1), (1, 2), (2, 0)],
                colors: 3,
            },
            s,
        );
        assert_eq!(report.count, 2);
        assert!(report.truncated);
    }

    #[test]
    fn test_estimate_recommends_memoization() {
        let mut s = settings(SearchMode::Count);
        s.search.memoize = false;
        let run = PuzzleRun::with_puzzle(
            s,
            PuzzleSpec::WordBreak {
                text: "a".repeat(40),
                dictionary: vec!["a".into(), "aa".into(), "aaa".into()],
            },
        )
        .unwrap();
        let estimate = run.estimate();
        assert!(estimate.shape.memoizable);
        assert!(estimate.level >= DifficultyLevel::Hard);
        assert!(estimate.recommendations.iter().any(|r| r.contains("memoization")));
    }

    #[test]
    fn test_invalid_puzzle_is_an_error() {
        let result = PuzzleRun::with_puzzle(Settings::default(), PuzzleSpec::Maze { grid: vec![] });
        assert!(result.is_err());
    }
}
