//! Puzzle definition files
//!
//! Puzzles are stored as YAML documents tagged by `kind`:
//!
//! ```yaml
//! kind: maze
//! grid:
//!   - "1000"
//!   - "1101"
//!   - "1100"
//!   - "0111"
//! ```

use super::{
    AnyPuzzle, ExpressionTarget, GraphColoring, KnightsTour, LargestNumber, Maze, ParenthesesRepair,
    PuzzleError, PuzzleKind, WordBreak,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a puzzle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PuzzleSpec {
    /// Rows of `1` (open) and `0` (blocked)
    Maze { grid: Vec<String> },
    KnightsTour {
        size: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<(usize, usize)>,
    },
    Coloring {
        vertices: usize,
        edges: Vec<(usize, usize)>,
        colors: u8,
    },
    WordBreak { text: String, dictionary: Vec<String> },
    Expression { digits: String, target: i64 },
    Parentheses { text: String },
    KSwaps { digits: String, swaps: i64 },
}

impl PuzzleSpec {
    pub fn kind(&self) -> PuzzleKind {
        match self {
            PuzzleSpec::Maze { .. } => PuzzleKind::Maze,
            PuzzleSpec::KnightsTour { .. } => PuzzleKind::KnightsTour,
            PuzzleSpec::Coloring { .. } => PuzzleKind::Coloring,
            PuzzleSpec::WordBreak { .. } => PuzzleKind::WordBreak,
            PuzzleSpec::Expression { .. } => PuzzleKind::Expression,
            PuzzleSpec::Parentheses { .. } => PuzzleKind::Parentheses,
            PuzzleSpec::KSwaps { .. } => PuzzleKind::KSwaps,
        }
    }

    /// Validate the definition and build the puzzle
    pub fn build(&self) -> Result<AnyPuzzle, PuzzleError> {
        let puzzle = match self {
            PuzzleSpec::Maze { grid } => AnyPuzzle::Maze(Maze::parse(grid.as_slice())?),
            PuzzleSpec::KnightsTour { size, start } => {
                AnyPuzzle::KnightsTour(KnightsTour::starting_at(*size, start.unwrap_or((0, 0)))?)
            }
            PuzzleSpec::Coloring {
                vertices,
                edges,
                colors,
            } => AnyPuzzle::Coloring(GraphColoring::new(*vertices, edges, *colors)?),
            PuzzleSpec::WordBreak { text, dictionary } => {
                AnyPuzzle::WordBreak(WordBreak::new(text, dictionary.iter().cloned())?)
            }
            PuzzleSpec::Expression { digits, target } => {
                AnyPuzzle::Expression(ExpressionTarget::new(digits, *target)?)
            }
            PuzzleSpec::Parentheses { text } => AnyPuzzle::Parentheses(ParenthesesRepair::new(text)),
            PuzzleSpec::KSwaps { digits, swaps } => AnyPuzzle::KSwaps(LargestNumber::new(digits, *swaps)?),
        };
        Ok(puzzle)
    }

    /// One small instance of every puzzle family
    pub fn examples() -> Vec<PuzzleSpec> {
        vec![
            PuzzleSpec::Maze {
                grid: ["1000", "1101", "1100", "0111"].map(String::from).to_vec(),
            },
            PuzzleSpec::KnightsTour { size: 5, start: None },
            PuzzleSpec::Coloring {
                vertices: 4,
                edges: vec![(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)],
                colors: 3,
            },
            PuzzleSpec::WordBreak {
                text: "catsanddog".to_string(),
                dictionary: ["cat", "cats", "and", "sand", "dog"].map(String::from).to_vec(),
            },
            PuzzleSpec::Expression {
                digits: "123".to_string(),
                target: 6,
            },
            PuzzleSpec::Parentheses {
                text: "()())()".to_string(),
            },
            PuzzleSpec::KSwaps {
                digits: "129814999".to_string(),
                swaps: 4,
            },
        ]
    }
}

/// Load a puzzle definition from a YAML file
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<PuzzleSpec> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_puzzle(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Parse a puzzle definition and check that it builds
pub fn parse_puzzle(content: &str) -> Result<PuzzleSpec> {
    let spec: PuzzleSpec = serde_yaml::from_str(content).context("Invalid puzzle definition")?;
    spec.build()
        .with_context(|| format!("Invalid {} puzzle", spec.kind()))?;
    Ok(spec)
}

/// Save a puzzle definition as YAML
pub fn save_puzzle_to_file<P: AsRef<Path>>(spec: &PuzzleSpec, path: P) -> Result<()> {
    let content = serde_yaml::to_string(spec).context("Failed to serialize puzzle")?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write puzzle to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Load every `.yaml` puzzle in a directory, sorted by file name.
/// Files that fail to load are skipped with a warning.
pub fn load_puzzles_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, PuzzleSpec)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut puzzles = Vec::new();
    for entry in dir {
        let path = entry.context("Failed to read directory entry")?.path();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if !path.is_file() || !is_yaml {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        match load_puzzle_from_file(&path) {
            Ok(spec) => puzzles.push((name, spec)),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping puzzle file"),
        }
    }

    puzzles.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(puzzles)
}

/// Write one example file per puzzle family, named after its kind
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for spec in PuzzleSpec::examples() {
        let path = dir.join(format!("{}.yaml", spec.kind()));
        save_puzzle_to_file(&spec, &path)?;
    }

    Ok(())
}
