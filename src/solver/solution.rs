//! Solutions and run reports

use crate::engine::{SearchMode, SearchStatistics};
use crate::puzzles::PuzzleKind;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::time::Duration;

/// One solution found by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Stable identifier derived from the puzzle kind and rendering
    pub id: String,
    pub kind: PuzzleKind,
    /// Position in the engine's report, starting at 1
    pub index: usize,
    /// Text form of the solved workspace
    pub rendered: String,
    /// Edits from the initial workspace to the solution
    pub trail: Vec<String>,
    /// The trail replayed cleanly through the validator
    pub validated: bool,
}

impl Solution {
    pub fn new(kind: PuzzleKind, index: usize, rendered: String, trail: Vec<String>, validated: bool) -> Self {
        let id = Self::generate_id(kind, &rendered);
        Self {
            id,
            kind,
            index,
            rendered,
            trail,
            validated,
        }
    }

    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    fn generate_id(kind: PuzzleKind, rendered: &str) -> String {
        let mut hasher = DefaultHasher::new();
        kind.hash(&mut hasher);
        rendered.hash(&mut hasher);
        format!("sol_{:x}", hasher.finish())
    }
}

/// Everything one solver run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub kind: PuzzleKind,
    pub mode: SearchMode,
    /// Solutions counted by the engine; equals `solutions.len()` outside
    /// `Count` mode
    pub count: u64,
    pub solutions: Vec<Solution>,
    /// `max_solutions` stopped the search early
    pub truncated: bool,
    pub parallel: bool,
    pub statistics: SearchStatistics,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl RunReport {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Solutions with distinct renderings, in report order
    pub fn distinct_renderings(&self) -> Vec<&str> {
        self.solutions.iter().map(|s| s.rendered.as_str()).unique().collect()
    }

    /// Every reported trail passed validation
    pub fn all_validated(&self) -> bool {
        self.solutions.iter().all(|s| s.validated)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} mode): {} solution(s), {} nodes, {:.3}s",
            self.kind,
            self.mode,
            self.count,
            self.statistics.nodes,
            self.solve_time.as_secs_f64()
        )?;
        if self.truncated {
            write!(f, " [truncated]")?;
        }
        Ok(())
    }
}
