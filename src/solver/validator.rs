//! Independent replay of solution trails

use crate::engine::{EditOf, Problem, Workspace};
use crate::puzzles::Puzzle;
use std::fmt;

/// Replays a trail from the puzzle's initial workspace and re-checks every
/// step: feasibility, budget, the goal at the end, and that undoing the
/// whole trail restores the start.
pub struct TrailValidator<'a, Z: Puzzle> {
    puzzle: &'a Z,
}

/// Result of validating one trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub steps_checked: usize,
    pub budget_left: u32,
    pub reaches_goal: bool,
    pub matches_snapshot: bool,
    pub restores_initial: bool,
    pub error_message: Option<String>,
}

/// Aggregate over many trails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValidationResult {
    pub total: usize,
    pub valid: usize,
    pub individual_results: Vec<ValidationResult>,
}

impl<'a, Z: Puzzle> TrailValidator<'a, Z> {
    pub fn new(puzzle: &'a Z) -> Self {
        Self { puzzle }
    }

    /// Validate `trail`, and compare the final workspace to `snapshot` when
    /// one is given
    pub fn validate(&self, trail: &[EditOf<Z>], snapshot: Option<&Z::Workspace>) -> ValidationResult {
        let (initial, budget) = self.puzzle.initial();
        let mut workspace = initial.clone();
        let mut budget_left = budget;
        let mut applied = 0;
        let mut error_message = None;

        for (step, edit) in trail.iter().enumerate() {
            if !self.puzzle.feasible(&workspace, edit) {
                error_message = Some(format!("step {} ({:?}) is not feasible", step, edit));
                break;
            }
            let cost = self.puzzle.consumes(edit);
            let Some(remaining) = budget_left.checked_sub(cost) else {
                error_message = Some(format!(
                    "step {} ({:?}) costs {} with only {} budget left",
                    step, edit, cost, budget_left
                ));
                break;
            };
            workspace.apply(edit);
            budget_left = remaining;
            applied += 1;
        }

        let reaches_goal = error_message.is_none() && self.puzzle.is_goal(&workspace, budget_left);
        let matches_snapshot = snapshot.map_or(true, |expected| *expected == workspace);

        for edit in trail[..applied].iter().rev() {
            workspace.undo(edit);
        }
        let restores_initial = workspace == initial;

        if error_message.is_none() {
            error_message = if !reaches_goal {
                Some("trail does not end in a goal state".to_string())
            } else if !matches_snapshot {
                Some("replayed workspace differs from the reported solution".to_string())
            } else if !restores_initial {
                Some("undoing the trail does not restore the initial workspace".to_string())
            } else {
                None
            };
        }

        ValidationResult {
            is_valid: error_message.is_none(),
            steps_checked: applied,
            budget_left,
            reaches_goal,
            matches_snapshot,
            restores_initial,
            error_message,
        }
    }

    /// Validate trails paired with their snapshots
    pub fn validate_all(&self, trails: &[Vec<EditOf<Z>>], snapshots: &[Z::Workspace]) -> MultiValidationResult {
        let individual_results: Vec<ValidationResult> = trails
            .iter()
            .enumerate()
            .map(|(i, trail)| self.validate(trail, snapshots.get(i)))
            .collect();
        MultiValidationResult {
            total: individual_results.len(),
            valid: individual_results.iter().filter(|r| r.is_valid).count(),
            individual_results,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;
        if let Some(ref error) = self.error_message {
            writeln!(f, "Error: {}", error)?;
        }
        writeln!(f, "Steps checked: {}", self.steps_checked)?;
        writeln!(f, "Budget left: {}", self.budget_left)?;
        writeln!(f, "Reaches goal: {}", self.reaches_goal)?;
        writeln!(f, "Restores initial workspace: {}", self.restores_initial)?;
        Ok(())
    }
}

impl fmt::Display for MultiValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trail Validation Results:")?;
        writeln!(f, "  Total trails: {}", self.total)?;
        writeln!(f, "  Valid trails: {}", self.valid)?;
        writeln!(f, "  Invalid trails: {}", self.total - self.valid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{SearchEngine, SearchMode};
    use crate::puzzles::maze::{Direction, Step};
    use crate::puzzles::{GraphColoring, Maze};

    #[test]
    fn test_engine_trails_validate() {
        let maze = Maze::parse(&["1000", "1101", "1100", "0111"]).unwrap();
        let (mut walk, budget) = maze.initial();
        let report = SearchEngine::new(&maze).with_mode(SearchMode::All).search(&mut walk, budget);

        let validator = TrailValidator::new(&maze);
        let results = validator.validate_all(&report.trails, report.outcome.solutions());
        assert_eq!(results.total, 2);
        assert_eq!(results.valid, 2);
    }

    #[test]
    fn test_infeasible_step_is_reported() {
        let maze = Maze::parse(&["11", "11"]).unwrap();
        let wall = Step {
            from: (0, 0),
            to: (-1, 0),
            direction: Direction::Up,
        };
        let result = TrailValidator::new(&maze).validate(&[wall], None);
        assert!(!result.is_valid);
        assert_eq!(result.steps_checked, 0);
        assert!(result.restores_initial);
        assert!(result.error_message.unwrap().contains("not feasible"));
    }

    #[test]
    fn test_incomplete_trail_is_not_a_goal() {
        let graph = GraphColoring::new(3, &[(0, 1), (1, 2)], 2).unwrap();
        let (mut coloring, budget) = graph.initial();
        let report = SearchEngine::new(&graph).search(&mut coloring, budget);
        let trail = &report.trails[0];

        let validator = TrailValidator::new(&graph);
        assert!(validator.validate(trail, None).is_valid);

        let partial = validator.validate(&trail[..2], None);
        assert!(!partial.reaches_goal);
        assert!(!partial.is_valid);
    }

    #[test]
    fn test_snapshot_mismatch() {
        let graph = GraphColoring::new(2, &[(0, 1)], 2).unwrap();
        let (mut coloring, budget) = graph.initial();
        let report = SearchEngine::new(&graph).with_mode(SearchMode::All).search(&mut coloring, budget);
        let solutions = report.outcome.solutions();

        let validator = TrailValidator::new(&graph);
        let crossed = validator.validate(&report.trails[0], Some(&solutions[1]));
        assert!(crossed.reaches_goal);
        assert!(!crossed.matches_snapshot);
        assert!(!crossed.is_valid);
    }
}
