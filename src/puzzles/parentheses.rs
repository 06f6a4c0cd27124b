//! Remove invalid parentheses
//!
//! Delete the minimum number of parentheses that makes a string balanced and
//! list every distinct result. The minimal number of `(` and `)` removals is
//! computed up front and forms the budget. Removals are made left to right,
//! and inside a run of identical parentheses only the first one may start a
//! removal, so equivalent deletions are generated once.

use super::{Puzzle, PuzzleKind, PuzzleShape};
use crate::engine::{search, Problem, SearchMode, Workspace};
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenthesesRepair {
    text: Vec<char>,
    open_excess: u32,
    close_excess: u32,
}

/// Characters still kept and removals still owed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    kept: Vec<bool>,
    cursor: usize,
    open_left: u32,
    close_left: u32,
}

/// Delete the parenthesis at `index`. `from` is the cursor it was chosen at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remove {
    pub index: usize,
    pub paren: char,
    pub from: usize,
}

impl Candidate {
    pub fn is_kept(&self, index: usize) -> bool {
        self.kept[index]
    }

    /// Removals still owed, `(` then `)`
    pub fn removals_left(&self) -> (u32, u32) {
        (self.open_left, self.close_left)
    }
}

impl Workspace for Candidate {
    type Edit = Remove;

    fn apply(&mut self, remove: &Remove) {
        self.kept[remove.index] = false;
        self.cursor = remove.index + 1;
        match remove.paren {
            '(' => self.open_left -= 1,
            _ => self.close_left -= 1,
        }
    }

    fn undo(&mut self, remove: &Remove) {
        self.kept[remove.index] = true;
        self.cursor = remove.from;
        match remove.paren {
            '(' => self.open_left += 1,
            _ => self.close_left += 1,
        }
    }
}

impl ParenthesesRepair {
    pub fn new(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let (mut open, mut close_excess) = (0u32, 0u32);
        for &ch in &text {
            match ch {
                '(' => open += 1,
                ')' if open > 0 => open -= 1,
                ')' => close_excess += 1,
                _ => {}
            }
        }

        Self {
            text,
            open_excess: open,
            close_excess,
        }
    }

    /// Minimal number of removals
    pub fn removals(&self) -> u32 {
        self.open_excess + self.close_excess
    }

    /// Every balanced string reachable with the minimal number of removals,
    /// deduplicated and sorted
    pub fn minimal_repairs(&self) -> Vec<String> {
        let (mut candidate, budget) = self.initial();
        search(self, &mut candidate, budget, SearchMode::All, None, false)
            .solutions()
            .iter()
            .map(|c| self.render(c))
            .unique()
            .sorted()
            .collect()
    }

    fn is_balanced(&self, candidate: &Candidate) -> bool {
        let mut depth = 0i64;
        for (&ch, &kept) in self.text.iter().zip(&candidate.kept) {
            if !kept {
                continue;
            }
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Problem for ParenthesesRepair {
    type Workspace = Candidate;
    type Key = ();

    fn moves(&self, candidate: &Candidate, budget: u32) -> Vec<Remove> {
        if budget == 0 {
            return Vec::new();
        }
        let from = candidate.cursor;
        self.text[from..]
            .iter()
            .enumerate()
            .filter(|(_, ch)| matches!(ch, '(' | ')'))
            .map(|(offset, &paren)| Remove {
                index: from + offset,
                paren,
                from,
            })
            .collect()
    }

    fn feasible(&self, candidate: &Candidate, remove: &Remove) -> bool {
        let owed = match remove.paren {
            '(' => candidate.open_left,
            _ => candidate.close_left,
        };
        let repeats_run = remove.index > remove.from && self.text[remove.index - 1] == remove.paren;
        owed > 0 && !repeats_run
    }

    fn is_goal(&self, candidate: &Candidate, _budget: u32) -> bool {
        candidate.open_left == 0 && candidate.close_left == 0 && self.is_balanced(candidate)
    }
}

impl Puzzle for ParenthesesRepair {
    const KIND: PuzzleKind = PuzzleKind::Parentheses;

    fn initial(&self) -> (Candidate, u32) {
        let candidate = Candidate {
            kept: vec![true; self.text.len()],
            cursor: 0,
            open_left: self.open_excess,
            close_left: self.close_excess,
        };
        (candidate, self.removals())
    }

    fn render(&self, candidate: &Candidate) -> String {
        self.text
            .iter()
            .zip(&candidate.kept)
            .filter_map(|(&ch, &kept)| kept.then_some(ch))
            .collect()
    }

    fn shape(&self) -> PuzzleShape {
        PuzzleShape {
            size: self.text.len(),
            max_branching: self.text.iter().filter(|ch| matches!(ch, '(' | ')')).count(),
            depth_bound: self.removals() as usize,
            memoizable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_extra_close() {
        let repair = ParenthesesRepair::new("()())()");
        assert_eq!(repair.removals(), 1);
        assert_eq!(repair.minimal_repairs(), vec!["(())()", "()()()"]);
    }

    #[test]
    fn test_letters_are_kept() {
        assert_eq!(ParenthesesRepair::new("(a)())()").minimal_repairs(), vec!["(a())()", "(a)()()"]);
    }

    #[test]
    fn test_reversed_pair_repairs_to_empty() {
        let repair = ParenthesesRepair::new(")(");
        assert_eq!(repair.removals(), 2);
        assert_eq!(repair.minimal_repairs(), vec![String::new()]);
    }

    #[test]
    fn test_balanced_input_is_unchanged() {
        assert_eq!(ParenthesesRepair::new("(x)(y)").minimal_repairs(), vec!["(x)(y)"]);
        assert_eq!(ParenthesesRepair::new("").minimal_repairs(), vec![String::new()]);
    }

    #[test]
    fn test_runs_generate_one_candidate() {
        // removing any of the three closers gives the same string
        let repair = ParenthesesRepair::new("(()))");
        let (mut candidate, budget) = repair.initial();
        let all = search(&repair, &mut candidate, budget, SearchMode::All, None, false);
        assert_eq!(all.count(), 1);
        assert_eq!(repair.render(&all.solutions()[0]), "(())");
    }

    #[test]
    fn test_results_have_equal_length() {
        let repairs = ParenthesesRepair::new("((())((()").minimal_repairs();
        assert!(!repairs.is_empty());
        let lengths: Vec<usize> = repairs.iter().map(String::len).unique().collect();
        assert_eq!(lengths.len(), 1);
    }
}
