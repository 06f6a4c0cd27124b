//! Knight's tour
//!
//! Visit every square of an `n x n` board exactly once with knight jumps.
//! Each square records the index of the jump that reached it, with the start
//! square numbered 0.

use super::{Puzzle, PuzzleError, PuzzleKind, PuzzleShape};
use crate::engine::{search, CostFn, Outcome, Problem, SearchMode, Workspace};
use std::fmt::Write as _;

/// Largest board accepted
pub const MAX_BOARD_SIZE: usize = 10;

/// Knight offsets in generation order
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnightsTour {
    size: usize,
    start: (usize, usize),
}

/// Partially numbered board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<u32>>,
    position: (usize, usize),
    placed: u32,
}

/// Knight jump. `to` may lie off the board until the feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub from: (usize, usize),
    pub to: (i32, i32),
}

impl Board {
    fn new(size: usize, start: (usize, usize)) -> Self {
        let mut cells = vec![None; size * size];
        cells[start.0 * size + start.1] = Some(0);
        Self {
            size,
            cells,
            position: start,
            placed: 1,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Squares numbered so far
    pub fn placed(&self) -> u32 {
        self.placed
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells[row * self.size + col]
    }

    fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    fn is_free(&self, row: i32, col: i32) -> bool {
        self.contains(row, col) && self.cells[row as usize * self.size + col as usize].is_none()
    }

    /// Free squares one jump away from `(row, col)`
    pub fn onward_degree(&self, row: i32, col: i32) -> usize {
        KNIGHT_OFFSETS
            .iter()
            .filter(|(dr, dc)| self.is_free(row + dr, col + dc))
            .count()
    }

    /// Every square numbered once, consecutive numbers a knight jump apart
    pub fn is_complete_tour(&self) -> bool {
        let total = self.size * self.size;
        let mut squares = vec![None; total];
        for (index, cell) in self.cells.iter().enumerate() {
            match cell {
                Some(step) if (*step as usize) < total && squares[*step as usize].is_none() => {
                    squares[*step as usize] = Some((index / self.size, index % self.size));
                }
                _ => return false,
            }
        }
        let squares: Option<Vec<(usize, usize)>> = squares.into_iter().collect();
        let Some(squares) = squares else {
            return false;
        };
        squares.windows(2).all(|pair| {
            let dr = pair[1].0 as i32 - pair[0].0 as i32;
            let dc = pair[1].1 as i32 - pair[0].1 as i32;
            KNIGHT_OFFSETS.contains(&(dr, dc))
        })
    }
}

impl Workspace for Board {
    type Edit = Jump;

    fn apply(&mut self, jump: &Jump) {
        let to = (jump.to.0 as usize, jump.to.1 as usize);
        self.cells[to.0 * self.size + to.1] = Some(self.placed);
        self.placed += 1;
        self.position = to;
    }

    fn undo(&mut self, jump: &Jump) {
        let to = (jump.to.0 as usize, jump.to.1 as usize);
        self.cells[to.0 * self.size + to.1] = None;
        self.placed -= 1;
        self.position = jump.from;
    }
}

impl KnightsTour {
    /// Tour of an `size x size` board starting from the top-left square
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        Self::starting_at(size, (0, 0))
    }

    pub fn starting_at(size: usize, start: (usize, usize)) -> Result<Self, PuzzleError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(PuzzleError::OutOfRange {
                what: "board size",
                found: size as i64,
                min: 1,
                max: MAX_BOARD_SIZE as i64,
            });
        }
        for coordinate in [start.0, start.1] {
            if coordinate >= size {
                return Err(PuzzleError::OutOfRange {
                    what: "start square",
                    found: coordinate as i64,
                    min: 0,
                    max: size as i64 - 1,
                });
            }
        }
        Ok(Self { size, start })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    /// First tour found, trying Warnsdorff's order when `warnsdorff` is set
    pub fn tour(&self, warnsdorff: bool) -> Option<Board> {
        let (mut board, budget) = self.initial();
        let heuristic = if warnsdorff { self.heuristic() } else { None };
        match search(self, &mut board, budget, SearchMode::First, heuristic.as_deref(), false) {
            Outcome::Found(board) => Some(board),
            _ => None,
        }
    }
}

impl Problem for KnightsTour {
    type Workspace = Board;
    type Key = ();

    fn moves(&self, board: &Board, budget: u32) -> Vec<Jump> {
        if budget == 0 {
            return Vec::new();
        }
        let (row, col) = board.position;
        KNIGHT_OFFSETS
            .iter()
            .map(|(dr, dc)| Jump {
                from: board.position,
                to: (row as i32 + dr, col as i32 + dc),
            })
            .collect()
    }

    fn feasible(&self, board: &Board, jump: &Jump) -> bool {
        board.is_free(jump.to.0, jump.to.1)
    }

    fn is_goal(&self, board: &Board, _budget: u32) -> bool {
        board.placed as usize == self.size * self.size
    }
}

impl Puzzle for KnightsTour {
    const KIND: PuzzleKind = PuzzleKind::KnightsTour;

    fn initial(&self) -> (Board, u32) {
        let board = Board::new(self.size, self.start);
        (board, (self.size * self.size - 1) as u32)
    }

    fn render(&self, board: &Board) -> String {
        let width = (self.size * self.size).to_string().len();
        let mut out = String::new();
        for row in 0..self.size {
            let line: Vec<String> = (0..self.size)
                .map(|col| match board.get(row, col) {
                    Some(step) => format!("{:>width$}", step, width = width),
                    None => format!("{:>width$}", ".", width = width),
                })
                .collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
        out
    }

    /// Warnsdorff's rule: jump to the square with the fewest onward moves
    fn heuristic(&self) -> Option<Box<CostFn<'_, Self>>> {
        Some(Box::new(|board: &Board, jump: &Jump| {
            board.onward_degree(jump.to.0, jump.to.1) as u64
        }))
    }

    fn shape(&self) -> PuzzleShape {
        PuzzleShape {
            size: self.size * self.size,
            max_branching: KNIGHT_OFFSETS.len(),
            depth_bound: self.size * self.size - 1,
            memoizable: false,
        }
    }
}
