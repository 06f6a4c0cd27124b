//! Largest number in at most k swaps
//!
//! Walk the digits left to right. At each position the digit can be swapped
//! with an occurrence of the largest digit to its right, costing one swap, or
//! left alone for free. The search bottoms out when the cursor passes the
//! last digit or the swaps run out.

use super::{Puzzle, PuzzleError, PuzzleKind, PuzzleShape};
use crate::engine::{search, Outcome, Problem, SearchMode, Workspace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargestNumber {
    digits: Vec<u8>,
    swaps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digits {
    digits: Vec<u8>,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// Swap the digit at the cursor with a larger one to its right
    Swap { at: usize, with: usize },
    /// Move past the digit at the cursor
    Advance { at: usize },
}

impl Digits {
    pub fn as_slice(&self) -> &[u8] {
        &self.digits
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn to_number_string(&self) -> String {
        self.digits.iter().map(|&d| char::from(b'0' + d)).collect()
    }
}

impl Workspace for Digits {
    type Edit = Exchange;

    fn apply(&mut self, exchange: &Exchange) {
        match *exchange {
            Exchange::Swap { at, with } => {
                self.digits.swap(at, with);
                self.cursor = at + 1;
            }
            Exchange::Advance { at } => self.cursor = at + 1,
        }
    }

    fn undo(&mut self, exchange: &Exchange) {
        match *exchange {
            Exchange::Swap { at, with } => {
                self.digits.swap(at, with);
                self.cursor = at;
            }
            Exchange::Advance { at } => self.cursor = at,
        }
    }
}

impl LargestNumber {
    pub fn new(digits: &str, swaps: i64) -> Result<Self, PuzzleError> {
        if digits.is_empty() {
            return Err(PuzzleError::EmptyInput { what: "number" });
        }
        if !(0..=u32::MAX as i64).contains(&swaps) {
            return Err(PuzzleError::OutOfRange {
                what: "swap count",
                found: swaps,
                min: 0,
                max: u32::MAX as i64,
            });
        }
        let digits = digits
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                ch.to_digit(10).map(|d| d as u8).ok_or(PuzzleError::InvalidCharacter {
                    what: "number",
                    found: ch,
                    position,
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(Self {
            digits,
            swaps: swaps as u32,
        })
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    /// Number reached by always swapping with the rightmost largest digit
    pub fn greedy(&self) -> String {
        let (mut digits, budget) = self.initial();
        match search(self, &mut digits, budget, SearchMode::First, None, true) {
            Outcome::Found(found) => found.to_number_string(),
            _ => digits.to_number_string(),
        }
    }

    /// Largest number reachable with at most `swaps` swaps
    pub fn largest(&self) -> String {
        let (mut digits, budget) = self.initial();
        search(self, &mut digits, budget, SearchMode::All, None, true)
            .solutions()
            .iter()
            .map(Digits::to_number_string)
            .max()
            .unwrap_or_else(|| digits.to_number_string())
    }
}

impl Problem for LargestNumber {
    type Workspace = Digits;
    type Key = (Vec<u8>, usize, u32);

    fn moves(&self, digits: &Digits, budget: u32) -> Vec<Exchange> {
        let at = digits.cursor;
        if at >= digits.digits.len() {
            return Vec::new();
        }

        let mut exchanges = Vec::new();
        if budget > 0 {
            if let Some(&largest) = digits.digits[at + 1..].iter().max() {
                exchanges.extend(
                    (at + 1..digits.digits.len())
                        .rev()
                        .filter(|&with| digits.digits[with] == largest)
                        .map(|with| Exchange::Swap { at, with }),
                );
            }
        }
        exchanges.push(Exchange::Advance { at });
        exchanges
    }

    fn feasible(&self, digits: &Digits, exchange: &Exchange) -> bool {
        match *exchange {
            Exchange::Swap { at, with } => digits.digits[with] > digits.digits[at],
            Exchange::Advance { .. } => true,
        }
    }

    fn is_goal(&self, digits: &Digits, budget: u32) -> bool {
        budget == 0 || digits.cursor == digits.digits.len()
    }

    fn consumes(&self, exchange: &Exchange) -> u32 {
        match exchange {
            Exchange::Swap { .. } => 1,
            Exchange::Advance { .. } => 0,
        }
    }

    fn memo_key(&self, digits: &Digits, budget: u32) -> Option<Self::Key> {
        Some((digits.digits.clone(), digits.cursor, budget))
    }
}

impl Puzzle for LargestNumber {
    const KIND: PuzzleKind = PuzzleKind::KSwaps;

    fn initial(&self) -> (Digits, u32) {
        let digits = Digits {
            digits: self.digits.clone(),
            cursor: 0,
        };
        (digits, self.swaps)
    }

    fn render(&self, digits: &Digits) -> String {
        digits.to_number_string()
    }

    fn shape(&self) -> PuzzleShape {
        PuzzleShape {
            size: self.digits.len(),
            max_branching: self.digits.len(),
            depth_bound: self.digits.len(),
            memoizable: true,
        }
    }
}
