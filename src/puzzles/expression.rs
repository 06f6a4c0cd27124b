//! Expression add operators
//!
//! Insert `+`, `-` and `*` between the digits of a string so the expression
//! evaluates to a target. Multiplication binds tighter, which is handled by
//! carrying the last operand: `a + b * c` is evaluated as
//! `(a + b) - b + b * c`.

use super::{Puzzle, PuzzleError, PuzzleKind, PuzzleShape};
use crate::engine::{search, Problem, SearchMode, Workspace};

/// Most digits accepted; every operand then fits in an `i64`
pub const MAX_DIGITS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub const ORDER: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
        }
    }

    /// New `(value, last)` after appending `operand`, `None` on overflow
    fn combine(self, value: i64, last: i64, operand: i64) -> Option<(i64, i64)> {
        match self {
            Operator::Add => Some((value.checked_add(operand)?, operand)),
            Operator::Subtract => Some((value.checked_sub(operand)?, -operand)),
            Operator::Multiply => {
                let product = last.checked_mul(operand)?;
                Some((value.checked_sub(last)?.checked_add(product)?, product))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionTarget {
    digits: Vec<u8>,
    target: i64,
}

/// Expression built so far and its running value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    text: String,
    cursor: usize,
    value: i64,
    last: i64,
}

/// Append the operand `digits[start..end]`, preceded by `op` unless it is
/// the first term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub op: Option<Operator>,
    pub start: usize,
    pub end: usize,
    pub operand: i64,
    pub prev_value: i64,
    pub prev_last: i64,
    /// `(value, last)` after this term; `None` when the arithmetic overflows
    pub next: Option<(i64, i64)>,
}

impl Expression {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Workspace for Expression {
    type Edit = Term;

    fn apply(&mut self, term: &Term) {
        if let Some(op) = term.op {
            self.text.push(op.symbol());
        }
        self.text.push_str(&term.operand.to_string());
        self.cursor = term.end;
        // overflowing terms are rejected before they are applied
        if let Some((value, last)) = term.next {
            self.value = value;
            self.last = last;
        }
    }

    fn undo(&mut self, term: &Term) {
        let appended = (term.end - term.start) + usize::from(term.op.is_some());
        self.text.truncate(self.text.len() - appended);
        self.cursor = term.start;
        self.value = term.prev_value;
        self.last = term.prev_last;
    }
}

impl ExpressionTarget {
    pub fn new(digits: &str, target: i64) -> Result<Self, PuzzleError> {
        if digits.is_empty() {
            return Err(PuzzleError::EmptyInput { what: "digit string" });
        }
        let count = digits.chars().count();
        if count > MAX_DIGITS {
            return Err(PuzzleError::OutOfRange {
                what: "digit count",
                found: count as i64,
                min: 1,
                max: MAX_DIGITS as i64,
            });
        }
        let digits = digits
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch.to_digit(10) {
                Some(d) => Ok(d as u8),
                None => Err(PuzzleError::InvalidCharacter {
                    what: "digit string",
                    found: ch,
                    position,
                }),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(Self { digits, target })
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Every expression reaching the target, in generation order
    pub fn expressions(&self) -> Vec<String> {
        let (mut expression, budget) = self.initial();
        search(self, &mut expression, budget, SearchMode::All, None, true)
            .solutions()
            .iter()
            .map(|e| e.text.clone())
            .collect()
    }

    fn operand(&self, start: usize, end: usize) -> i64 {
        self.digits[start..end].iter().fold(0i64, |acc, &d| acc * 10 + d as i64)
    }
}

impl Problem for ExpressionTarget {
    type Workspace = Expression;
    type Key = (usize, i64, i64);

    fn moves(&self, expression: &Expression, budget: u32) -> Vec<Term> {
        let start = expression.cursor;
        let last = self.digits.len().min(start + budget as usize);
        let operators: &[Option<Operator>] = if start == 0 {
            &[None]
        } else {
            &[Some(Operator::Add), Some(Operator::Subtract), Some(Operator::Multiply)]
        };

        let mut terms = Vec::new();
        for end in start + 1..=last {
            let operand = self.operand(start, end);
            for &op in operators {
                let next = match op {
                    None => Some((operand, operand)),
                    Some(op) => op.combine(expression.value, expression.last, operand),
                };
                terms.push(Term {
                    op,
                    start,
                    end,
                    operand,
                    prev_value: expression.value,
                    prev_last: expression.last,
                    next,
                });
            }
        }
        terms
    }

    fn feasible(&self, _expression: &Expression, term: &Term) -> bool {
        let leading_zero = term.end - term.start > 1 && self.digits[term.start] == 0;
        !leading_zero && term.next.is_some()
    }

    fn is_goal(&self, expression: &Expression, _budget: u32) -> bool {
        expression.cursor == self.digits.len() && expression.value == self.target
    }

    fn consumes(&self, term: &Term) -> u32 {
        (term.end - term.start) as u32
    }

    fn memo_key(&self, expression: &Expression, _budget: u32) -> Option<Self::Key> {
        Some((expression.cursor, expression.value, expression.last))
    }
}

impl Puzzle for ExpressionTarget {
    const KIND: PuzzleKind = PuzzleKind::Expression;

    fn initial(&self) -> (Expression, u32) {
        let expression = Expression {
            text: String::new(),
            cursor: 0,
            value: 0,
            last: 0,
        };
        (expression, self.digits.len() as u32)
    }

    fn render(&self, expression: &Expression) -> String {
        format!("{} = {}", expression.text, expression.value)
    }

    fn shape(&self) -> PuzzleShape {
        PuzzleShape {
            size: self.digits.len(),
            max_branching: self.digits.len() * Operator::ORDER.len(),
            depth_bound: self.digits.len(),
            memoizable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Outcome;

    fn expressions(digits: &str, target: i64) -> Vec<String> {
        ExpressionTarget::new(digits, target).unwrap().expressions()
    }

    #[test]
    fn test_one_two_three() {
        assert_eq!(expressions("123", 6), vec!["1+2+3", "1*2*3"]);
    }

    #[test]
    fn test_multiplication_precedence() {
        assert_eq!(expressions("232", 8), vec!["2+3*2", "2*3+2"]);
    }

    #[test]
    fn test_no_leading_zero_operands() {
        assert_eq!(expressions("105", 5), vec!["1*0+5", "10-5"]);
        assert_eq!(expressions("00", 0), vec!["0+0", "0-0", "0*0"]);
    }

    #[test]
    fn test_unreachable_target() {
        assert!(expressions("3456237490", 9191).is_empty());
    }

    #[test]
    fn test_whole_string_as_operand() {
        assert_eq!(expressions("42", 42), vec!["42"]);
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert_eq!(Operator::Multiply.combine(0, i64::MAX, 2), None);
        assert_eq!(Operator::Add.combine(i64::MAX, 1, 1), None);
        assert_eq!(Operator::Multiply.combine(7, 3, 4), Some((16, 12)));
    }

    #[test]
    fn test_memo_matches_plain_search() {
        let puzzle = ExpressionTarget::new("1231231", 12).unwrap();
        let (mut expression, budget) = puzzle.initial();
        let plain = search(&puzzle, &mut expression, budget, SearchMode::All, None, false);
        let cached = search(&puzzle, &mut expression, budget, SearchMode::All, None, true);
        assert_eq!(plain, cached);
        assert!(!plain.is_empty());
    }

    #[test]
    fn test_invalid_digit_strings() {
        assert!(matches!(ExpressionTarget::new("", 1), Err(PuzzleError::EmptyInput { .. })));
        assert!(matches!(
            ExpressionTarget::new("12a", 1),
            Err(PuzzleError::InvalidCharacter { found: 'a', position: 2, .. })
        ));
        assert!(ExpressionTarget::new(&"1".repeat(MAX_DIGITS + 1), 1).is_err());
    }

    #[test]
    fn test_render_shows_value() {
        let puzzle = ExpressionTarget::new("123", 6).unwrap();
        let (mut expression, budget) = puzzle.initial();
        let Outcome::Found(found) = search(&puzzle, &mut expression, budget, SearchMode::First, None, false) else {
            panic!("expected an expression");
        };
        assert_eq!(puzzle.render(&found), "1+2+3 = 6");
    }
}
