//! Solver front end: runs, solutions and trail validation

pub mod runner;
pub mod solution;
pub mod validator;

pub use runner::{DifficultyEstimate, DifficultyLevel, PuzzleRun};
pub use solution::{RunReport, Solution};
pub use validator::{MultiValidationResult, TrailValidator, ValidationResult};
