//! Contract violations raised by the search engine

use thiserror::Error;

/// Programming errors in an adapter. The engine panics with these messages
/// because continuing would corrupt the backtracking invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// An edit consumed more budget than remained.
    #[error("contract violation: edit {edit} consumes {cost} but only {budget} budget remains")]
    BudgetUnderflow { edit: String, cost: u32, budget: u32 },

    /// Undoing an edit did not restore the workspace it was applied to.
    #[error("contract violation: undo of {edit} did not restore the workspace")]
    UndoMismatch { edit: String },

    /// The recursion went deeper than the configured limit.
    #[error("contract violation: search depth {depth} exceeds limit {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

impl ContractViolation {
    pub(crate) fn raise(self) -> ! {
        panic!("{}", self)
    }
}
