//! Backtracking search engine
//!
//! One engine drives every puzzle family. An adapter supplies two pure
//! callbacks, a move generator ([`Problem::moves`]) and a feasibility check
//! ([`Problem::feasible`]), plus a goal predicate. The engine owns the trail
//! of applied edits and is the only component that mutates the workspace:
//!
//! 1. If the goal predicate holds, record the workspace according to the mode
//! 2. Otherwise generate the ordered candidate edits
//! 3. Drop the candidates the feasibility check rejects
//! 4. Apply each survivor, recurse with the reduced budget, then undo it
//!
//! `First` stops at the first witness and unwinds through every frame, undoing
//! as it goes, so the caller's workspace always comes back unchanged.
//!
//! The move generator must yield a finite sequence, and every chain of edits
//! must eventually exhaust the budget or reach a goal. The engine does not
//! detect generators that violate this; `depth_limit` only turns runaway
//! recursion into a panic.
//!
//! # Example
//!
//! ```
//! use backtrack_search::engine::{search, Outcome, Problem, SearchMode, Workspace};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Bits(Vec<u8>);
//!
//! impl Workspace for Bits {
//!     type Edit = u8;
//!     fn apply(&mut self, bit: &u8) { self.0.push(*bit); }
//!     fn undo(&mut self, _bit: &u8) { self.0.pop(); }
//! }
//!
//! struct NoAdjacentOnes(usize);
//!
//! impl Problem for NoAdjacentOnes {
//!     type Workspace = Bits;
//!     type Key = ();
//!     fn moves(&self, _ws: &Bits, _budget: u32) -> Vec<u8> { vec![0, 1] }
//!     fn feasible(&self, ws: &Bits, bit: &u8) -> bool { !(*bit == 1 && ws.0.last() == Some(&1)) }
//!     fn is_goal(&self, ws: &Bits, _budget: u32) -> bool { ws.0.len() == self.0 }
//! }
//!
//! let mut bits = Bits(Vec::new());
//! let outcome = search(&NoAdjacentOnes(4), &mut bits, 4, SearchMode::Count, None, false);
//! assert_eq!(outcome, Outcome::Count(8));
//! assert!(bits.0.is_empty());
//! ```

pub mod error;
pub mod memo;
pub mod parallel;
pub mod trail;

pub use error::ContractViolation;
pub use memo::MemoCache;
pub use parallel::search_parallel;
pub use trail::{replay, Trail};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Default guard against runaway recursion.
pub const DEFAULT_DEPTH_LIMIT: usize = 10_000;

/// Mutable structure built up one reversible edit at a time.
pub trait Workspace: Clone + PartialEq + fmt::Debug {
    /// One atomic transformation. Carries everything needed to invert it.
    type Edit: Clone + fmt::Debug;

    fn apply(&mut self, edit: &Self::Edit);

    /// Invert `edit`, which must be the most recently applied edit.
    fn undo(&mut self, edit: &Self::Edit);
}

/// Edit type of a problem's workspace
pub type EditOf<P> = <<P as Problem>::Workspace as Workspace>::Edit;

/// Caller-supplied ordering cost. Lower costs are explored first.
pub type CostFn<'a, P> = dyn Fn(&<P as Problem>::Workspace, &EditOf<P>) -> u64 + Sync + 'a;

/// Domain adapter plugged into the engine.
///
/// Every method receives a read-only view of the workspace; only the engine
/// applies and undoes edits.
pub trait Problem {
    type Workspace: Workspace;

    /// Signature of the sub-problem still to be solved. Use `()` for
    /// adapters that never memoize.
    type Key: Hash + Eq + Clone;

    /// Ordered candidate edits available from `workspace`. Must be finite and
    /// must not filter by feasibility.
    fn moves(&self, workspace: &Self::Workspace, budget: u32) -> Vec<EditOf<Self>>;

    /// Local check rejecting a candidate before it is explored.
    fn feasible(&self, workspace: &Self::Workspace, edit: &EditOf<Self>) -> bool;

    fn is_goal(&self, workspace: &Self::Workspace, budget: u32) -> bool;

    /// Budget consumed by applying `edit`.
    fn consumes(&self, _edit: &EditOf<Self>) -> u32 {
        1
    }

    /// Key for caching the outcome of the current sub-problem.
    ///
    /// Two states with equal keys must have identical outcomes no matter how
    /// they were reached. Path-dependent domains return `None`.
    fn memo_key(&self, _workspace: &Self::Workspace, _budget: u32) -> Option<Self::Key> {
        None
    }
}

/// What the caller wants back from a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Stop at the first witness
    First,
    /// Count every solution
    Count,
    /// Collect every solution
    All,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(SearchMode::First),
            "count" => Ok(SearchMode::Count),
            "all" => Ok(SearchMode::All),
            other => Err(format!("unknown search mode '{}' (expected first, count or all)", other)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchMode::First => "first",
            SearchMode::Count => "count",
            SearchMode::All => "all",
        };
        f.write_str(name)
    }
}

/// Result of a search. Absence of a solution is a normal outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<W> {
    NotFound,
    Found(W),
    Count(u64),
    AllSolutions(Vec<W>),
}

impl<W> Outcome<W> {
    /// Number of solutions this outcome stands for
    pub fn count(&self) -> u64 {
        match self {
            Outcome::NotFound => 0,
            Outcome::Found(_) => 1,
            Outcome::Count(n) => *n,
            Outcome::AllSolutions(solutions) => solutions.len() as u64,
        }
    }

    /// Workspace snapshots carried by this outcome
    pub fn solutions(&self) -> &[W] {
        match self {
            Outcome::Found(solution) => std::slice::from_ref(solution),
            Outcome::AllSolutions(solutions) => solutions,
            Outcome::NotFound | Outcome::Count(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn map<U>(self, mut f: impl FnMut(W) -> U) -> Outcome<U> {
        match self {
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Found(solution) => Outcome::Found(f(solution)),
            Outcome::Count(n) => Outcome::Count(n),
            Outcome::AllSolutions(solutions) => {
                Outcome::AllSolutions(solutions.into_iter().map(f).collect())
            }
        }
    }
}

/// Engine options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Cache sub-problem outcomes when the adapter exposes a key
    pub memoize: bool,
    /// Stop an `All` search once this many solutions are collected
    pub max_solutions: Option<usize>,
    pub depth_limit: usize,
    /// Snapshot before every apply and compare after the matching undo
    pub verify_undo: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::First,
            memoize: false,
            max_solutions: None,
            depth_limit: DEFAULT_DEPTH_LIMIT,
            verify_undo: cfg!(debug_assertions),
        }
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// Search frames entered
    pub nodes: u64,
    /// Candidates produced by the move generator
    pub generated: u64,
    /// Candidates rejected by the feasibility check
    pub pruned: u64,
    /// Edits applied (and undone)
    pub applied: u64,
    /// Goal states reached, memo hits excluded
    pub goals: u64,
    pub memo_hits: u64,
    pub memo_misses: u64,
    pub max_depth: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Fold another worker's counters into these
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.nodes += other.nodes;
        self.generated += other.generated;
        self.pruned += other.pruned;
        self.applied += other.applied;
        self.goals += other.goals;
        self.memo_hits += other.memo_hits;
        self.memo_misses += other.memo_misses;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Candidates: {} generated, {} pruned", self.generated, self.pruned)?;
        writeln!(f, "  Edits applied: {}", self.applied)?;
        writeln!(f, "  Goals reached: {}", self.goals)?;
        writeln!(f, "  Memo: {} hits, {} misses", self.memo_hits, self.memo_misses)?;
        writeln!(f, "  Max depth: {}", self.max_depth)?;
        writeln!(f, "  Elapsed: {:.3}s", self.elapsed.as_secs_f64())?;
        Ok(())
    }
}

/// Full result of a search: the outcome plus the trail behind each witness
#[derive(Debug, Clone)]
pub struct SearchReport<W: Workspace> {
    pub outcome: Outcome<W>,
    /// Forward edit sequence for every snapshot in `outcome`, same order
    pub trails: Vec<Vec<W::Edit>>,
    pub statistics: SearchStatistics,
    /// The search stopped early because `max_solutions` was reached
    pub truncated: bool,
}

/// Per-frame accumulator. Paths are stored goal-first so a parent extends
/// them with a push; they are reversed once at the end.
#[derive(Debug, Clone)]
enum Tally<E> {
    First(Option<Vec<E>>),
    Count(u64),
    All(Vec<Vec<E>>),
}

impl<E: Clone> Tally<E> {
    fn empty(mode: SearchMode) -> Self {
        match mode {
            SearchMode::First => Tally::First(None),
            SearchMode::Count => Tally::Count(0),
            SearchMode::All => Tally::All(Vec::new()),
        }
    }

    fn goal(mode: SearchMode) -> Self {
        match mode {
            SearchMode::First => Tally::First(Some(Vec::new())),
            SearchMode::Count => Tally::Count(1),
            SearchMode::All => Tally::All(vec![Vec::new()]),
        }
    }

    fn solutions(&self) -> u64 {
        match self {
            Tally::First(path) => path.is_some() as u64,
            Tally::Count(n) => *n,
            Tally::All(paths) => paths.len() as u64,
        }
    }

    fn has_witness(&self) -> bool {
        matches!(self, Tally::First(Some(_)))
    }

    /// Add a child's solutions, each extended by the edit that led to it
    fn absorb(&mut self, child: Tally<E>, edit: &E) {
        match (self, child) {
            (Tally::First(slot @ None), Tally::First(Some(mut path))) => {
                path.push(edit.clone());
                *slot = Some(path);
            }
            (Tally::First(_), Tally::First(_)) => {}
            (Tally::Count(total), Tally::Count(n)) => *total += n,
            (Tally::All(paths), Tally::All(found)) => {
                paths.extend(found.into_iter().map(|mut path| {
                    path.push(edit.clone());
                    path
                }));
            }
            _ => unreachable!("tally mode changed during a search"),
        }
    }
}

/// Depth-first backtracking engine over one [`Problem`].
pub struct SearchEngine<'a, P: Problem> {
    problem: &'a P,
    config: SearchConfig,
    heuristic: Option<&'a CostFn<'a, P>>,
    trail: Trail<EditOf<P>>,
    memo: MemoCache<P::Key, Tally<EditOf<P>>>,
    memo_active: bool,
    collected: u64,
    truncated: bool,
    stats: SearchStatistics,
}

impl<'a, P: Problem> SearchEngine<'a, P> {
    /// Create an engine with the default configuration (`First`, no memo)
    pub fn new(problem: &'a P) -> Self {
        Self {
            problem,
            config: SearchConfig::default(),
            heuristic: None,
            trail: Trail::new(),
            memo: MemoCache::new(),
            memo_active: false,
            collected: 0,
            truncated: false,
            stats: SearchStatistics::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.config.memoize = memoize;
        self
    }

    /// Order candidates by `cost`, lowest first, ties in generation order
    pub fn with_heuristic(mut self, cost: Option<&'a CostFn<'a, P>>) -> Self {
        self.heuristic = cost;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent search
    pub fn statistics(&self) -> &SearchStatistics {
        &self.stats
    }

    /// Edits currently applied. Empty outside of a running search.
    pub fn trail(&self) -> &Trail<EditOf<P>> {
        &self.trail
    }

    /// Run a search from `workspace` with `budget`.
    ///
    /// The workspace is mutated during the search and restored before this
    /// returns. The memo cache is rebuilt for every call.
    ///
    /// # Panics
    ///
    /// Panics with a [`ContractViolation`] when an edit overdraws the budget,
    /// an undo fails to restore the workspace (with `verify_undo`), or the
    /// recursion passes `depth_limit`.
    pub fn search(&mut self, workspace: &mut P::Workspace, budget: u32) -> SearchReport<P::Workspace> {
        self.trail.clear();
        self.memo.clear();
        self.collected = 0;
        self.truncated = false;
        self.stats = SearchStatistics::default();

        self.memo_active = self.config.memoize;
        if self.memo_active && self.problem.memo_key(workspace, budget).is_none() {
            tracing::warn!("memoization requested but the problem exposes no memo key; searching without a cache");
            self.memo_active = false;
        }

        let span = tracing::debug_span!(
            "search",
            mode = %self.config.mode,
            budget,
            memoize = self.memo_active,
            heuristic = self.heuristic.is_some()
        );
        let _guard = span.enter();

        let start = Instant::now();
        let tally = self.explore(workspace, budget, 0);
        self.stats.elapsed = start.elapsed();

        let report = self.finish(workspace, tally);
        tracing::debug!(
            solutions = report.outcome.count(),
            nodes = self.stats.nodes,
            pruned = self.stats.pruned,
            memo_hits = self.stats.memo_hits,
            truncated = report.truncated,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "search finished"
        );
        report
    }

    fn explore(&mut self, workspace: &mut P::Workspace, budget: u32, depth: usize) -> Tally<EditOf<P>> {
        let mode = self.config.mode;
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if depth > self.config.depth_limit {
            ContractViolation::DepthExceeded {
                depth,
                limit: self.config.depth_limit,
            }
            .raise();
        }

        if self.problem.is_goal(workspace, budget) {
            self.stats.goals += 1;
            self.collected += 1;
            tracing::trace!(depth, "goal reached");
            return Tally::goal(mode);
        }

        let key = if self.memo_active {
            self.problem.memo_key(workspace, budget)
        } else {
            None
        };
        if let Some(key) = &key {
            if let Some(cached) = self.memo.get(key) {
                let cached = cached.clone();
                self.stats.memo_hits += 1;
                self.collected += cached.solutions();
                return cached;
            }
            self.stats.memo_misses += 1;
        }

        let candidates = ordered_candidates(self.problem, self.heuristic, workspace, budget, &mut self.stats);

        let mut tally = Tally::empty(mode);
        for edit in candidates {
            let remaining = charge(self.problem, &edit, budget);
            let before = self.config.verify_undo.then(|| workspace.clone());

            workspace.apply(&edit);
            self.trail.push(edit);
            self.stats.applied += 1;

            let child = self.explore(workspace, remaining, depth + 1);

            let Some(edit) = self.trail.pop() else {
                unreachable!("trail lost the edit pushed by this frame");
            };
            workspace.undo(&edit);
            if let Some(before) = before {
                if *workspace != before {
                    ContractViolation::UndoMismatch {
                        edit: format!("{:?}", edit),
                    }
                    .raise();
                }
            }

            tally.absorb(child, &edit);
            if tally.has_witness() || self.limit_reached() {
                break;
            }
        }

        if let Some(key) = key {
            if !self.truncated {
                self.memo.put(key, tally.clone());
            }
        }
        tally
    }

    fn limit_reached(&mut self) -> bool {
        if self.config.mode != SearchMode::All {
            return false;
        }
        match self.config.max_solutions {
            Some(limit) if self.collected >= limit as u64 => {
                self.truncated = true;
                true
            }
            _ => false,
        }
    }

    fn finish(&mut self, workspace: &mut P::Workspace, tally: Tally<EditOf<P>>) -> SearchReport<P::Workspace> {
        let (outcome, trails) = match tally {
            Tally::First(None) => (Outcome::NotFound, Vec::new()),
            Tally::First(Some(path)) => {
                let trail = forward(path);
                let snapshot = replay(workspace, &trail);
                (Outcome::Found(snapshot), vec![trail])
            }
            Tally::Count(n) => (Outcome::Count(n), Vec::new()),
            Tally::All(paths) => {
                let limit = self.config.max_solutions.unwrap_or(usize::MAX);
                let trails: Vec<_> = paths.into_iter().take(limit).map(forward).collect();
                let snapshots = trails.iter().map(|trail| replay(workspace, trail)).collect();
                (Outcome::AllSolutions(snapshots), trails)
            }
        };

        SearchReport {
            outcome,
            trails,
            statistics: self.stats.clone(),
            truncated: self.truncated,
        }
    }
}

fn forward<E>(mut path: Vec<E>) -> Vec<E> {
    path.reverse();
    path
}

/// Remaining budget after `edit`, or a contract violation if it overdraws.
pub(crate) fn charge<P: Problem>(problem: &P, edit: &EditOf<P>, budget: u32) -> u32 {
    let cost = problem.consumes(edit);
    match budget.checked_sub(cost) {
        Some(remaining) => remaining,
        None => ContractViolation::BudgetUnderflow {
            edit: format!("{:?}", edit),
            cost,
            budget,
        }
        .raise(),
    }
}

/// Generate, filter and order the candidates of one frame.
pub(crate) fn ordered_candidates<P: Problem>(
    problem: &P,
    heuristic: Option<&CostFn<'_, P>>,
    workspace: &P::Workspace,
    budget: u32,
    stats: &mut SearchStatistics,
) -> Vec<EditOf<P>> {
    let generated = problem.moves(workspace, budget);
    let total = generated.len();

    let mut feasible: Vec<_> = generated
        .into_iter()
        .filter(|edit| problem.feasible(workspace, edit))
        .collect();
    stats.generated += total as u64;
    stats.pruned += (total - feasible.len()) as u64;

    if let Some(cost) = heuristic {
        // stable: equal costs keep generation order
        feasible.sort_by_cached_key(|edit| cost(workspace, edit));
    }
    feasible
}

/// Run one search and return only its outcome.
///
/// `workspace` is restored before this returns.
pub fn search<P: Problem>(
    problem: &P,
    workspace: &mut P::Workspace,
    budget: u32,
    mode: SearchMode,
    heuristic: Option<&CostFn<'_, P>>,
    memoize: bool,
) -> Outcome<P::Workspace> {
    let config = SearchConfig {
        mode,
        memoize,
        ..SearchConfig::default()
    };
    SearchEngine::new(problem)
        .with_config(config)
        .with_heuristic(heuristic)
        .search(workspace, budget)
        .outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary strings with no two adjacent ones.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Bits(Vec<u8>);

    impl Workspace for Bits {
        type Edit = u8;

        fn apply(&mut self, bit: &u8) {
            self.0.push(*bit);
        }

        fn undo(&mut self, _bit: &u8) {
            self.0.pop();
        }
    }

    struct NoAdjacentOnes {
        length: usize,
    }

    impl Problem for NoAdjacentOnes {
        type Workspace = Bits;
        type Key = (usize, Option<u8>);

        fn moves(&self, _workspace: &Bits, budget: u32) -> Vec<u8> {
            if budget == 0 {
                return Vec::new();
            }
            vec![0, 1]
        }

        fn feasible(&self, workspace: &Bits, bit: &u8) -> bool {
            !(*bit == 1 && workspace.0.last() == Some(&1))
        }

        fn is_goal(&self, workspace: &Bits, _budget: u32) -> bool {
            workspace.0.len() == self.length
        }

        fn memo_key(&self, workspace: &Bits, _budget: u32) -> Option<Self::Key> {
            Some((workspace.0.len(), workspace.0.last().copied()))
        }
    }

    fn run(length: usize, config: SearchConfig) -> SearchReport<Bits> {
        let problem = NoAdjacentOnes { length };
        let mut bits = Bits(Vec::new());
        let report = SearchEngine::new(&problem)
            .with_config(config)
            .search(&mut bits, length as u32);
        assert!(bits.0.is_empty(), "workspace not restored");
        report
    }

    fn config(mode: SearchMode, memoize: bool) -> SearchConfig {
        SearchConfig {
            mode,
            memoize,
            verify_undo: true,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_first_returns_generation_order_witness() {
        let report = run(3, config(SearchMode::First, false));
        assert_eq!(report.outcome, Outcome::Found(Bits(vec![0, 0, 0])));
        assert_eq!(report.trails, vec![vec![0, 0, 0]]);
    }

    #[test]
    fn test_count_matches_fibonacci() {
        let report = run(4, config(SearchMode::Count, false));
        assert_eq!(report.outcome, Outcome::Count(8));
        assert_eq!(report.statistics.goals, 8);
    }

    #[test]
    fn test_all_matches_count() {
        let all = run(5, config(SearchMode::All, false));
        let count = run(5, config(SearchMode::Count, false));
        assert_eq!(all.outcome.count(), count.outcome.count());
        assert_eq!(all.trails.len(), all.outcome.solutions().len());
        for (trail, snapshot) in all.trails.iter().zip(all.outcome.solutions()) {
            assert_eq!(&snapshot.0, trail);
        }
    }

    #[test]
    fn test_memoization_preserves_outcomes() {
        for mode in [SearchMode::First, SearchMode::Count, SearchMode::All] {
            let plain = run(8, config(mode, false));
            let cached = run(8, config(mode, true));
            assert_eq!(plain.outcome, cached.outcome, "mode {}", mode);
        }
        let cached = run(8, config(SearchMode::Count, true));
        assert!(cached.statistics.memo_hits > 0);
        assert!(cached.statistics.nodes < run(8, config(SearchMode::Count, false)).statistics.nodes);
    }

    #[test]
    fn test_heuristic_keeps_solution_set() {
        let problem = NoAdjacentOnes { length: 4 };
        let prefer_ones = |_: &Bits, bit: &u8| u64::from(1 - *bit);
        let mut bits = Bits(Vec::new());

        let plain = search(&problem, &mut bits, 4, SearchMode::All, None, false);
        let ordered = search(&problem, &mut bits, 4, SearchMode::All, Some(&prefer_ones), false);
        assert_eq!(plain.count(), ordered.count());
        for solution in plain.solutions() {
            assert!(ordered.solutions().contains(solution));
        }

        let first = search(&problem, &mut bits, 4, SearchMode::First, Some(&prefer_ones), false);
        assert_eq!(first, Outcome::Found(Bits(vec![1, 0, 1, 0])));
    }

    #[test]
    fn test_heuristic_ties_keep_generation_order() {
        let problem = NoAdjacentOnes { length: 2 };
        let flat = |_: &Bits, _: &u8| 0u64;
        let mut bits = Bits(Vec::new());
        let first = search(&problem, &mut bits, 2, SearchMode::First, Some(&flat), false);
        assert_eq!(first, Outcome::Found(Bits(vec![0, 0])));
    }

    #[test]
    fn test_max_solutions_truncates_all() {
        let mut capped = config(SearchMode::All, true);
        capped.max_solutions = Some(3);
        let report = run(6, capped);
        assert_eq!(report.outcome.count(), 3);
        assert!(report.truncated);

        let full = run(6, config(SearchMode::All, false));
        assert_eq!(&full.outcome.solutions()[..3], report.outcome.solutions());
    }

    #[test]
    fn test_empty_outcomes_are_data() {
        // every string of length 3 needs 3 budget
        let problem = NoAdjacentOnes { length: 3 };
        let mut bits = Bits(Vec::new());
        assert_eq!(search(&problem, &mut bits, 0, SearchMode::First, None, false), Outcome::NotFound);
        assert_eq!(search(&problem, &mut bits, 0, SearchMode::Count, None, false), Outcome::Count(0));
        assert_eq!(
            search(&problem, &mut bits, 0, SearchMode::All, None, false),
            Outcome::AllSolutions(Vec::new())
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = NoAdjacentOnes { length: 7 };
        let bits = Bits(Vec::new());
        for mode in [SearchMode::First, SearchMode::Count, SearchMode::All] {
            let sequential = run(7, config(mode, false));
            let parallel = search_parallel(&problem, &bits, 7, &config(mode, true), None);
            assert_eq!(sequential.outcome, parallel.outcome, "mode {}", mode);
            assert_eq!(sequential.trails, parallel.trails, "mode {}", mode);
        }
    }

    #[test]
    fn test_search_mode_parsing() {
        assert_eq!("First".parse::<SearchMode>(), Ok(SearchMode::First));
        assert_eq!("all".parse::<SearchMode>(), Ok(SearchMode::All));
        assert!("best".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::Count.to_string(), "count");
    }

    /// Edits that cost two against a budget of one.
    struct Greedy;

    impl Problem for Greedy {
        type Workspace = Bits;
        type Key = ();

        fn moves(&self, _workspace: &Bits, _budget: u32) -> Vec<u8> {
            vec![0]
        }

        fn feasible(&self, _workspace: &Bits, _bit: &u8) -> bool {
            true
        }

        fn is_goal(&self, workspace: &Bits, _budget: u32) -> bool {
            workspace.0.len() == 1
        }

        fn consumes(&self, _bit: &u8) -> u32 {
            2
        }
    }

    #[test]
    #[should_panic(expected = "consumes 2 but only 1 budget remains")]
    fn test_budget_underflow_panics() {
        let mut bits = Bits(Vec::new());
        let _ = search(&Greedy, &mut bits, 1, SearchMode::First, None, false);
    }

    /// Workspace whose undo forgets to restore its counter.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Leaky {
        depth: usize,
        touched: u32,
    }

    impl Workspace for Leaky {
        type Edit = ();

        fn apply(&mut self, _edit: &()) {
            self.depth += 1;
            self.touched += 1;
        }

        fn undo(&mut self, _edit: &()) {
            self.depth -= 1;
        }
    }

    struct Endless;

    impl Problem for Endless {
        type Workspace = Leaky;
        type Key = ();

        fn moves(&self, _workspace: &Leaky, _budget: u32) -> Vec<()> {
            vec![()]
        }

        fn feasible(&self, _workspace: &Leaky, _edit: &()) -> bool {
            true
        }

        fn is_goal(&self, workspace: &Leaky, _budget: u32) -> bool {
            workspace.depth == 2
        }

        fn consumes(&self, _edit: &()) -> u32 {
            0
        }
    }

    #[test]
    #[should_panic(expected = "did not restore the workspace")]
    fn test_undo_mismatch_panics_when_verified() {
        let mut leaky = Leaky { depth: 0, touched: 0 };
        let mut engine = SearchEngine::new(&Endless).with_config(config(SearchMode::Count, false));
        let _ = engine.search(&mut leaky, 0);
    }

    /// Zero-cost edits that never reach a goal.
    struct Runaway;

    impl Problem for Runaway {
        type Workspace = Leaky;
        type Key = ();

        fn moves(&self, _workspace: &Leaky, _budget: u32) -> Vec<()> {
            vec![()]
        }

        fn feasible(&self, _workspace: &Leaky, _edit: &()) -> bool {
            true
        }

        fn is_goal(&self, _workspace: &Leaky, _budget: u32) -> bool {
            false
        }

        fn consumes(&self, _edit: &()) -> u32 {
            0
        }
    }

    #[test]
    #[should_panic(expected = "exceeds limit 50")]
    fn test_depth_limit_panics() {
        let mut leaky = Leaky { depth: 0, touched: 0 };
        let limited = SearchConfig {
            depth_limit: 50,
            verify_undo: false,
            ..SearchConfig::default()
        };
        let _ = SearchEngine::new(&Runaway).with_config(limited).search(&mut leaky, 0);
    }

    #[test]
    fn test_memo_without_key_falls_back() {
        let mut bits = Bits(Vec::new());
        let mut engine = SearchEngine::new(&Greedy).with_memoization(true);
        let report = engine.search(&mut bits, 4);
        assert_eq!(report.outcome, Outcome::Found(Bits(vec![0])));
        assert_eq!(engine.statistics().memo_misses, 0);
        assert!(engine.trail().is_empty());
    }
}
