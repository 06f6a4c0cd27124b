//! Parallel exploration of the root candidates

use super::{
    charge, ordered_candidates, CostFn, EditOf, Outcome, Problem, SearchConfig, SearchEngine,
    SearchMode, SearchReport, SearchStatistics, Workspace,
};
use rayon::prelude::*;
use std::time::Instant;

/// Search with every feasible root candidate handed to its own rayon worker.
///
/// Each worker gets an independent clone of the workspace and its own engine,
/// trail and memo cache. Results are merged in candidate order, so `Count`
/// and `All` match the sequential answer and `First` returns the witness the
/// sequential search would have found first.
pub fn search_parallel<P>(
    problem: &P,
    workspace: &P::Workspace,
    budget: u32,
    config: &SearchConfig,
    heuristic: Option<&CostFn<'_, P>>,
) -> SearchReport<P::Workspace>
where
    P: Problem + Sync,
    P::Workspace: Send + Sync,
    EditOf<P>: Send + Sync,
{
    let start = Instant::now();

    if problem.is_goal(workspace, budget) {
        let mut root = workspace.clone();
        return SearchEngine::new(problem)
            .with_config(config.clone())
            .with_heuristic(heuristic)
            .search(&mut root, budget);
    }

    let mut statistics = SearchStatistics {
        nodes: 1,
        ..SearchStatistics::default()
    };
    let candidates = ordered_candidates(problem, heuristic, workspace, budget, &mut statistics);
    tracing::debug!(branches = candidates.len(), mode = %config.mode, "parallel search");

    let explore_branch = |edit: EditOf<P>| {
        let remaining = charge(problem, &edit, budget);
        let mut local = workspace.clone();
        local.apply(&edit);
        let report = SearchEngine::new(problem)
            .with_config(config.clone())
            .with_heuristic(heuristic)
            .search(&mut local, remaining);
        (edit, report)
    };

    let branches: Vec<(EditOf<P>, SearchReport<P::Workspace>)> = match config.mode {
        SearchMode::First => candidates
            .into_par_iter()
            .map(explore_branch)
            .find_map_first(|(edit, report)| (!report.outcome.is_empty()).then_some((edit, report)))
            .into_iter()
            .collect(),
        SearchMode::Count | SearchMode::All => {
            candidates.into_par_iter().map(explore_branch).collect()
        }
    };

    let mut report = merge(config, branches, statistics);
    report.statistics.elapsed = start.elapsed();
    report
}

fn merge<W: Workspace>(
    config: &SearchConfig,
    branches: Vec<(W::Edit, SearchReport<W>)>,
    mut statistics: SearchStatistics,
) -> SearchReport<W> {
    let mut total = 0;
    let mut snapshots = Vec::new();
    let mut trails = Vec::new();
    let mut truncated = false;

    for (edit, branch) in branches {
        statistics.applied += 1;
        statistics.merge(&branch.statistics);
        statistics.max_depth = statistics.max_depth.max(branch.statistics.max_depth + 1);
        truncated |= branch.truncated;

        total += branch.outcome.count();
        trails.extend(branch.trails.into_iter().map(|tail| {
            let mut trail = Vec::with_capacity(tail.len() + 1);
            trail.push(edit.clone());
            trail.extend(tail);
            trail
        }));
        match branch.outcome {
            Outcome::Found(snapshot) => snapshots.push(snapshot),
            Outcome::AllSolutions(found) => snapshots.extend(found),
            Outcome::NotFound | Outcome::Count(_) => {}
        }
    }

    let outcome = match config.mode {
        SearchMode::First => match snapshots.into_iter().next() {
            Some(snapshot) => Outcome::Found(snapshot),
            None => Outcome::NotFound,
        },
        SearchMode::Count => Outcome::Count(total),
        SearchMode::All => {
            if let Some(limit) = config.max_solutions {
                if snapshots.len() >= limit {
                    truncated = true;
                }
                snapshots.truncate(limit);
                trails.truncate(limit);
            }
            Outcome::AllSolutions(snapshots)
        }
    };

    SearchReport {
        outcome,
        trails,
        statistics,
        truncated,
    }
}
