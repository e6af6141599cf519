//! The five search strategies over `Board` / `SearchNode`.
//!
//! Every strategy shares the same primitives: nodes are created through a `NodeArena`,
//! the goal test and successor generation come from `Board`, and a node counter is
//! bumped once per node visited (popped from a frontier or entered by recursion), not per
//! node generated. They differ only in frontier discipline and deduplication:
//!
//! | Strategy | Frontier | Dedup |
//! |---|---|---|
//! | `iterative_deepening` | recursion, depth limit 0..=max | none |
//! | `a_star` | `PriorityBucket` on (`cost_f`, `depth`) | expanded boards |
//! | `ida_star` | recursion, `cost_f` bound | none |
//! | `beam_search` | best `width` nodes per generation | none |
//! | `breadth_first` | FIFO queue | expanded boards |
//!
//! Entry points never fail. A fault inside a run, including a panic, is logged and
//! turned into a not-found `SearchOutcome` carrying a diagnostic.
use log::{debug, error, info, trace};
use std::any::Any;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::bucket::PriorityBucket;
use crate::config::{SolverConfig, Verbosity};
use crate::error::SolveFault;
use crate::node::{NodeArena, NodeId, SearchNode};

/// A strategy together with its parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Depth-limited search repeated for every limit from 0 to `max_depth`.
    IterativeDeepening { max_depth: u32 },
    AStar,
    IdaStar,
    /// Keeps the `width` cheapest successors of each generation.
    Beam { width: NonZeroUsize },
    /// Plain breadth-first exploration, offered as "CSP" in the interactive menu.
    BreadthFirst,
}

impl Strategy {
    /// Short name used in log lines and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::IterativeDeepening { .. } => "IDS",
            Strategy::AStar => "A*",
            Strategy::IdaStar => "IDA*",
            Strategy::Beam { .. } => "Beam Search",
            Strategy::BreadthFirst => "BFS",
        }
    }
}

/// What a strategy run reports back to its caller.
///
/// A search that ran out of states and a search that hit a fault both have
/// `found == false`; only `diagnostic` tells them apart.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub found: bool,
    /// Nodes visited, counted once per pop or recursive entry.
    pub nodes_explored: u64,
    /// Wall time of the whole call.
    pub elapsed: Duration,
    /// Description of the fault that ended the run, if any.
    pub diagnostic: Option<String>,
    /// Boards from the initial state to the goal, present when `found`.
    pub solution: Option<Vec<Board>>,
}

impl SearchOutcome {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Runs `strategy` on `board`.
///
/// # Examples
/// ```
/// use flow_solver::board::Board;
/// use flow_solver::config::SolverConfig;
/// use flow_solver::solver::{solve, Strategy};
///
/// let board = Board::new(vec![vec![1, 0], vec![0, 1]]).unwrap();
/// let outcome = solve(&board, Strategy::BreadthFirst, &SolverConfig::default());
/// assert!(outcome.found);
/// assert_eq!(outcome.nodes_explored, 1);
/// ```
pub fn solve(board: &Board, strategy: Strategy, config: &SolverConfig) -> SearchOutcome {
    match strategy {
        Strategy::IterativeDeepening { max_depth } => iterative_deepening(board, max_depth, config),
        Strategy::AStar => a_star(board, config),
        Strategy::IdaStar => ida_star(board, config),
        Strategy::Beam { width } => beam_search(board, width, config),
        Strategy::BreadthFirst => breadth_first(board, config),
    }
}

/// Iterative deepening: depth-limited DFS for each limit `0..=max_depth`.
///
/// Nothing is deduplicated and every iteration starts again from the root, so the node
/// count includes the revisits.
pub fn iterative_deepening(board: &Board, max_depth: u32, config: &SolverConfig) -> SearchOutcome {
    run(board, config, "IDS", |search, root| {
        for limit in 0..=max_depth {
            search.report(Verbosity::Basic, format_args!("IDS - depth limit: {}", limit));
            let before = search.nodes_explored;

            if let Some(goal) = search.depth_limited(root, limit)? {
                search.report(Verbosity::Basic, format_args!("IDS - solution found at depth limit {}", limit));
                return Ok(Some(goal));
            }

            search.report(
                Verbosity::Detailed,
                format_args!("IDS - depth limit {} visited {} nodes", limit, search.nodes_explored - before),
            );
        }
        Ok(None)
    })
}

/// A*: always expands the frontier node with the lowest `cost_f`, shallower first on ties.
///
/// A board that has been expanded once is never expanded again, and successors equal to
/// an expanded board are not enqueued.
pub fn a_star(board: &Board, config: &SolverConfig) -> SearchOutcome {
    run(board, config, "A*", |search, root| {
        let mut frontier = PriorityBucket::new();
        let mut expanded: HashSet<Board> = HashSet::new();
        frontier.enqueue(root, search.node(root)?.priority());

        while !frontier.is_empty() {
            let current = frontier.dequeue()?;
            let node = search.visit(current)?;
            if node.is_goal() {
                return Ok(Some(current));
            }
            if !expanded.insert(node.board().clone()) {
                continue;
            }

            for child in search.expand(current)? {
                let node = search.node(child)?;
                if !expanded.contains(node.board()) {
                    frontier.enqueue(child, node.priority());
                }
            }
        }
        Ok(None)
    })
}

/// IDA*: depth-first search bounded by `cost_f`, starting at the root's `cost_f`.
///
/// Each round raises the bound to the smallest `cost_f` that was pruned in the previous
/// round. The search fails once a round prunes nothing.
pub fn ida_star(board: &Board, config: &SolverConfig) -> SearchOutcome {
    run(board, config, "IDA*", |search, root| {
        let mut bound = search.node(root)?.cost_f();
        loop {
            search.report(Verbosity::Basic, format_args!("IDA* - cost bound: {}", bound));
            let mut next_bound = None;

            if let Some(goal) = search.cost_limited(root, bound, &mut next_bound)? {
                return Ok(Some(goal));
            }

            match next_bound {
                Some(next) => bound = next,
                None => return Ok(None),
            }
        }
    })
}

/// Beam search: expands a whole generation, then keeps the `width` successors with the
/// lowest `cost_f`.
///
/// Nodes are goal-tested when their generation is processed, before expansion. Equal
/// costs keep generation order. Successors that fall out of the beam are dropped from
/// the arena, so memory follows `width` times the depth. Incomplete: a small width can
/// discard every path to a goal.
pub fn beam_search(board: &Board, width: NonZeroUsize, config: &SolverConfig) -> SearchOutcome {
    run(board, config, "Beam Search", |search, root| {
        search.report(Verbosity::Basic, format_args!("Beam Search - width: {}", width));
        let mut beam = vec![root];

        while !beam.is_empty() {
            search.report(Verbosity::Detailed, format_args!("Beam size: {}", beam.len()));
            let mut generation = Vec::new();

            for &id in &beam {
                if search.visit(id)?.is_goal() {
                    return Ok(Some(id));
                }
                generation.extend(search.expand(id)?);
            }

            let mut ranked = Vec::with_capacity(generation.len());
            for id in generation {
                ranked.push((search.node(id)?.cost_f(), id));
            }
            ranked.sort_by_key(|&(cost_f, _)| cost_f);

            beam = ranked
                .into_iter()
                .take(width.get())
                .map(|(_, id)| id)
                .collect();
            // Dropped successors are released; the arena holds only the beam's paths.
            beam = search.arena.compact(&beam);
            search.report(
                Verbosity::Detailed,
                format_args!("Next beam size: {}, nodes held: {}", beam.len(), search.arena.len()),
            );
        }
        Ok(None)
    })
}

/// Breadth-first exploration with a FIFO queue and a set of expanded boards.
pub fn breadth_first(board: &Board, config: &SolverConfig) -> SearchOutcome {
    run(board, config, "BFS", |search, root| {
        let mut queue = VecDeque::from([root]);
        let mut expanded: HashSet<Board> = HashSet::new();

        while let Some(current) = queue.pop_front() {
            let node = search.visit(current)?;
            if node.is_goal() {
                return Ok(Some(current));
            }
            if !expanded.insert(node.board().clone()) {
                continue;
            }

            for child in search.expand(current)? {
                if !expanded.contains(search.node(child)?.board()) {
                    queue.push_back(child);
                }
            }
        }
        Ok(None)
    })
}

/// State of one strategy run.
struct Search<'a> {
    config: &'a SolverConfig,
    arena: NodeArena,
    nodes_explored: u64,
}

impl<'a> Search<'a> {
    fn new(config: &'a SolverConfig) -> Self {
        Search {
            config,
            arena: NodeArena::new(),
            nodes_explored: 0,
        }
    }

    fn report(&self, level: Verbosity, message: fmt::Arguments<'_>) {
        if !self.config.reports(level) {
            return;
        }
        match level {
            Verbosity::Silent | Verbosity::Basic => info!("{}", message),
            Verbosity::Detailed => debug!("{}", message),
            Verbosity::Verbose => trace!("{}", message),
        }
    }

    fn node(&self, id: NodeId) -> Result<&SearchNode, SolveFault> {
        self.arena
            .get(id)
            .ok_or_else(|| SolveFault::Internal(format!("node {} is not in the arena", id.index())))
    }

    /// Counts `id` as explored and returns it.
    fn visit(&mut self, id: NodeId) -> Result<&SearchNode, SolveFault> {
        self.nodes_explored += 1;
        let node = self.node(id)?;
        self.report(
            Verbosity::Verbose,
            format_args!(
                "Visiting node at depth {} (g = {}, h = {}):\n{}",
                node.depth(),
                node.cost_g(),
                node.heuristic_h(),
                node.board()
            ),
        );
        Ok(node)
    }

    fn expand(&mut self, id: NodeId) -> Result<Vec<NodeId>, SolveFault> {
        let children = self
            .arena
            .expand(id)
            .ok_or_else(|| SolveFault::Internal(format!("cannot expand node {}", id.index())))?;
        self.report(Verbosity::Detailed, format_args!("Generated {} successors", children.len()));
        Ok(children)
    }

    /// Depth-limited pre-order DFS. Children are visited in successor order and the
    /// subtree of a failed node is dropped from the arena.
    fn depth_limited(&mut self, id: NodeId, limit: u32) -> Result<Option<NodeId>, SolveFault> {
        if self.visit(id)?.is_goal() {
            return Ok(Some(id));
        }
        if limit == 0 {
            return Ok(None);
        }

        let mark = self.arena.len();
        for child in self.expand(id)? {
            if let Some(goal) = self.depth_limited(child, limit - 1)? {
                return Ok(Some(goal));
            }
        }
        self.arena.truncate(mark);
        Ok(None)
    }

    /// DFS pruned at `cost_f > bound`. Pruned nodes still count as visited, and the
    /// smallest pruned `cost_f` is recorded in `next_bound`.
    fn cost_limited(
        &mut self,
        id: NodeId,
        bound: u32,
        next_bound: &mut Option<u32>,
    ) -> Result<Option<NodeId>, SolveFault> {
        let node = self.visit(id)?;
        let cost_f = node.cost_f();
        if cost_f > bound {
            *next_bound = Some(next_bound.map_or(cost_f, |current| current.min(cost_f)));
            return Ok(None);
        }
        if node.is_goal() {
            return Ok(Some(id));
        }

        let mark = self.arena.len();
        for child in self.expand(id)? {
            if let Some(goal) = self.cost_limited(child, bound, next_bound)? {
                return Ok(Some(goal));
            }
        }
        self.arena.truncate(mark);
        Ok(None)
    }
}

/// Runs `body` from a fresh root and converts whatever happens into a `SearchOutcome`.
fn run<F>(board: &Board, config: &SolverConfig, name: &str, body: F) -> SearchOutcome
where
    F: FnOnce(&mut Search<'_>, NodeId) -> Result<Option<NodeId>, SolveFault>,
{
    let started = Instant::now();
    let mut search = Search::new(config);
    let root = search.arena.push(SearchNode::root(board.clone()));
    search.report(Verbosity::Basic, format_args!("Starting {}", name));

    let result = panic::catch_unwind(AssertUnwindSafe(|| body(&mut search, root)))
        .unwrap_or_else(|payload| Err(SolveFault::Panicked(panic_message(payload.as_ref()))));
    let elapsed = started.elapsed();

    match result {
        Ok(Some(goal)) => {
            let solution = search.arena.path_to(goal);
            if let Some(solved) = solution.last() {
                search.report(Verbosity::Basic, format_args!("{} - solution found", name));
                search.report(Verbosity::Verbose, format_args!("Solved board:\n{}", solved));
            }
            SearchOutcome {
                found: true,
                nodes_explored: search.nodes_explored,
                elapsed,
                diagnostic: None,
                solution: Some(solution),
            }
        }
        Ok(None) => {
            search.report(Verbosity::Basic, format_args!("{} - no solution found", name));
            SearchOutcome {
                found: false,
                nodes_explored: search.nodes_explored,
                elapsed,
                diagnostic: None,
                solution: None,
            }
        }
        Err(fault) => {
            error!("{} failed after {} nodes: {}", name, search.nodes_explored, fault);
            SearchOutcome {
                found: false,
                nodes_explored: search.nodes_explored,
                elapsed,
                diagnostic: Some(fault.to_string()),
                solution: None,
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
