//! Search nodes and the arena that owns them.
//!
//! A `SearchNode` wraps a `Board` with the bookkeeping the strategies need: the node it
//! was generated from, its depth and its costs. Nodes are stored in a `NodeArena` and
//! refer to their parent by `NodeId`, so frontier structures only ever hold ids.
use std::hash::{Hash, Hasher};

use crate::board::Board;

/// Index of a node inside its `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordering key for cost-ordered frontiers: `cost_f` first, then `depth`.
///
/// Field order matters, the derived `Ord` compares `cost_f` before `depth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodePriority {
    pub cost_f: u32,
    pub depth: u32,
}

/// A board plus search bookkeeping.
///
/// Equality and hashing only look at the board: two nodes holding equal boards are the
/// same state whatever path led to them.
#[derive(Clone, Debug)]
pub struct SearchNode {
    board: Board,
    parent: Option<NodeId>,
    depth: u32,
    cost_g: u32,
    heuristic_h: u32,
}

impl SearchNode {
    /// Creates a root node at depth 0 with no path cost.
    pub fn root(board: Board) -> Self {
        Self::with_parent(board, None, 0, 0)
    }

    /// Creates a node; the heuristic is computed once here.
    pub fn with_parent(board: Board, parent: Option<NodeId>, depth: u32, cost_g: u32) -> Self {
        let heuristic_h = board.heuristic();
        SearchNode {
            board,
            parent,
            depth,
            cost_g,
            heuristic_h,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn cost_g(&self) -> u32 {
        self.cost_g
    }

    pub fn heuristic_h(&self) -> u32 {
        self.heuristic_h
    }

    /// Estimated total cost `cost_g + heuristic_h`.
    pub fn cost_f(&self) -> u32 {
        self.cost_g + self.heuristic_h
    }

    pub fn priority(&self) -> NodePriority {
        NodePriority {
            cost_f: self.cost_f(),
            depth: self.depth,
        }
    }

    pub fn is_goal(&self) -> bool {
        self.board.is_goal()
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for SearchNode {}

impl Hash for SearchNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

/// Owns every node created during one search run.
///
/// Ids stay valid until the arena is truncated below them or compacted. The recursive
/// strategies use `truncate` to drop a finished subtree, which keeps the arena no larger
/// than the current recursion path plus its pending siblings. Beam search uses `compact`
/// after each generation and must switch to the ids it returns.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Returns the node for `id`, or `None` if it was truncated away.
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    /// Drops every node with an index of `len` or more.
    pub fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Keeps only the nodes in `keep` and their ancestors, renumbering what survives.
    ///
    /// Parents always precede their children, so survivors keep their relative order
    /// and parent links are rewritten to the new ids.
    ///
    /// # Returns
    /// The new ids of `keep`, in the same order. Ids not in the arena are left out.
    pub fn compact(&mut self, keep: &[NodeId]) -> Vec<NodeId> {
        let mut live = vec![false; self.nodes.len()];
        for &id in keep {
            let mut current = Some(id);
            while let Some(id) = current {
                if id.0 >= live.len() || live[id.0] {
                    break;
                }
                live[id.0] = true;
                current = self.nodes[id.0].parent;
            }
        }

        let mut remap = vec![None; self.nodes.len()];
        let mut next = 0;
        for (index, &is_live) in live.iter().enumerate() {
            if is_live {
                remap[index] = Some(NodeId(next));
                next += 1;
            }
        }

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .zip(live)
            .filter(|(_, is_live)| *is_live)
            .map(|(mut node, _)| {
                node.parent = node.parent.and_then(|parent| remap[parent.0]);
                node
            })
            .collect();

        keep.iter()
            .filter_map(|id| remap.get(id.0).copied().flatten())
            .collect()
    }

    /// Pushes one child of `parent` for each successor of its board.
    ///
    /// Children get `depth + 1` and `cost_g + 1`. Returns their ids in successor order,
    /// or `None` if `parent` is not in the arena.
    pub fn expand(&mut self, parent: NodeId) -> Option<Vec<NodeId>> {
        let (successors, depth, cost_g) = {
            let node = self.get(parent)?;
            (node.board.successors(), node.depth, node.cost_g)
        };

        let children: Vec<NodeId> = successors
            .into_iter()
            .map(|board| self.push(SearchNode::with_parent(board, Some(parent), depth + 1, cost_g + 1)))
            .collect();
        Some(children)
    }

    /// Follows parent links from `id` back to the root.
    ///
    /// # Returns
    /// The boards from the root to `id`, root first. Empty if `id` is not in the arena.
    pub fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.get(id)) {
            path.push(node.board.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }
}
