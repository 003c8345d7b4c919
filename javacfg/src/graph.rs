//! The built control-flow graph and cycle-safe traversal over it.

use std::ops::Index;

use rustc_hash::FxHashMap;

use crate::types::{FlowId, FlowNode};

/// A control-flow graph built for one method, constructor or fragment.
///
/// Nodes live in an arena and refer to each other by [`FlowId`]. The graph
/// is expected to contain cycles (every loop produces a back edge), so all
/// traversal goes through [`FlowGraph::visit_all`], which keys its seen-set
/// on node identity.
///
/// The arena may also hold nodes that are not reachable from
/// [`FlowGraph::start`]: statements after an unconditional jump, and finally
/// copies built for exits the try block never takes. Consumers that walk
/// from the start node never see them; [`FlowGraph::unreachable_nodes`]
/// reports the ones that originate from real statements.
///
/// Once built, a graph is immutable: every accessor takes `&self`, so
/// sharing one across threads needs no synchronization.
#[derive(Debug)]
pub struct FlowGraph<'a> {
    pub(crate) nodes: Vec<FlowNode<'a>>,
    pub(crate) start: FlowId,
}

impl<'a> FlowGraph<'a> {
    /// The unit's single `Start` node.
    #[must_use]
    pub fn start(&self) -> FlowId {
        self.start
    }

    /// The node with the given identity.
    #[must_use]
    pub fn node(&self, id: FlowId) -> &FlowNode<'a> {
        &self.nodes[id.index()]
    }

    /// Number of nodes in the arena, including unreachable ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty. It never is: a built graph always holds
    /// at least the `Start` node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every arena node with its identity, including
    /// unreachable ones.
    pub fn iter(&self) -> impl Iterator<Item = (FlowId, &FlowNode<'a>)> {
        self.nodes.iter().enumerate().map(|(index, node)| {
            #[allow(clippy::cast_possible_truncation)]
            (FlowId(index as u32), node)
        })
    }

    /// Calls `f` exactly once per distinct node reachable from `root` via
    /// `next`/`branch` edges.
    ///
    /// Safe on cyclic graphs. Visits in FIFO order from the root, so the
    /// order is deterministic, but no other ordering is guaranteed.
    pub fn visit_all(&self, root: FlowId, mut f: impl FnMut(FlowId, &FlowNode<'a>)) {
        let mut seen = vec![false; self.nodes.len()];
        let mut todo = std::collections::VecDeque::new();
        todo.push_back(root);
        while let Some(id) = todo.pop_front() {
            if seen[id.index()] {
                continue;
            }
            seen[id.index()] = true;
            let node = &self.nodes[id.index()];
            f(id, node);
            if let Some(next) = node.next {
                todo.push_back(next);
            }
            if let Some(branch) = node.branch {
                todo.push_back(branch);
            }
        }
    }

    /// All nodes reachable from the start node, in visit order.
    #[must_use]
    pub fn reachable(&self) -> Vec<FlowId> {
        let mut ids = Vec::new();
        self.visit_all(self.start, |id, _| ids.push(id));
        ids
    }

    /// Arena nodes that no path from the start node reaches.
    ///
    /// This is the dead-code hook: a statement whose flow node is in here
    /// can never execute.
    #[must_use]
    pub fn unreachable_nodes(&self) -> Vec<FlowId> {
        let mut reachable = vec![false; self.nodes.len()];
        self.visit_all(self.start, |id, _| reachable[id.index()] = true);
        reachable
            .iter()
            .enumerate()
            .filter(|(_, seen)| !**seen)
            .map(|(index, _)| {
                #[allow(clippy::cast_possible_truncation)]
                FlowId(index as u32)
            })
            .collect()
    }

    /// Collects the diagnostics of every reachable node that has any,
    /// keyed by node identity.
    ///
    /// The returned slices borrow from the graph itself, so the map stays
    /// usable after traversal: reachable identities are gathered first and
    /// the slices are taken from the arena afterward.
    #[must_use]
    pub fn collect_diagnostics(&self) -> FxHashMap<FlowId, &[String]> {
        let mut diagnostics = FxHashMap::default();
        for id in self.reachable() {
            let node = &self.nodes[id.index()];
            if !node.diagnostics.is_empty() {
                diagnostics.insert(id, node.diagnostics.as_slice());
            }
        }
        diagnostics
    }
}

impl<'a> Index<FlowId> for FlowGraph<'a> {
    type Output = FlowNode<'a>;

    fn index(&self, id: FlowId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}
