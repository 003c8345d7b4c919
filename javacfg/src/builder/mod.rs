//! The recursive statement-to-flow translator.
//!
//! Translation threads a context through every statement: where control
//! goes on normal completion, where an unlabeled `continue`/`break` goes,
//! where labeled ones go, where `return` converges, and which catch
//! handlers are in scope, innermost first. Each statement kind consumes
//! that context and produces the entry node of its own sub-graph.
//!
//! Sequences are folded right to left, so a statement's continuation is
//! already built when the statement itself is translated. The one place
//! that genuinely needs a reference to a not-yet-built node is the labeled
//! statement: `continue label;` must target the label's own loop test
//! before that loop has been translated. Those references go through
//! forward cells that are resolved before the graph is handed to the
//! caller, so the public graph never contains a placeholder.

mod visits;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ast::{CatchClause, Expr, Stmt};
use crate::graph::FlowGraph;
use crate::resolve::TypeResolver;
use crate::types::{FlowId, FlowKind, FlowNode, SourceRef};

/// Translates statement trees into control-flow graphs.
///
/// One builder may be reused for any number of independent builds; it holds
/// no per-build state. Without a [`TypeResolver`], throw statements degrade
/// to nodes with an absent successor and a diagnostic.
#[derive(Default, Clone, Copy)]
pub struct ControlFlowBuilder<'r> {
    resolver: Option<&'r dyn TypeResolver>,
}

impl<'r> ControlFlowBuilder<'r> {
    /// A builder with no type resolution; throw targets stay unresolved.
    #[must_use]
    pub fn new() -> Self {
        Self { resolver: None }
    }

    /// A builder that resolves throw targets through `resolver`.
    #[must_use]
    pub fn with_resolver(resolver: &'r dyn TypeResolver) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// Builds the control-flow graph of one method/constructor body or
    /// statement fragment.
    ///
    /// The returned graph always has a `Start` node; for an empty body its
    /// `next` is absent. The graph borrows `body` for source positions and
    /// condition expressions only.
    #[must_use]
    pub fn build<'a>(&self, body: &'a Stmt) -> FlowGraph<'a> {
        let mut builder = GraphBuilder::new(self.resolver);
        let start = builder.new_node(SourceRef::Stmt(body), FlowKind::Start, None);
        let flow = builder.translate(body, &Ctx::default(), None);
        builder.set_next(start, flow);
        builder.finish(start)
    }
}

impl std::fmt::Debug for ControlFlowBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlFlowBuilder")
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

/// A builder-internal edge: either a finished node or a forward cell that
/// will be pointed at a node later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Edge {
    Node(FlowId),
    Forward(usize),
}

/// State of one forward cell. `Resolved(None)` means the labeled statement
/// turned out to produce no flow at all.
#[derive(Debug, Clone, Copy)]
enum ForwardCell {
    Unresolved,
    Resolved(Option<Edge>),
}

/// The "where do I go next" context threaded through translation.
///
/// The sequential continuation is passed separately, as an explicit
/// parameter, because it changes at every step of a sequence fold; these
/// fields change only at loop, label and try boundaries.
#[derive(Clone, Default)]
pub(super) struct Ctx<'a> {
    /// Target of an unlabeled `continue`.
    pub(super) loop_reentry: Option<Edge>,
    /// Target of an unlabeled `break`.
    pub(super) break_target: Option<Edge>,
    /// The flow all `return`s converge to; absent means returns leave the
    /// unit directly.
    pub(super) return_target: Option<Edge>,
    /// Label to labeled-`continue` target.
    pub(super) continue_labels: FxHashMap<&'a str, Option<Edge>>,
    /// Label to labeled-`break` target.
    pub(super) break_labels: FxHashMap<&'a str, Option<Edge>>,
    /// Catch handlers in scope, innermost-declared first, paired with
    /// their entry flows.
    pub(super) catch_handlers: Vec<(&'a CatchClause, Option<Edge>)>,
}

/// A node under construction: edges may still be forward cells.
struct BuildNode<'a> {
    source: SourceRef<'a>,
    kind: FlowKind,
    next: Option<Edge>,
    branch: Option<Edge>,
    condition: Option<&'a Expr>,
    diagnostics: SmallVec<[String; 1]>,
}

/// Per-build arena and forward-cell table.
pub(super) struct GraphBuilder<'a, 'r> {
    nodes: Vec<BuildNode<'a>>,
    forwards: Vec<ForwardCell>,
    /// Cells of labels naming the loop about to be translated; the loop
    /// points them at its re-entry edge.
    pending_labels: Vec<usize>,
    pub(super) resolver: Option<&'r dyn TypeResolver>,
}

impl<'a, 'r> GraphBuilder<'a, 'r> {
    fn new(resolver: Option<&'r dyn TypeResolver>) -> Self {
        Self {
            nodes: Vec::new(),
            forwards: Vec::new(),
            pending_labels: Vec::new(),
            resolver,
        }
    }

    pub(super) fn new_node(
        &mut self,
        source: SourceRef<'a>,
        kind: FlowKind,
        next: Option<Edge>,
    ) -> FlowId {
        #[allow(clippy::cast_possible_truncation)]
        let id = FlowId(self.nodes.len() as u32);
        self.nodes.push(BuildNode {
            source,
            kind,
            next,
            branch: None,
            condition: None,
            diagnostics: SmallVec::new(),
        });
        id
    }

    pub(super) fn set_next(&mut self, id: FlowId, next: Option<Edge>) {
        self.nodes[id.index()].next = next;
    }

    pub(super) fn set_branch(&mut self, id: FlowId, branch: Option<Edge>) {
        self.nodes[id.index()].branch = branch;
    }

    pub(super) fn set_condition(&mut self, id: FlowId, condition: &'a Expr) {
        self.nodes[id.index()].condition = Some(condition);
    }

    pub(super) fn add_diagnostic(&mut self, id: FlowId, message: impl Into<String>) {
        self.nodes[id.index()].diagnostics.push(message.into());
    }

    /// Allocates an unresolved forward cell.
    pub(super) fn new_forward(&mut self) -> usize {
        self.forwards.push(ForwardCell::Unresolved);
        self.forwards.len() - 1
    }

    /// Points a forward cell at its real flow (or at no flow).
    pub(super) fn resolve_forward(&mut self, cell: usize, target: Option<Edge>) {
        self.forwards[cell] = ForwardCell::Resolved(target);
    }

    /// Defers a cell to the re-entry edge of the loop translated next.
    pub(super) fn defer_to_loop_reentry(&mut self, cell: usize) {
        self.pending_labels.push(cell);
    }

    /// Points every cell deferred by an enclosing label at this loop's
    /// re-entry edge. Loops call this before translating their body, so a
    /// label never binds to a loop nested deeper than the one it names.
    pub(super) fn bind_pending_labels(&mut self, reentry: Option<Edge>) {
        for cell in std::mem::take(&mut self.pending_labels) {
            self.resolve_forward(cell, reentry);
        }
    }

    /// Resolves every forward reference and freezes the arena into the
    /// public graph. After this, no node is ever mutated again.
    fn finish(self, start: FlowId) -> FlowGraph<'a> {
        let Self {
            nodes, forwards, ..
        } = self;
        let nodes = nodes
            .into_iter()
            .map(|node| FlowNode {
                source: node.source,
                kind: node.kind,
                next: node.next.and_then(|edge| chase(&forwards, edge)),
                branch: node.branch.and_then(|edge| chase(&forwards, edge)),
                condition: node.condition,
                diagnostics: node.diagnostics,
            })
            .collect();
        FlowGraph { nodes, start }
    }
}

/// Follows forward cells until a real node (or the absence of one).
fn chase(forwards: &[ForwardCell], mut edge: Edge) -> Option<FlowId> {
    loop {
        match edge {
            Edge::Node(id) => return Some(id),
            Edge::Forward(cell) => match forwards[cell] {
                ForwardCell::Resolved(Some(target)) => edge = target,
                // Every cell is resolved once its labeled statement has been
                // translated, so Unresolved cannot survive a finished build.
                ForwardCell::Resolved(None) | ForwardCell::Unresolved => return None,
            },
        }
    }
}
