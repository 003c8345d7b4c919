//! Flow-node model: the vertices of a control-flow graph.

use smallvec::SmallVec;

use crate::ast::{Expr, Position, Stmt};

/// Identity of a flow node within its graph's arena.
///
/// Node identity, not structural equality, is what traversal and
/// deduplication use: a graph routinely contains structurally identical
/// nodes (replicated finally blocks) that are distinct vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(pub(crate) u32);

impl FlowId {
    /// The node's index in its graph's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of a flow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    /// The single entry node of a built unit.
    Start,
    /// A simple step: always goes to `next`.
    Step,
    /// May go to `next`, or may branch to `branch` when the condition is
    /// taken.
    Choice,
    /// Like `Step`, but caused by a break statement.
    Break,
    /// Like `Step`, but caused by a continue statement.
    Continue,
    /// Like `Step`, but caused by a return statement.
    Return,
    /// Like `Step`, but caused by a throw statement; `next` is the matching
    /// handler's entry, when one resolves.
    Throw,
    /// One initializer clause of a classic for loop.
    ForInit,
    /// One updater clause of a classic for loop.
    ForUpdate,
}

impl FlowKind {
    /// Fixed-width name used by the debug rendering, at most six characters.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Step => "STEP",
            Self::Choice => "CHOICE",
            Self::Break => "BREAK",
            Self::Continue => "CONTIN",
            Self::Return => "RETURN",
            Self::Throw => "THROW",
            Self::ForInit => "FOR_IN",
            Self::ForUpdate => "FOR_UP",
        }
    }
}

/// What a flow node was built from: a whole statement, or one decomposed
/// sub-expression (a loop initializer/updater clause, a switch-case label).
///
/// Used only for diagnostics and rendering, never for control decisions.
#[derive(Debug, Clone, Copy)]
pub enum SourceRef<'a> {
    /// The node represents a whole statement.
    Stmt(&'a Stmt),
    /// The node represents a sub-expression of a statement.
    Expr(&'a Expr),
}

impl SourceRef<'_> {
    /// The source position of the originating syntax.
    #[must_use]
    pub fn pos(&self) -> Position {
        match self {
            Self::Stmt(stmt) => stmt.pos,
            Self::Expr(expr) => expr.pos,
        }
    }
}

/// One vertex of the control-flow graph.
#[derive(Debug, Clone)]
pub struct FlowNode<'a> {
    /// The originating statement or sub-expression.
    pub source: SourceRef<'a>,
    /// The node's kind.
    pub kind: FlowKind,
    /// Successor on normal completion; `None` means control leaves the
    /// analysed unit here.
    pub next: Option<FlowId>,
    /// Successor when the guarding condition is taken; `Choice` nodes only.
    /// Absent when taking the condition leaves the analysed unit, as in an
    /// `if` with an empty body at the end of a method.
    pub branch: Option<FlowId>,
    /// The guarding expression of a `Choice` node. Informational only.
    pub condition: Option<&'a Expr>,
    /// Problems found while building this node (unresolved label,
    /// unresolved throw target, unsupported switch form).
    ///
    /// Uses `SmallVec` - the overwhelming majority of nodes have none.
    pub diagnostics: SmallVec<[String; 1]>,
}
