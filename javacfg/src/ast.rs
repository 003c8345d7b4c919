//! Statement-tree input model.
//!
//! The builder does not parse Java source text. A front end (or a test)
//! constructs this tree and hands it to [`crate::ControlFlowBuilder`]. The
//! statement kinds form a closed set, so the per-kind translation rules are
//! dispatched with an exhaustive `match`: adding a kind is a compile-time
//! decision, not a runtime failure.
//!
//! Expressions are opaque to the builder. It never evaluates them; it only
//! records them on `Choice` nodes for inspection and hands thrown expressions
//! to the [`crate::resolve::TypeResolver`] collaborator.

use compact_str::CompactString;
use smallvec::SmallVec;

/// A 1-indexed source position, kept for diagnostics and rendering only.
///
/// Control decisions never depend on positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
}

impl Position {
    /// Creates a position from a line and column.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// An opaque expression.
///
/// Uses `CompactString` for the text - stores up to 24 bytes inline without
/// heap allocation, and most Java condition expressions are short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    /// Source text of the expression, used by table-driven type resolution
    /// and for human inspection. Never interpreted by the builder.
    pub text: CompactString,
    /// Where the expression starts.
    pub pos: Position,
}

impl Expr {
    /// Creates an expression from its source text and position.
    pub fn new(text: impl Into<CompactString>, pos: Position) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// One statement with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    /// The statement's structure.
    pub kind: StmtKind,
    /// Where the statement starts.
    pub pos: Position,
}

impl Stmt {
    /// Creates a statement from its kind and position.
    #[must_use]
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Self { kind, pos }
    }
}

/// The closed set of statement kinds the builder translates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// `{ ... }` - also the shape of method and constructor bodies.
    Block(Vec<Stmt>),
    /// `if (condition) then else otherwise`.
    If {
        /// The guard expression.
        condition: Expr,
        /// Statement executed when the guard holds.
        then_branch: Box<Stmt>,
        /// Statement executed when the guard does not hold, if any.
        else_branch: Option<Box<Stmt>>,
    },
    /// `while (condition) body`.
    While {
        /// The loop test.
        condition: Expr,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// `do body while (condition);`.
    DoWhile {
        /// The loop test, evaluated after each body execution.
        condition: Expr,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// Classic `for (init; condition; update) body`.
    For {
        /// Initializer clauses, executed once, left to right.
        init: Vec<Expr>,
        /// The loop test; absent for `for (;;)`.
        condition: Option<Expr>,
        /// Updater clauses, executed after each iteration, left to right.
        update: Vec<Expr>,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// Enhanced `for (var : iterable) body`.
    ForEach {
        /// The iterated expression.
        iterable: Expr,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// `switch (selector) { entries }`.
    Switch {
        /// The selector expression.
        selector: Expr,
        /// Entries in source order.
        entries: Vec<SwitchEntry>,
    },
    /// `try { body } catch ... finally { ... }`.
    Try {
        /// The protected block.
        body: Vec<Stmt>,
        /// Catch clauses in declaration order.
        catches: Vec<CatchClause>,
        /// The finally block, if any.
        finally: Option<Vec<Stmt>>,
    },
    /// `label: body`.
    Labeled {
        /// The label name.
        label: CompactString,
        /// The labeled statement.
        body: Box<Stmt>,
    },
    /// `break;` or `break label;`.
    Break {
        /// The target label, if any.
        label: Option<CompactString>,
    },
    /// `continue;` or `continue label;`.
    Continue {
        /// The target label, if any.
        label: Option<CompactString>,
    },
    /// `return;` or `return value;`.
    Return {
        /// The returned expression, if any. Informational only.
        value: Option<Expr>,
    },
    /// `throw value;`.
    Throw {
        /// The thrown expression.
        value: Expr,
    },
    /// `;` - produces no flow.
    Empty,
    /// A local class or interface declaration - produces no flow.
    LocalType {
        /// The declared type's name.
        name: CompactString,
    },
    /// Any other statement (expression statement, local variable
    /// declaration, ...) - a plain step.
    Expr(Expr),
}

/// How a switch entry is written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchEntryForm {
    /// `case x: statements` - the only fully supported form.
    Classic,
    /// `case x -> ...` - translated best-effort as if classic, with an
    /// "unsupported switch form" diagnostic.
    Arrow,
}

/// One `case`/`default` entry of a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchEntry {
    /// Label expressions; empty for `default`.
    pub labels: Vec<Expr>,
    /// Classic or arrow form.
    pub form: SwitchEntryForm,
    /// The entry's statements.
    pub body: Vec<Stmt>,
    /// Where the entry starts.
    pub pos: Position,
}

/// One catch clause of a try statement.
///
/// Multi-catch (`catch (A | B e)`) declares several types; the clause
/// handles a throw when any of them is assignable from the thrown type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchClause {
    /// Declared exception types; at least one.
    pub types: SmallVec<[CompactString; 1]>,
    /// The handler body.
    pub body: Vec<Stmt>,
    /// Where the clause starts.
    pub pos: Position,
}
