//! Statement-tree construction helpers shared by unit tests, integration
//! tests and examples.
//!
//! These keep test fixtures close to the shape of the Java snippets they
//! mimic: one call per statement, with the statement's source line first.

use compact_str::CompactString;

use crate::ast::{
    CatchClause, Expr, Position, Stmt, StmtKind, SwitchEntry, SwitchEntryForm,
};

/// A statement position on `line`, column 1.
#[must_use]
pub fn pos(line: u32) -> Position {
    Position::new(line, 1)
}

/// An expression at an explicit line and column.
#[must_use]
pub fn expr(line: u32, column: u32, text: &str) -> Expr {
    Expr::new(text, Position::new(line, column))
}

/// `{ ... }`.
#[must_use]
pub fn block(line: u32, stmts: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Block(stmts), pos(line))
}

/// An expression statement.
#[must_use]
pub fn step(line: u32, text: &str) -> Stmt {
    Stmt::new(StmtKind::Expr(expr(line, 5, text)), pos(line))
}

/// `;`.
#[must_use]
pub fn empty(line: u32) -> Stmt {
    Stmt::new(StmtKind::Empty, pos(line))
}

/// `if (condition) then`.
#[must_use]
pub fn if_stmt(line: u32, condition: Expr, then_branch: Stmt) -> Stmt {
    Stmt::new(
        StmtKind::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
        },
        pos(line),
    )
}

/// `if (condition) then else otherwise`.
#[must_use]
pub fn if_else(line: u32, condition: Expr, then_branch: Stmt, else_branch: Stmt) -> Stmt {
    Stmt::new(
        StmtKind::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        },
        pos(line),
    )
}

/// `while (condition) body`.
#[must_use]
pub fn while_stmt(line: u32, condition: Expr, body: Stmt) -> Stmt {
    Stmt::new(
        StmtKind::While {
            condition,
            body: Box::new(body),
        },
        pos(line),
    )
}

/// `do body while (condition);`.
#[must_use]
pub fn do_while(line: u32, condition: Expr, body: Stmt) -> Stmt {
    Stmt::new(
        StmtKind::DoWhile {
            condition,
            body: Box::new(body),
        },
        pos(line),
    )
}

/// Classic `for (init; condition; update) body`.
#[must_use]
pub fn for_stmt(
    line: u32,
    init: Vec<Expr>,
    condition: Option<Expr>,
    update: Vec<Expr>,
    body: Stmt,
) -> Stmt {
    Stmt::new(
        StmtKind::For {
            init,
            condition,
            update,
            body: Box::new(body),
        },
        pos(line),
    )
}

/// `for (var : iterable) body`.
#[must_use]
pub fn for_each(line: u32, iterable: Expr, body: Stmt) -> Stmt {
    Stmt::new(
        StmtKind::ForEach {
            iterable,
            body: Box::new(body),
        },
        pos(line),
    )
}

/// `switch (selector) { entries }`.
#[must_use]
pub fn switch(line: u32, selector: Expr, entries: Vec<SwitchEntry>) -> Stmt {
    Stmt::new(StmtKind::Switch { selector, entries }, pos(line))
}

/// `case labels: body`.
#[must_use]
pub fn case_entry(line: u32, labels: Vec<Expr>, body: Vec<Stmt>) -> SwitchEntry {
    SwitchEntry {
        labels,
        form: SwitchEntryForm::Classic,
        body,
        pos: pos(line),
    }
}

/// `default: body`.
#[must_use]
pub fn default_entry(line: u32, body: Vec<Stmt>) -> SwitchEntry {
    case_entry(line, Vec::new(), body)
}

/// `case labels -> body`.
#[must_use]
pub fn arrow_entry(line: u32, labels: Vec<Expr>, body: Vec<Stmt>) -> SwitchEntry {
    SwitchEntry {
        labels,
        form: SwitchEntryForm::Arrow,
        body,
        pos: pos(line),
    }
}

/// `try { body } catches finally { ... }`.
#[must_use]
pub fn try_stmt(
    line: u32,
    body: Vec<Stmt>,
    catches: Vec<CatchClause>,
    finally: Option<Vec<Stmt>>,
) -> Stmt {
    Stmt::new(
        StmtKind::Try {
            body,
            catches,
            finally,
        },
        pos(line),
    )
}

/// `catch (types e) { body }`.
#[must_use]
pub fn catch_clause(line: u32, types: &[&str], body: Vec<Stmt>) -> CatchClause {
    CatchClause {
        types: types.iter().map(|name| CompactString::from(*name)).collect(),
        body,
        pos: pos(line),
    }
}

/// `label: body`.
#[must_use]
pub fn labeled(line: u32, label: &str, body: Stmt) -> Stmt {
    Stmt::new(
        StmtKind::Labeled {
            label: CompactString::from(label),
            body: Box::new(body),
        },
        pos(line),
    )
}

/// `break;`.
#[must_use]
pub fn brk(line: u32) -> Stmt {
    Stmt::new(StmtKind::Break { label: None }, pos(line))
}

/// `break label;`.
#[must_use]
pub fn brk_to(line: u32, label: &str) -> Stmt {
    Stmt::new(
        StmtKind::Break {
            label: Some(CompactString::from(label)),
        },
        pos(line),
    )
}

/// `continue;`.
#[must_use]
pub fn cont(line: u32) -> Stmt {
    Stmt::new(StmtKind::Continue { label: None }, pos(line))
}

/// `continue label;`.
#[must_use]
pub fn cont_to(line: u32, label: &str) -> Stmt {
    Stmt::new(
        StmtKind::Continue {
            label: Some(CompactString::from(label)),
        },
        pos(line),
    )
}

/// `return;`.
#[must_use]
pub fn ret(line: u32) -> Stmt {
    Stmt::new(StmtKind::Return { value: None }, pos(line))
}

/// `throw value;`.
#[must_use]
pub fn throw_stmt(line: u32, value: Expr) -> Stmt {
    Stmt::new(StmtKind::Throw { value }, pos(line))
}
