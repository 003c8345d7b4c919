//! Per-statement-kind translation rules.

use crate::ast::{CatchClause, Expr, Stmt, StmtKind, SwitchEntry, SwitchEntryForm};
use crate::types::{FlowKind, SourceRef};

use super::{Ctx, Edge, GraphBuilder};

impl<'a> GraphBuilder<'a, '_> {
    /// Translates one statement into its flow sub-graph.
    ///
    /// `next` is the flow that runs after the statement completes normally.
    /// Returns the entry of the produced sub-graph, or `None` when the
    /// statement is transparent (empty statement, declaration-only, empty
    /// block): the caller's continuation then passes through unchanged.
    pub(super) fn translate(
        &mut self,
        stmt: &'a Stmt,
        ctx: &Ctx<'a>,
        next: Option<Edge>,
    ) -> Option<Edge> {
        match &stmt.kind {
            StmtKind::Block(stmts) => self.translate_block(stmts, ctx, next),
            StmtKind::Empty | StmtKind::LocalType { .. } => None,
            StmtKind::Expr(_) | StmtKind::Return { .. } | StmtKind::Throw { .. } => {
                Some(self.translate_simple(stmt, ctx, next))
            }
            StmtKind::Break { label } => Some(self.translate_jump(
                stmt,
                FlowKind::Break,
                label.as_deref(),
                ctx.break_target,
                &ctx.break_labels,
            )),
            StmtKind::Continue { label } => Some(self.translate_jump(
                stmt,
                FlowKind::Continue,
                label.as_deref(),
                ctx.loop_reentry,
                &ctx.continue_labels,
            )),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let choice = self.new_node(SourceRef::Stmt(stmt), FlowKind::Choice, None);
                self.set_condition(choice, condition);
                let taken = self.translate(then_branch, ctx, next).or(next);
                self.set_branch(choice, taken);
                let not_taken = match else_branch {
                    Some(else_branch) => self.translate(else_branch, ctx, next).or(next),
                    None => next,
                };
                self.set_next(choice, not_taken);
                Some(Edge::Node(choice))
            }
            StmtKind::While { condition, body } => {
                let test = self.new_node(SourceRef::Stmt(stmt), FlowKind::Choice, next);
                self.set_condition(test, condition);
                let test_edge = Some(Edge::Node(test));
                self.bind_pending_labels(test_edge);
                let mut inner = ctx.clone();
                inner.loop_reentry = test_edge;
                inner.break_target = next;
                let body_entry = self.translate(body, &inner, test_edge).or(test_edge);
                self.set_branch(test, body_entry);
                test_edge
            }
            StmtKind::DoWhile { condition, body } => {
                let test = self.new_node(SourceRef::Stmt(stmt), FlowKind::Choice, next);
                self.set_condition(test, condition);
                let test_edge = Some(Edge::Node(test));
                self.bind_pending_labels(test_edge);
                let mut inner = ctx.clone();
                inner.loop_reentry = test_edge;
                inner.break_target = next;
                // The test runs after one body execution: the body is the
                // construct's entry and the branch loops back to it.
                let body_entry = self.translate(body, &inner, test_edge).or(test_edge);
                self.set_branch(test, body_entry);
                body_entry
            }
            StmtKind::For {
                init,
                condition,
                update,
                body,
            } => Some(self.translate_for(stmt, init, condition.as_ref(), update, body, ctx, next)),
            StmtKind::ForEach { iterable: _, body } => {
                // One node serves as both the iteration test and the step to
                // the next element.
                let test = self.new_node(SourceRef::Stmt(stmt), FlowKind::Choice, next);
                let test_edge = Some(Edge::Node(test));
                self.bind_pending_labels(test_edge);
                let mut inner = ctx.clone();
                inner.loop_reentry = test_edge;
                inner.break_target = next;
                let body_entry = self.translate(body, &inner, test_edge).or(test_edge);
                self.set_branch(test, body_entry);
                test_edge
            }
            StmtKind::Labeled { label, body } => {
                // `continue label;` on a labeled loop re-enters at the
                // loop's re-entry node (its test, or a classic for's update
                // chain), which does not exist yet, so the label is bound to
                // a forward cell first. The loop itself points the cell at
                // its re-entry edge; for a labeled non-loop the cell falls
                // back to the statement's own flow.
                let cell = self.new_forward();
                let mut inner = ctx.clone();
                inner
                    .continue_labels
                    .insert(label.as_str(), Some(Edge::Forward(cell)));
                inner.break_labels.insert(label.as_str(), next);
                if labels_a_loop(body) {
                    self.defer_to_loop_reentry(cell);
                    self.translate(body, &inner, next)
                } else {
                    let flow = self.translate(body, &inner, next);
                    self.resolve_forward(cell, flow);
                    flow
                }
            }
            StmtKind::Try {
                body,
                catches,
                finally,
            } => self.translate_try(body, catches, finally.as_deref(), ctx, next),
            StmtKind::Switch {
                selector: _,
                entries,
            } => self.translate_switch(entries, ctx, next),
        }
    }

    /// Folds a statement sequence right to left: the last statement's
    /// continuation is `next`, each preceding statement's continuation is
    /// the flow produced for the statement after it. Transparent statements
    /// pass the continuation through unchanged.
    pub(super) fn translate_block(
        &mut self,
        stmts: &'a [Stmt],
        ctx: &Ctx<'a>,
        next: Option<Edge>,
    ) -> Option<Edge> {
        let mut current = next;
        for stmt in stmts.iter().rev() {
            current = self.translate(stmt, ctx, current).or(current);
        }
        if current == next {
            // Nothing produced a flow: the sequence is transparent.
            None
        } else {
            current
        }
    }

    /// Step-like statements: plain steps, returns and throws.
    fn translate_simple(&mut self, stmt: &'a Stmt, ctx: &Ctx<'a>, next: Option<Edge>) -> Edge {
        match &stmt.kind {
            StmtKind::Return { .. } => Edge::Node(self.new_node(
                SourceRef::Stmt(stmt),
                FlowKind::Return,
                ctx.return_target,
            )),
            StmtKind::Throw { value } => self.translate_throw(stmt, value, ctx),
            _ => Edge::Node(self.new_node(SourceRef::Stmt(stmt), FlowKind::Step, next)),
        }
    }

    /// Break and continue, labeled or not. An unknown label degrades the
    /// node instead of failing the build.
    fn translate_jump(
        &mut self,
        stmt: &'a Stmt,
        kind: FlowKind,
        label: Option<&str>,
        unlabeled_target: Option<Edge>,
        labels: &rustc_hash::FxHashMap<&'a str, Option<Edge>>,
    ) -> Edge {
        match label {
            None => Edge::Node(self.new_node(SourceRef::Stmt(stmt), kind, unlabeled_target)),
            Some(label) => match labels.get(label) {
                Some(target) => Edge::Node(self.new_node(SourceRef::Stmt(stmt), kind, *target)),
                None => {
                    let node = self.new_node(SourceRef::Stmt(stmt), kind, None);
                    self.add_diagnostic(node, format!("label not found: {label}"));
                    Edge::Node(node)
                }
            },
        }
    }

    /// Throws resolve statically against the handlers in scope, innermost
    /// first. Resolution failure degrades only this node; the surrounding
    /// build continues.
    fn translate_throw(&mut self, stmt: &'a Stmt, value: &'a Expr, ctx: &Ctx<'a>) -> Edge {
        let node = self.new_node(SourceRef::Stmt(stmt), FlowKind::Throw, None);
        let resolver = self.resolver;
        let thrown = resolver.and_then(|resolver| resolver.static_type(value));
        let handler = thrown.as_ref().and_then(|thrown| {
            ctx.catch_handlers.iter().find(|(clause, _)| {
                clause.types.iter().any(|declared| {
                    resolver.and_then(|resolver| resolver.assignable(declared, thrown))
                        == Some(true)
                })
            })
        });
        match handler {
            Some((_, entry)) => self.set_next(node, *entry),
            None => self.add_diagnostic(node, "cannot resolve throw target"),
        }
        Edge::Node(node)
    }

    /// Classic for loops desugar into an initializer chain, a test, the
    /// body and an updater chain, with the back edge running body -> update
    /// chain -> test.
    #[allow(clippy::too_many_arguments)]
    fn translate_for(
        &mut self,
        stmt: &'a Stmt,
        init: &'a [Expr],
        condition: Option<&'a Expr>,
        update: &'a [Expr],
        body: &'a Stmt,
        ctx: &Ctx<'a>,
        next: Option<Edge>,
    ) -> Edge {
        let test = self.new_node(SourceRef::Stmt(stmt), FlowKind::Choice, next);
        if let Some(condition) = condition {
            self.set_condition(test, condition);
        }

        // Updater clauses chain right to left into the test.
        let mut update_entry = Edge::Node(test);
        for clause in update.iter().rev() {
            let node =
                self.new_node(SourceRef::Expr(clause), FlowKind::ForUpdate, Some(update_entry));
            update_entry = Edge::Node(node);
        }

        // Labeled continue re-enters through the update chain too, not at
        // the initializers.
        let reentry = Some(update_entry);
        self.bind_pending_labels(reentry);
        let mut inner = ctx.clone();
        inner.loop_reentry = reentry;
        inner.break_target = next;
        let body_entry = self.translate(body, &inner, reentry).or(reentry);
        self.set_branch(test, body_entry);

        // Initializer clauses chain right to left into the test; the first
        // of them is the construct's entry.
        let mut entry = Edge::Node(test);
        for clause in init.iter().rev() {
            let node = self.new_node(SourceRef::Expr(clause), FlowKind::ForInit, Some(entry));
            entry = Edge::Node(node);
        }
        entry
    }

    /// A finally block must run on every path leaving its try, and each
    /// path continues differently afterward, so the block is rebuilt once
    /// per exit continuation. Every exit the try block or a catch body can
    /// take is then redirected through its own copy.
    fn translate_try(
        &mut self,
        body: &'a [Stmt],
        catches: &'a [CatchClause],
        finally: Option<&'a [Stmt]>,
        ctx: &Ctx<'a>,
        next: Option<Edge>,
    ) -> Option<Edge> {
        let normal = self.finally_copy(finally, ctx, next);
        let reentry = self.finally_copy(finally, ctx, ctx.loop_reentry);
        let break_target = self.finally_copy(finally, ctx, ctx.break_target);
        let return_target = self.finally_copy(finally, ctx, ctx.return_target);
        let continue_labels = ctx
            .continue_labels
            .clone()
            .into_iter()
            .map(|(label, target)| (label, self.finally_copy(finally, ctx, target)))
            .collect();
        let break_labels = ctx
            .break_labels
            .clone()
            .into_iter()
            .map(|(label, target)| (label, self.finally_copy(finally, ctx, target)))
            .collect();

        let inner = Ctx {
            loop_reentry: reentry,
            break_target,
            return_target,
            continue_labels,
            break_labels,
            catch_handlers: ctx.catch_handlers.clone(),
        };

        // Catch bodies run under the wrapped context but see only the
        // handlers of enclosing tries, not this one's.
        let mut handlers = Vec::with_capacity(catches.len() + ctx.catch_handlers.len());
        for clause in catches {
            let entry = self.translate_block(&clause.body, &inner, normal).or(normal);
            handlers.push((clause, entry));
        }
        handlers.extend(ctx.catch_handlers.iter().copied());

        // The try block sees this try's handlers before any outer ones.
        let mut try_ctx = inner.clone();
        try_ctx.catch_handlers = handlers;
        self.translate_block(body, &try_ctx, normal).or(normal)
    }

    /// One independent copy of the finally block, continuing to `target`
    /// afterward. Without a finally block the original target is used as
    /// is.
    fn finally_copy(
        &mut self,
        finally: Option<&'a [Stmt]>,
        ctx: &Ctx<'a>,
        target: Option<Edge>,
    ) -> Option<Edge> {
        match finally {
            Some(stmts) => self.translate_block(stmts, ctx, target).or(target),
            None => target,
        }
    }

    /// Classic switch: entries keep source order, every entry's body falls
    /// through into the following entry's body, and each labeled entry
    /// becomes a test guarding its body against falling through to the next
    /// test. The `default` entry is never a test; it is the final fallback
    /// once every labeled test has failed.
    ///
    /// Arrow-form entries are translated as if classic, with an
    /// "unsupported switch form" diagnostic on the entry's body node, or on
    /// its label test when the body is empty. An arrow `default` with an
    /// empty body contributes no node at all, so that one shape carries no
    /// diagnostic.
    fn translate_switch(
        &mut self,
        entries: &'a [SwitchEntry],
        ctx: &Ctx<'a>,
        next: Option<Edge>,
    ) -> Option<Edge> {
        let mut inner = ctx.clone();
        inner.break_target = next;

        // First pass, in reverse: build every entry's body with fallthrough
        // as its continuation. An empty entry falls straight through.
        let mut body_flows = vec![None; entries.len()];
        let mut needs_diagnostic = vec![false; entries.len()];
        let mut fallthrough = next;
        for (index, entry) in entries.iter().enumerate().rev() {
            let flow = self.translate_block(&entry.body, &inner, fallthrough);
            if entry.form == SwitchEntryForm::Arrow {
                if let Some(Edge::Node(id)) = flow {
                    self.add_diagnostic(id, "unsupported switch form");
                } else {
                    needs_diagnostic[index] = true;
                }
            }
            let body = flow.or(fallthrough);
            body_flows[index] = body;
            fallthrough = body;
        }

        // Second pass, in reverse: chain the label tests together.
        let mut chain = next;
        for (index, entry) in entries.iter().enumerate().rev() {
            match entry.labels.first() {
                None => {
                    // default: plain fallback, no test of its own.
                    chain = body_flows[index];
                }
                Some(label) => {
                    let test = self.new_node(SourceRef::Expr(label), FlowKind::Choice, chain);
                    self.set_condition(test, label);
                    self.set_branch(test, body_flows[index]);
                    if needs_diagnostic[index] {
                        self.add_diagnostic(test, "unsupported switch form");
                    }
                    chain = Some(Edge::Node(test));
                }
            }
        }
        if chain == next {
            None
        } else {
            chain
        }
    }
}

/// Whether a labeled statement names a loop, through any nesting of further
/// labels. Only then may `continue label;` legally target it.
fn labels_a_loop(stmt: &Stmt) -> bool {
    let mut current = stmt;
    loop {
        match &current.kind {
            StmtKind::While { .. }
            | StmtKind::DoWhile { .. }
            | StmtKind::For { .. }
            | StmtKind::ForEach { .. } => return true,
            StmtKind::Labeled { body, .. } => current = body,
            _ => return false,
        }
    }
}
