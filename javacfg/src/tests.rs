//! Builder unit tests: one per translation rule, asserting on graph
//! structure rather than rendered text.

#![allow(clippy::unwrap_used)]

use compact_str::CompactString;

use crate::ast::{Stmt, StmtKind};
use crate::test_utils::{
    arrow_entry, block, brk_to, cont_to, do_while, empty, expr, for_each, for_stmt, if_else,
    if_stmt, labeled, ret, step, switch, while_stmt,
};
use crate::{ControlFlowBuilder, FlowGraph, FlowId, FlowKind};

fn build(body: &Stmt) -> FlowGraph<'_> {
    ControlFlowBuilder::new().build(body)
}

fn next_of(graph: &FlowGraph<'_>, id: FlowId) -> FlowId {
    graph[id].next.unwrap()
}

fn branch_of(graph: &FlowGraph<'_>, id: FlowId) -> FlowId {
    graph[id].branch.unwrap()
}

/// The unique node of the given kind on the given source line.
fn find(graph: &FlowGraph<'_>, kind: FlowKind, line: u32) -> FlowId {
    let mut matches = graph
        .iter()
        .filter(|(_, node)| node.kind == kind && node.source.pos().line == line)
        .map(|(id, _)| id);
    let found = matches.next().unwrap();
    assert!(matches.next().is_none(), "{kind:?} at line {line} not unique");
    found
}

#[test]
fn empty_block_yields_start_with_absent_next() {
    let body = block(1, vec![]);
    let graph = build(&body);
    assert_eq!(graph.len(), 1);
    assert_eq!(graph[graph.start()].kind, FlowKind::Start);
    assert_eq!(graph[graph.start()].next, None);
}

#[test]
fn empty_statements_and_declarations_are_transparent() {
    let local_type = Stmt::new(
        StmtKind::LocalType {
            name: CompactString::from("Helper"),
        },
        crate::test_utils::pos(3),
    );
    let body = block(1, vec![empty(2), local_type, step(4, "a = 1"), empty(5)]);
    let graph = build(&body);
    let first = next_of(&graph, graph.start());
    assert_eq!(graph[first].kind, FlowKind::Step);
    assert_eq!(graph[first].source.pos().line, 4);
    assert_eq!(graph[first].next, None);
    assert_eq!(graph.len(), 2);
}

#[test]
fn sequence_folds_into_declaration_order() {
    let body = block(1, vec![step(2, "a = 1"), step(3, "b = 2"), step(4, "c = 3")]);
    let graph = build(&body);
    let mut id = next_of(&graph, graph.start());
    for line in [2, 3, 4] {
        assert_eq!(graph[id].kind, FlowKind::Step);
        assert_eq!(graph[id].source.pos().line, line);
        match graph[id].next {
            Some(next) => id = next,
            None => assert_eq!(line, 4),
        }
    }
}

#[test]
fn if_without_else_falls_through_to_continuation() {
    let body = block(
        1,
        vec![
            if_stmt(2, expr(2, 9, "c"), block(2, vec![step(3, "t()")])),
            step(5, "after()"),
        ],
    );
    let graph = build(&body);
    let choice = next_of(&graph, graph.start());
    assert_eq!(graph[choice].kind, FlowKind::Choice);
    assert_eq!(graph[choice].condition.unwrap().text, "c");

    let after = find(&graph, FlowKind::Step, 5);
    let then = branch_of(&graph, choice);
    assert_eq!(graph[then].source.pos().line, 3);
    assert_eq!(graph[then].next, Some(after));
    assert_eq!(graph[choice].next, Some(after));
}

#[test]
fn if_else_arms_rejoin_at_continuation() {
    let body = block(
        1,
        vec![
            if_else(
                2,
                expr(2, 9, "c"),
                block(2, vec![step(3, "t()")]),
                block(4, vec![step(5, "e()")]),
            ),
            step(7, "after()"),
        ],
    );
    let graph = build(&body);
    let choice = next_of(&graph, graph.start());
    let after = find(&graph, FlowKind::Step, 7);
    assert_eq!(graph[branch_of(&graph, choice)].source.pos().line, 3);
    assert_eq!(graph[branch_of(&graph, choice)].next, Some(after));
    let else_arm = next_of(&graph, choice);
    assert_eq!(graph[else_arm].source.pos().line, 5);
    assert_eq!(graph[else_arm].next, Some(after));
}

#[test]
fn while_body_loops_back_to_test() {
    let body = block(
        1,
        vec![
            while_stmt(2, expr(2, 12, "c"), block(2, vec![step(3, "x()")])),
            step(4, "after()"),
        ],
    );
    let graph = build(&body);
    let test = next_of(&graph, graph.start());
    assert_eq!(graph[test].kind, FlowKind::Choice);
    let inner = branch_of(&graph, test);
    assert_eq!(graph[inner].next, Some(test), "back edge");
    assert_eq!(graph[test].next, Some(find(&graph, FlowKind::Step, 4)));
}

#[test]
fn while_with_empty_body_branches_to_itself() {
    let body = block(1, vec![while_stmt(2, expr(2, 12, "c"), block(2, vec![]))]);
    let graph = build(&body);
    let test = next_of(&graph, graph.start());
    assert_eq!(graph[test].branch, Some(test));
    assert_eq!(graph[test].next, None);
}

#[test]
fn do_while_enters_at_body_and_tests_afterwards() {
    let body = block(
        1,
        vec![do_while(2, expr(4, 14, "c"), block(2, vec![step(3, "x()")]))],
    );
    let graph = build(&body);
    let entry = next_of(&graph, graph.start());
    assert_eq!(graph[entry].kind, FlowKind::Step);
    assert_eq!(graph[entry].source.pos().line, 3);
    let test = next_of(&graph, entry);
    assert_eq!(graph[test].kind, FlowKind::Choice);
    assert_eq!(graph[test].branch, Some(entry), "back edge");
    assert_eq!(graph[test].next, None);
}

#[test]
fn for_each_is_one_node_serving_test_and_reentry() {
    let body = block(
        1,
        vec![for_each(2, expr(2, 14, "xs"), block(2, vec![step(3, "s()")]))],
    );
    let graph = build(&body);
    let test = next_of(&graph, graph.start());
    assert_eq!(graph[test].kind, FlowKind::Choice);
    assert_eq!(graph[test].condition, None);
    let inner = branch_of(&graph, test);
    assert_eq!(graph[inner].next, Some(test));
    assert_eq!(graph[test].next, None);
}

#[test]
fn labeled_jumps_resolve_through_the_placeholder() {
    // outer: while (c) { while (d) { if (e) { break outer; } continue outer; } }
    // after();
    let body = block(
        1,
        vec![
            labeled(
                2,
                "outer",
                while_stmt(
                    2,
                    expr(2, 15, "c"),
                    block(
                        2,
                        vec![while_stmt(
                            3,
                            expr(3, 15, "d"),
                            block(
                                3,
                                vec![
                                    if_stmt(4, expr(4, 13, "e"), block(4, vec![brk_to(5, "outer")])),
                                    cont_to(6, "outer"),
                                ],
                            ),
                        )],
                    ),
                ),
            ),
            step(8, "after()"),
        ],
    );
    let graph = build(&body);
    let outer_test = find(&graph, FlowKind::Choice, 2);
    let after = find(&graph, FlowKind::Step, 8);

    let break_node = find(&graph, FlowKind::Break, 5);
    assert_eq!(graph[break_node].next, Some(after));
    assert!(graph[break_node].diagnostics.is_empty());

    // continue outer targets the labeled loop's own test node, which did
    // not exist yet when the label was bound.
    let continue_node = find(&graph, FlowKind::Continue, 6);
    assert_eq!(graph[continue_node].next, Some(outer_test));
}

#[test]
fn labeled_continue_on_a_classic_for_reenters_at_the_update_chain() {
    // outer: for (int i = 0; i < 10; i++) {
    //     if (c) { continue outer; }
    //     work();
    // }
    let body = block(
        1,
        vec![labeled(
            2,
            "outer",
            for_stmt(
                2,
                vec![expr(2, 14, "int i = 0")],
                Some(expr(2, 25, "i < 10")),
                vec![expr(2, 33, "i++")],
                block(
                    2,
                    vec![
                        if_stmt(3, expr(3, 13, "c"), block(3, vec![cont_to(4, "outer")])),
                        step(5, "work()"),
                    ],
                ),
            ),
        )],
    );
    let graph = build(&body);

    let continue_node = find(&graph, FlowKind::Continue, 4);
    let update = next_of(&graph, continue_node);
    assert_eq!(graph[update].kind, FlowKind::ForUpdate);
    // Same re-entry as normal body completion; the initializers run once.
    let work = find(&graph, FlowKind::Step, 5);
    assert_eq!(graph[work].next, Some(update));
    assert_eq!(next_of(&graph, update), find(&graph, FlowKind::Choice, 2));
}

#[test]
fn labeled_continue_on_a_do_while_targets_the_test() {
    // outer: do {
    //     if (c) { continue outer; }
    //     work();
    // } while (d);
    let body = block(
        1,
        vec![labeled(
            2,
            "outer",
            do_while(
                2,
                expr(6, 14, "d"),
                block(
                    2,
                    vec![
                        if_stmt(3, expr(3, 13, "c"), block(3, vec![cont_to(4, "outer")])),
                        step(5, "work()"),
                    ],
                ),
            ),
        )],
    );
    let graph = build(&body);

    // The construct is entered at the body; the labeled continue jumps to
    // the test, exactly as an unlabeled one would.
    assert_eq!(
        next_of(&graph, graph.start()),
        find(&graph, FlowKind::Choice, 3)
    );
    let test = find(&graph, FlowKind::Choice, 2);
    assert_eq!(graph[find(&graph, FlowKind::Continue, 4)].next, Some(test));
}

#[test]
fn unknown_label_degrades_with_a_diagnostic() {
    let body = block(
        1,
        vec![while_stmt(
            2,
            expr(2, 12, "c"),
            block(2, vec![brk_to(3, "nope")]),
        )],
    );
    let graph = build(&body);
    let break_node = find(&graph, FlowKind::Break, 3);
    assert_eq!(graph[break_node].next, None);
    assert_eq!(graph[break_node].diagnostics.as_slice(), ["label not found: nope"]);

    let collected = graph.collect_diagnostics();
    assert_eq!(collected.len(), 1);
    assert!(collected.contains_key(&break_node));
}

#[test]
fn switch_without_entries_is_transparent() {
    let body = block(
        1,
        vec![step(2, "before()"), switch(3, expr(3, 13, "a"), vec![]), step(4, "after()")],
    );
    let graph = build(&body);
    let before = find(&graph, FlowKind::Step, 2);
    let after = find(&graph, FlowKind::Step, 4);
    assert_eq!(graph[before].next, Some(after));
}

#[test]
fn arrow_entry_with_empty_body_flags_its_test() {
    // A bodiless arrow entry has no body node; the diagnostic lands on its
    // label test instead. An arrow default with an empty body contributes
    // no node at all, so that one shape stays silent.
    let body = block(
        1,
        vec![
            switch(
                2,
                expr(2, 13, "a"),
                vec![
                    arrow_entry(3, vec![expr(3, 14, "0")], vec![]),
                    arrow_entry(4, vec![], vec![]),
                ],
            ),
            step(6, "after()"),
        ],
    );
    let graph = build(&body);
    let test = find(&graph, FlowKind::Choice, 3);
    assert_eq!(graph[test].diagnostics.as_slice(), ["unsupported switch form"]);
    assert_eq!(graph.collect_diagnostics().len(), 1);
}

#[test]
fn choice_branch_is_absent_when_the_taken_path_exits() {
    // if (c) { }  - at the end of the body, both outcomes leave the unit.
    let body = block(1, vec![if_stmt(2, expr(2, 9, "c"), block(2, vec![]))]);
    let graph = build(&body);
    let choice = next_of(&graph, graph.start());
    assert_eq!(graph[choice].kind, FlowKind::Choice);
    assert_eq!(graph[choice].branch, None);
    assert_eq!(graph[choice].next, None);
}

#[test]
fn code_after_return_stays_in_the_arena_unreachable() {
    let body = block(1, vec![ret(2), step(3, "dead()")]);
    let graph = build(&body);
    let return_node = next_of(&graph, graph.start());
    assert_eq!(graph[return_node].kind, FlowKind::Return);
    assert_eq!(graph[return_node].next, None);

    let dead = find(&graph, FlowKind::Step, 3);
    assert_eq!(graph.unreachable_nodes(), vec![dead]);
}
