//! Reference textual rendering of a built graph, for manual inspection.
//!
//! One line per reachable node:
//!
//! ```text
//! <line> <kind>   -> <target-line|"end">[ or <branch-line>][ (cond: <line>:<col>)][ *** <diagnostic> ***]
//! ```
//!
//! The format is illustrative, not a stability contract.

use std::fmt::Write as _;

use crate::graph::FlowGraph;
use crate::types::FlowId;

/// Renders every node reachable from the graph's start, in visit order.
#[must_use]
pub fn render(graph: &FlowGraph<'_>) -> String {
    let mut out = String::new();
    graph.visit_all(graph.start(), |_, node| {
        let _ = write!(
            out,
            "{:<4} {:<6} -> {}",
            node.source.pos().line,
            node.kind.short_name(),
            target(graph, node.next),
        );
        if let Some(branch) = node.branch {
            let _ = write!(out, " or {}", target(graph, Some(branch)));
        }
        if let Some(condition) = node.condition {
            let _ = write!(out, " (cond: {}:{})", condition.pos.line, condition.pos.column);
        }
        for diagnostic in &node.diagnostics {
            let _ = write!(out, " *** {diagnostic} ***");
        }
        out.push('\n');
    });
    out
}

fn target(graph: &FlowGraph<'_>, id: Option<FlowId>) -> String {
    match id {
        Some(id) => graph[id].source.pos().line.to_string(),
        None => "end".to_owned(),
    }
}
