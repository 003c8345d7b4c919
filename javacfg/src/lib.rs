//! Control-flow graph construction for Java method and constructor bodies.
//!
//! Given the statement tree of one body (or an ad-hoc fragment), the
//! builder produces a graph that records, for every statement, what
//! executes next on normal completion and what alternate target a branch
//! may take. Downstream analyses (dead-code detection, reachability,
//! linting) can then reason about execution order without re-deriving it
//! from syntax.
//!
//! # Design Principles
//!
//! - **One graph per body**: independent bodies share no state and may be
//!   built in parallel by the caller.
//! - **Never fail on semantic gaps**: unresolved labels, unresolvable
//!   throws and unsupported switch forms degrade the affected node with a
//!   diagnostic; the build always completes.
//! - **Frozen output**: nodes are mutated only while the builder wires
//!   forward references; the returned graph is immutable and safe for
//!   unsynchronized concurrent reads.
//! - **No parsing, no evaluation**: the statement tree and static type
//!   answers come from collaborators; expressions are opaque here.
//!
//! # Example
//!
//! ```
//! use javacfg::test_utils::{block, expr, step, while_stmt};
//! use javacfg::{ControlFlowBuilder, FlowKind};
//!
//! // while (running) { tick(); }
//! let body = block(
//!     1,
//!     vec![while_stmt(
//!         2,
//!         expr(2, 12, "running"),
//!         block(2, vec![step(3, "tick()")]),
//!     )],
//! );
//! let graph = ControlFlowBuilder::new().build(&body);
//!
//! let start = &graph[graph.start()];
//! assert_eq!(start.kind, FlowKind::Start);
//! let test = &graph[start.next.unwrap()];
//! assert_eq!(test.kind, FlowKind::Choice);
//! // The body loops back to the test.
//! assert_eq!(graph[test.branch.unwrap()].next, start.next);
//! ```

pub mod ast;
mod builder;
mod graph;
pub mod render;
pub mod resolve;
pub mod test_utils;
mod types;
pub mod unit;

pub use builder::ControlFlowBuilder;
pub use graph::FlowGraph;
pub use resolve::{TypeResolver, TypeTable};
pub use types::{FlowId, FlowKind, FlowNode, SourceRef};
pub use unit::{Declaration, SourceUnit, UnitFlows};

#[cfg(test)]
mod tests;
