//! Source-unit driver: one build per constructor and method.

use compact_str::CompactString;

use crate::ast::Stmt;
use crate::builder::ControlFlowBuilder;
use crate::graph::FlowGraph;

/// One constructor or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The declared name, for reporting only.
    pub name: CompactString,
    /// The body; absent for abstract and interface methods.
    pub body: Option<Stmt>,
}

/// All constructors and methods of one source unit, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceUnit {
    /// Constructor declarations in source order.
    pub constructors: Vec<Declaration>,
    /// Method declarations in source order.
    pub methods: Vec<Declaration>,
}

/// The per-unit result: one optional graph per declaration, in the same
/// order as the declarations, absent where a declaration has no body.
#[derive(Debug)]
pub struct UnitFlows<'a> {
    /// One entry per constructor.
    pub constructor_flows: Vec<Option<FlowGraph<'a>>>,
    /// One entry per method.
    pub method_flows: Vec<Option<FlowGraph<'a>>>,
}

impl ControlFlowBuilder<'_> {
    /// Builds the flows of every constructor and method in a unit.
    #[must_use]
    pub fn build_unit<'a>(&self, unit: &'a SourceUnit) -> UnitFlows<'a> {
        let build = |declaration: &'a Declaration| {
            declaration.body.as_ref().map(|body| self.build(body))
        };
        UnitFlows {
            constructor_flows: unit.constructors.iter().map(build).collect(),
            method_flows: unit.methods.iter().map(build).collect(),
        }
    }
}
