//! Rule requiring non-unit return values to be used.
//!
//! Semantic: the syntax-only pass reports nothing, the real work happens
//! in `apply_with_program`. An expression statement whose expression is a
//! call with a known non-unit return type discards that value; the fix
//! removes the statement. Callees the resolver does not know are left
//! alone.
//!
//! # Suppression
//!
//! `// relint:disable must-use-return`

use relint_core::{
    Fix, Flow, Match, MatchCollector, NodeKind, Replacement, Rule, RuleBox, RuleOptions,
    SourceFile, SyntaxNode, TypeResolver, Walker,
};

/// Rule name for configuration and suppression directives.
pub const NAME: &str = "must-use-return";

/// Message attached to every match of this rule.
pub const FAILURE_STRING: &str = "Non-void return values must be used.";

/// Flags call statements that discard a non-unit return value.
pub struct MustUseReturn {
    options: RuleOptions,
}

impl MustUseReturn {
    /// Registry factory.
    #[must_use]
    pub fn factory(options: RuleOptions) -> RuleBox {
        Box::new(Self { options })
    }
}

struct Run<'a> {
    collector: MatchCollector<'a>,
    types: &'a dyn TypeResolver,
}

impl Rule for MustUseReturn {
    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn apply(&self, _file: &SourceFile) -> Vec<Match> {
        // Needs type information; without it there is nothing to report.
        Vec::new()
    }

    fn apply_with_program(&self, file: &SourceFile, types: &dyn TypeResolver) -> Vec<Match> {
        let mut run = Run {
            collector: MatchCollector::new(file, &self.options),
            types,
        };
        let walker: Walker<Run<'_>> = Walker::new().on(NodeKind::ExprStmt, on_expr_stmt);
        walker.walk(&mut run, &file.root);
        run.collector.into_matches()
    }
}

fn on_expr_stmt<'a>(run: &mut Run<'a>, _walker: &Walker<Run<'a>>, node: &SyntaxNode) -> Flow {
    let Some(call) = node.first_child().filter(|c| c.kind == NodeKind::Call) else {
        return Flow::Descend;
    };
    let Some(callee) = call.first_child().filter(|c| c.kind == NodeKind::Path) else {
        return Flow::Descend;
    };

    let name = run.collector.file().text_of(callee.span).to_string();
    if let Some(return_type) = run.types.return_type_of(&name) {
        if return_type != "()" {
            let fix = Fix::new(
                "Remove statement",
                true,
                vec![Replacement::new(node.span.start, node.span.end, "")],
            );
            let m = run.collector.create_match(
                call.span.start,
                call.span.len(),
                FAILURE_STRING,
                vec![fix],
            );
            run.collector.add_match(m);
        }
    }

    Flow::Descend
}
