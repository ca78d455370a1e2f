//! Rule forbidding property access through string literals.
//!
//! Flags element access expressions whose index is a string literal
//! (`x["id"]`) and suggests the property accessor form (`x.id`). The fix
//! is offered only when the literal is shaped like an identifier; other
//! literals still produce a match, just without a rewrite.
//!
//! # Suppression
//!
//! `// relint:disable no-string-literal`

use relint_core::{
    Fix, Flow, Match, MatchCollector, NodeKind, Replacement, Rule, RuleBox, RuleOptions,
    SourceFile, SyntaxNode, Walker,
};

/// Rule name for configuration and suppression directives.
pub const NAME: &str = "no-string-literal";

/// Message attached to every match of this rule.
pub const FAILURE_STRING: &str = "Object properties cannot be accessed through string literals.";

/// Forbids string-literal element access.
pub struct NoStringLiteral {
    options: RuleOptions,
}

impl NoStringLiteral {
    /// Registry factory.
    #[must_use]
    pub fn factory(options: RuleOptions) -> RuleBox {
        Box::new(Self { options })
    }
}

impl Rule for NoStringLiteral {
    fn options(&self) -> &RuleOptions {
        &self.options
    }

    fn apply(&self, file: &SourceFile) -> Vec<Match> {
        let mut collector = MatchCollector::new(file, &self.options);
        let walker: Walker<MatchCollector<'_>> = Walker::new().on(NodeKind::Index, on_index);
        walker.walk(&mut collector, &file.root);
        collector.into_matches()
    }
}

fn on_index<'a>(
    collector: &mut MatchCollector<'a>,
    _walker: &Walker<MatchCollector<'a>>,
    node: &SyntaxNode,
) -> Flow {
    // Shape: [receiver, string-literal index]
    if node.children.len() == 2 {
        let receiver = &node.children[0];
        let argument = &node.children[1];
        if argument.kind == NodeKind::StrLit {
            let literal = collector.file().text_of(argument.span);
            let property = literal.trim_matches('"');

            let fixes = if is_identifier(property) {
                vec![Fix::new(
                    "Rewrite as a property accessor",
                    true,
                    vec![Replacement::new(
                        receiver.span.end,
                        node.span.end,
                        format!(".{property}"),
                    )],
                )]
            } else {
                Vec::new()
            };

            let m = collector.create_match(
                node.span.start,
                node.span.len(),
                FAILURE_STRING,
                fixes,
            );
            collector.add_match(m);
        }
    }

    Flow::Descend
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
