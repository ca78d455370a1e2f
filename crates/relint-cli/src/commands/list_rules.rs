//! List rules command implementation.

use relint_rules::{must_use_return, no_string_literal};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<22} Reports", "Name");
    println!("{}", "-".repeat(80));

    let rules = [
        (no_string_literal::NAME, no_string_literal::FAILURE_STRING),
        (must_use_return::NAME, must_use_return::FAILURE_STRING),
    ];
    for (name, about) in rules {
        println!("{name:<22} {about}");
    }

    println!("\nIn-source suppression:");
    println!("  // relint:disable [rule-name]");
    println!("  // relint:enable [rule-name]");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  relint check --rules no-string-literal,must-use-return");
}
