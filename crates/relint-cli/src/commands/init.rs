//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# relint configuration
#
# Each rule maps to `true`, `false`, or an array whose first element is
# the enabled flag and whose tail is passed to the rule as arguments:
#
#   some-rule = [true, "strict"]

[rules]
no-string-literal = true
must-use-return = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("relint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created relint.toml");
    println!("\nNext steps:");
    println!("  1. Edit relint.toml to configure rules");
    println!("  2. Run: relint check");

    Ok(())
}
