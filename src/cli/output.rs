//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: ids, hints
//! - Bold: headers, values
//! - Dim: secondary info
//!
//! Status lines go to stderr so stdout stays clean for scripting
//! (`hexagon seal ... > file`).

use console::style;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark.
///
/// Example: `✓ record added`
pub fn success(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✓").green(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message.
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("⚠").yellow(), msg);
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// Print a hint message.
///
/// Example: `→ run: hexagon user add alice@example.com`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold header.
pub fn header(title: &str) {
    if colors_enabled() {
        println!("{}", style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Print a key-value pair (label dimmed, value bold).
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {}  {}", label, value);
    }
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a horizontal rule.
pub fn rule() {
    let line = "─".repeat(RULE_WIDTH);
    if colors_enabled() {
        println!("{}", style(line).dim());
    } else {
        println!("{}", line);
    }
}

/// Print a dimmed message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Format an id inline.
pub fn id(value: &str) -> String {
    if colors_enabled() {
        style(value).cyan().to_string()
    } else {
        value.to_string()
    }
}

/// Print a header followed by a rule.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
