//! Formatting functions for user-facing output.
//!
//! Step banners and outcome lines go to the terminal directly; command
//! echo and child output go through the `log` facade instead.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a step banner.
pub fn display_step(message: &str) {
    println!("{} {}", style("==>>>").cyan().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Closing line printed once per run, whatever the outcome.
pub fn display_finished() {
    display_status("Execution finished");
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display a revert notice on stderr.
pub fn display_revert(message: &str) {
    eprintln!("{} {}", style(">>>").yellow(), message);
}

/// Display the version change about to be published.
pub fn display_version_change(current: &str, new: &str) {
    println!("\n{}", style("Version to publish:").bold());
    if current.is_empty() {
        println!("  New:  {}", style(new).green());
    } else {
        println!("  From: {}", style(current).red());
        println!("  To:   {}", style(new).green());
    }
}
