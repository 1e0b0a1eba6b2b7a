//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{RoundingPolicy, TableRow};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

const INDENT: usize = 2;
const LABEL_WIDTH: usize = 32;
const NUMBER_WIDTH: usize = 14;

/// One table line: indented label, value, variance.
pub fn format_row(row: &TableRow, policy: &RoundingPolicy) -> String {
    let label = format!("{}{}", " ".repeat(row.depth * INDENT), row.label);
    format!(
        "{:<lw$} {:>nw$} {:>nw$}",
        label,
        policy.format(row.value),
        format!("{}%", policy.format(row.variance)),
        lw = LABEL_WIDTH,
        nw = NUMBER_WIDTH,
    )
}

/// Print the whole table followed by the grand total.
pub fn table(rows: &[TableRow], grand_total: f64, policy: &RoundingPolicy) {
    header(&format!(
        "{:<lw$} {:>nw$} {:>nw$}",
        "Label",
        "Value",
        "Variance",
        lw = LABEL_WIDTH,
        nw = NUMBER_WIDTH,
    ));
    for row in rows {
        let line = format_row(row, policy);
        if row.variance > 0.0 {
            println!("{}", line.green());
        } else if row.variance < 0.0 {
            println!("{}", line.red());
        } else if row.is_leaf {
            println!("{}", line);
        } else {
            println!("{}", line.bold());
        }
    }
    println!(
        "{}",
        format!(
            "{:<lw$} {:>nw$}",
            "Grand Total",
            policy.format(grand_total),
            lw = LABEL_WIDTH,
            nw = NUMBER_WIDTH,
        )
        .bold()
    );
}
