//! Terminal rendering of the calculator display

use console::style;
use keypad_calc::session::Display;

/// Renders the two display lines. The upper line is dimmed, the live
/// expression bold
#[must_use]
pub fn render_display(display: &Display) -> String {
    format!(
        "{}\n{}\n",
        style(&display.upper).dim(),
        style(&display.expression).bold()
    )
}

/// Renders history newest first, numbered from 1
#[must_use]
pub fn render_history(lines: &[String]) -> String {
    if lines.is_empty() {
        return format!("{}\n", style("(no history)").dim());
    }
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!("{:>2}. {line}\n", i + 1));
    }
    out
}

/// Display lines followed by history
#[must_use]
pub fn render_full(display: &Display) -> String {
    let mut out = render_display(display);
    if !display.history.is_empty() {
        out.push_str(&format!("{}\n", style("History").underlined()));
        out.push_str(&render_history(&display.history));
    }
    out
}
