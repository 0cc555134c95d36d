use std::io::Write;

use crossterm::style::{ResetColor, SetForegroundColor};

use crate::color;
use crate::config::Theme;
use crate::system::HostFact;

/// Writes the report: one `<color><icon> <reset><value>` line per fact.
/// The icon defaults to the fact's plain label when the theme doesn't set
/// one; an explicitly empty icon renders as empty text.
pub fn render(out: &mut dyn Write, theme: &Theme, facts: &[HostFact]) -> std::io::Result<()> {
    for fact in facts {
        let fg = color::resolve(theme.color(fact.field));
        let icon = theme.icon(fact.field).unwrap_or(fact.label);
        writeln!(
            out,
            "{}{} {}{}",
            SetForegroundColor(fg),
            icon,
            ResetColor,
            fact.value
        )?;
    }
    out.flush()
}
