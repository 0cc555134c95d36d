use crossterm::style::Color;

const FALLBACK: Color = Color::White;

/// Resolves a theme color spec to a terminal color.
///
/// `#RRGGBB` (exactly six hex digits) becomes a 24-bit color; the eight
/// standard names match case-sensitively. Everything else, including the
/// empty string, falls back to white. Never fails.
pub fn resolve(spec: &str) -> Color {
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(FALLBACK);
    }
    match spec {
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "white" => Color::White,
        _ => FALLBACK,
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb {
        r: ((rgb >> 16) & 0xFF) as u8,
        g: ((rgb >> 8) & 0xFF) as u8,
        b: (rgb & 0xFF) as u8,
    })
}
