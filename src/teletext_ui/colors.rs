use crossterm::style::Color;

// Constants for teletext appearance
pub fn header_bg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn header_fg() -> Color {
    Color::AnsiValue(21)
} // Bright blue
pub fn title_bg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn subheader_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn selected_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
pub fn stat_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn hint_fg() -> Color {
    Color::AnsiValue(201)
} // Bright magenta
pub fn error_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
pub fn gold_fg() -> Color {
    Color::AnsiValue(220)
}
pub fn silver_fg() -> Color {
    Color::AnsiValue(250)
}
pub fn bronze_fg() -> Color {
    Color::AnsiValue(208)
}

/// ANSI 256-colour code of a crossterm colour, `fallback` for anything else
pub fn ansi_code(color: Color, fallback: u8) -> u8 {
    match color {
        Color::AnsiValue(val) => val,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_code() {
        assert_eq!(ansi_code(header_bg(), 0), 21);
        assert_eq!(ansi_code(Color::Red, 196), 196);
    }
}
