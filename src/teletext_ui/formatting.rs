// src/teletext_ui/formatting.rs - Number and label formatting for the scorer page

/// Expected goals to one decimal, e.g. `29.2`
pub fn format_expected_goals(value: f64) -> String {
    format!("{value:.1}")
}

/// Minutes with thousands separators, e.g. `2,552`
pub fn format_minutes(minutes: u32) -> String {
    let digits = minutes.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Season label from its end year, e.g. `2023/2024`
pub fn season_label(season_end_year: i32) -> String {
    format!("{}/{}", season_end_year - 1, season_end_year)
}

/// Cuts `text` to at most `width` characters, marking the cut with a dot
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('.');
    out
}

/// Left-aligns `text` in `width` columns, counting characters rather than bytes
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
