use ratatui::{style::Style, text::Span};
use unicode_width::UnicodeWidthStr;

use bitlights_engine::Term;

use crate::theme::Palette;

/// Additive form of the row, e.g. `8 + 0 + 2 + 0 = 10`.
///
/// With every term hidden the left side collapses to `0`.
pub(crate) fn format_equation(terms: &[Term], value: u16) -> String {
    if terms.is_empty() {
        return format!("0 = {value}");
    }
    let sum = terms
        .iter()
        .map(|term| term.contribution().to_string())
        .collect::<Vec<_>>()
        .join(" + ");
    format!("{sum} = {value}")
}

/// Equation split into spans: active terms bright, zero terms muted.
pub(crate) fn equation_spans<'a>(terms: &[Term], value: u16, palette: &Palette) -> Vec<Span<'a>> {
    let active = Style::default().fg(palette.bulb_on);
    let inactive = Style::default().fg(palette.text_muted);
    let plain = Style::default().fg(palette.text_secondary);

    if terms.is_empty() {
        return vec![Span::styled(format_equation(terms, value), plain)];
    }

    let mut spans = Vec::with_capacity(terms.len() * 2 + 1);
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" + ", plain));
        }
        let style = if term.active { active } else { inactive };
        spans.push(Span::styled(term.contribution().to_string(), style));
    }
    spans.push(Span::styled(format!(" = {value}"), plain));
    spans
}

/// Manual quizzes mask the running value.
pub(crate) fn format_value(value: u16, hidden: bool) -> String {
    if hidden {
        "? ? ?".to_string()
    } else {
        value.to_string()
    }
}

/// Pick the first hint line that fits in `width` columns.
pub(crate) fn fit_hint<'a>(candidates: &[&'a str], width: u16) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|hint| hint.width() <= usize::from(width))
        .or_else(|| candidates.last().copied())
        .unwrap_or_default()
}
