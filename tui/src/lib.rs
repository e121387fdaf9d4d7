//! TUI rendering for Bitlights using ratatui.

mod format;
mod input;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, sparkle_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use bitlights_engine::{
    AnimPhase, App, BitIndex, Difficulty, Feedback, Mode, QuizView, Snapshot, StatusKind, Term,
};

use self::format::{equation_spans, fit_hint, format_value};

/// Columns per light cell.
const CELL_WIDTH: u16 = 7;
const HEADER_HEIGHT: u16 = 3;
const PANEL_HEIGHT: u16 = 5;
const LIGHTS_HEIGHT: u16 = 6;

const KEY_HINTS: &[&str] = &[
    "1-8 toggle │ ←/→ move │ Space flip │ Enter check/next │ Tab mode │ +/- bits │ ? help │ Esc quit",
    "1-8 toggle │ Enter check/next │ ? help │ Esc quit",
    "? help",
];

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("1-8", "Toggle the light at that position"),
    ("←/→ h/l", "Move the cursor"),
    ("Space", "Toggle the light under the cursor"),
    ("e / g", "Lab (explore) / Game (quiz)"),
    ("Tab", "Switch mode"),
    ("+ / -", "More / fewer bits"),
    ("d", "Switch Easy / Pro"),
    ("c", "Check the answer (Pro)"),
    ("n", "Next round after a correct answer"),
    ("Enter", "Next round if solved, otherwise check"),
    ("r", "Turn every light off (Lab)"),
    ("z", "Show or hide zero terms"),
    ("?", "Toggle this help"),
    ("Esc", "Quit"),
];

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let snapshot = app.snapshot();

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Length(PANEL_HEIGHT),  // Quiz or explore panel
            Constraint::Length(LIGHTS_HEIGHT), // Lights
            Constraint::Min(0),                // Spacer
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    draw_header(frame, &snapshot, chunks[0], &palette);
    match snapshot.quiz.as_ref() {
        Some(quiz) => draw_quiz_panel(
            frame,
            app,
            quiz,
            snapshot.value,
            chunks[1],
            &palette,
            &glyphs,
        ),
        None => draw_explore_panel(frame, &snapshot, chunks[1], &palette),
    }
    draw_lights(frame, app, &snapshot, chunks[2], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[4], &palette);

    if app.show_help() {
        draw_help(frame, &palette);
    }
}

fn draw_header(frame: &mut Frame, snapshot: &Snapshot, area: Rect, palette: &Palette) {
    let settings = snapshot.settings;
    let mut spans = vec![Span::raw(" ")];
    for mode in [Mode::Explore, Mode::Quiz] {
        let style = if mode == settings.mode {
            match mode {
                Mode::Explore => styles::mode_explore(palette),
                Mode::Quiz => styles::mode_quiz(palette),
            }
        } else {
            Style::default().fg(palette.text_muted)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled("│ ", Style::default().fg(palette.bg_border)));
    spans.push(Span::styled(
        format!("Bits: {}", settings.bit_count),
        Style::default().fg(palette.text_primary),
    ));
    spans.push(Span::styled(" │ ", Style::default().fg(palette.bg_border)));

    // Difficulty only matters in a quiz.
    let difficulty_style = if settings.mode == Mode::Quiz {
        Style::default().fg(match settings.difficulty {
            Difficulty::Assisted => palette.success,
            Difficulty::Manual => palette.peach,
        })
    } else {
        Style::default().fg(palette.text_muted)
    };
    spans.push(Span::styled(
        settings.difficulty.label().to_string(),
        difficulty_style.add_modifier(Modifier::BOLD),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .style(Style::default().bg(palette.bg_panel))
            .title(Line::from(vec![Span::styled(
                " Bitlights ",
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )])),
    );
    frame.render_widget(header, area);
}

fn draw_quiz_panel(
    frame: &mut Frame,
    app: &App,
    quiz: &QuizView,
    value: u16,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let label = Style::default().fg(palette.text_muted);
    let strong = Style::default()
        .fg(palette.text_primary)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Target: ", label),
            Span::styled(quiz.target.to_string(), strong.fg(palette.accent)),
            Span::styled("    Score: ", label),
            Span::styled(quiz.score.to_string(), strong),
        ]),
        Line::from(vec![
            Span::styled("Value: ", label),
            Span::styled(format_value(value, quiz.value_hidden), strong),
        ]),
    ];

    let effect_progress = app.success_effect().and_then(|effect| match effect.phase() {
        AnimPhase::Running { progress } => Some(progress),
        AnimPhase::Completed => None,
    });

    let feedback = match quiz.feedback {
        Feedback::Success => {
            let sparkle = effect_progress
                .map(|progress| format!("{} ", sparkle_frame(progress, app.ui_options())))
                .unwrap_or_default();
            Line::from(Span::styled(
                format!("{sparkle}{} Correct! Press Enter for the next round", glyphs.correct),
                Style::default()
                    .fg(palette.success)
                    .add_modifier(Modifier::BOLD),
            ))
        }
        Feedback::Error => Line::from(Span::styled(
            format!("{} Not quite. Change a light and try again", glyphs.incorrect),
            Style::default().fg(palette.error),
        )),
        Feedback::None if quiz.overshoot => Line::from(Span::styled(
            format!("{} Too much! Turn some lights off", glyphs.overshoot),
            Style::default().fg(palette.warning),
        )),
        Feedback::None if quiz.value_hidden => Line::from(Span::styled(
            "Press c or Enter to check",
            Style::default().fg(palette.text_muted),
        )),
        Feedback::None => Line::from(Span::styled(
            "Light up the target",
            Style::default().fg(palette.text_muted),
        )),
    };
    lines.push(feedback);

    let border = if effect_progress.is_some() {
        palette.success
    } else {
        palette.primary
    };
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(palette.bg_panel))
            .title(Span::styled(" Game ", Style::default().fg(palette.text_primary))),
    );
    frame.render_widget(panel, area);
}

fn draw_explore_panel(frame: &mut Frame, snapshot: &Snapshot, area: Rect, palette: &Palette) {
    let terms: &[Term] = snapshot.terms.as_deref().unwrap_or_default();
    let label = Style::default().fg(palette.text_muted);

    let lines = vec![
        Line::from(equation_spans(terms, snapshot.value, palette)),
        Line::from(vec![
            Span::styled("Binary ", label),
            Span::styled(
                snapshot.bits.to_string(),
                Style::default().fg(palette.text_primary),
            ),
            Span::styled("  =  Decimal ", label),
            Span::styled(
                snapshot.value.to_string(),
                Style::default()
                    .fg(palette.bulb_on)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            if snapshot.settings.show_zero_terms {
                "z: hide zero terms"
            } else {
                "z: show zero terms"
            },
            label,
        )),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.bg_panel))
            .title(Span::styled(" Lab ", Style::default().fg(palette.text_primary))),
    );
    frame.render_widget(panel, area);
}

fn weight_label(index: BitIndex, hide_weights: bool) -> String {
    if hide_weights {
        format!("BIT {}", index.power())
    } else {
        index.weight().to_string()
    }
}

fn draw_lights(
    frame: &mut Frame,
    app: &App,
    snapshot: &Snapshot,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::horizontal(vec![Constraint::Length(CELL_WIDTH); snapshot.bits.len()])
        .flex(Flex::Center)
        .split(inner);

    // Manual quiz hides the weights; learners only see each bit's power.
    let hide_weights = snapshot.quiz.as_ref().is_some_and(|quiz| quiz.value_hidden);
    let weight_style = Style::default().fg(palette.text_secondary);
    for (index, cell) in snapshot.bits.indices().zip(cells.iter()) {
        let lit = snapshot.bits.get(index);
        let at_cursor = index.position() == app.cursor();
        let bulb = if lit { glyphs.bulb_on } else { glyphs.bulb_off };

        let lines = vec![
            Line::from(Span::styled(bulb, styles::bulb(palette, lit))),
            Line::from(Span::styled(weight_label(index, hide_weights), weight_style)),
            Line::from(Span::styled(
                if lit { "1" } else { "0" },
                Style::default().fg(palette.text_primary),
            )),
            Line::from(Span::styled(
                if at_cursor { glyphs.cursor } else { " " },
                Style::default().fg(palette.peach),
            )),
        ];
        let cell_style = if at_cursor {
            Style::default().bg(palette.bg_highlight)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(cell_style),
            *cell,
        );
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let line = if let Some(status) = app.status() {
        let (prefix, color) = match status.kind {
            StatusKind::Warning => ("Warning: ", palette.warning),
            StatusKind::Info => ("", palette.success),
        };
        Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("{prefix}{}", status.text), Style::default().fg(color)),
        ])
    } else {
        let hint = fit_hint(KEY_HINTS, area.width.saturating_sub(1));
        Line::from(vec![
            Span::raw(" "),
            Span::styled(hint, styles::key_hint(palette)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_help(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    let help_width = 52.min(area.width.saturating_sub(4));
    let help_height = (HELP_ENTRIES.len() as u16 + 4).min(area.height);
    let help_area = Rect {
        x: area.x + (area.width.saturating_sub(help_width) / 2),
        y: area.y + (area.height.saturating_sub(help_height) / 2),
        width: help_width,
        height: help_height,
    };

    // Clear background
    frame.render_widget(Clear, help_area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (key, desc) in HELP_ENTRIES {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<9}"), styles::key_highlight(palette)),
            Span::styled(format!(" {desc}"), Style::default().fg(palette.text_secondary)),
        ]));
    }

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.bg_popup))
            .title(Line::from(vec![Span::styled(
                " Keys ",
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )])),
    );
    frame.render_widget(help, help_area);
}
